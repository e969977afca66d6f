// PetPal — Device State Machine
//
// `transition` is a pure function over (state, event) listing every pair;
// `Device` is the single-owner context around it. It feeds raw inputs
// through the debouncer, motion pipeline and light monitor, dispatches the
// resulting events, and turns the returned actions into effects for the
// runtime to apply.

use std::time::Duration;

use crate::button::ButtonDebouncer;
use crate::codec::{self, Outbound};
use crate::config::*;
use crate::events::*;
use crate::light::{AmbientLightMonitor, LightOutcome};
use crate::motion::MotionPipeline;
use crate::session::{SessionManager, SessionState};
use crate::tones::{self, Playback, TonePlayer, ToneTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    Booting,
    ShuttingDown,
    Waiting,
    ButtonPush,
    PowerButtonPush,
    Feed,
    Sleep,
    Exercise,
    Pet,
    Warning,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    Press(Button, PressKind),
    Motion(MotionEvent),
    Light(LightEvent),
    Inbound(InboundCommand),
    /// The tone started by the current state has played out.
    ToneFinished,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Play(ToneTable),
    Send(Outbound),
    SelectNextFood,
    Eat,
    ToggleSession,
    RearmLight,
    PowerOff,
}

pub fn transition(state: DeviceState, event: DeviceEvent) -> (DeviceState, Vec<Action>) {
    use DeviceEvent as E;
    use DeviceState as S;

    match (state, event) {
        // Power-down does not return; only the tune is left to finish.
        (S::ShuttingDown, E::ToneFinished) => (S::ShuttingDown, vec![Action::PowerOff]),
        (S::ShuttingDown, _) => (S::ShuttingDown, vec![]),

        (_, E::Press(Button::Power, PressKind::Long)) => (
            S::ShuttingDown,
            vec![
                Action::Send(Outbound::Msg2("device off".into())),
                Action::Play(tones::SHUTDOWN),
            ],
        ),

        // ---- Waiting ----
        (S::Waiting, E::Press(Button::Secondary, PressKind::Long)) => {
            (S::Feed, vec![Action::Eat, Action::Play(tones::EAT)])
        }
        (S::Waiting, E::Press(Button::Secondary, PressKind::Short)) => (
            S::ButtonPush,
            vec![Action::SelectNextFood, Action::Play(tones::FOOD_SELECT)],
        ),
        (S::Waiting, E::Press(Button::Power, PressKind::Short)) => (
            S::PowerButtonPush,
            vec![Action::ToggleSession, Action::Play(tones::SESSION_TOGGLE)],
        ),
        (S::Waiting, E::Motion(MotionEvent::Exercise)) => (
            S::Exercise,
            vec![
                Action::Send(Outbound::Exercise(1)),
                Action::Play(tones::EXERCISE),
            ],
        ),
        (S::Waiting, E::Motion(MotionEvent::Pet)) => (
            S::Pet,
            vec![Action::Send(Outbound::Pet(1)), Action::Play(tones::PET)],
        ),
        (S::Waiting, E::Motion(MotionEvent::NoEvent)) => (S::Waiting, vec![]),
        (S::Waiting, E::Light(LightEvent::Dark)) => (S::Sleep, vec![Action::Play(tones::SLEEP)]),
        (S::Waiting, E::Light(LightEvent::Light)) => (S::Waiting, vec![]),
        (S::Waiting, E::Inbound(InboundCommand::GameOver)) => {
            (S::GameOver, vec![Action::Play(tones::GAME_OVER)])
        }
        (S::Waiting, E::Inbound(InboundCommand::Warning)) => {
            (S::Warning, vec![Action::Play(tones::WARNING)])
        }
        (S::Waiting, E::ToneFinished) => (S::Waiting, vec![]),

        // ---- Tone-bearing states return to Waiting when the tune ends ----
        (S::Booting, E::ToneFinished) => (S::Waiting, vec![]),
        (S::Sleep, E::ToneFinished) => (S::Waiting, vec![Action::RearmLight]),
        (
            S::ButtonPush
            | S::PowerButtonPush
            | S::Feed
            | S::Exercise
            | S::Pet
            | S::Warning
            | S::GameOver,
            E::ToneFinished,
        ) => (S::Waiting, vec![]),

        // Already asleep: the monitor stays disarmed.
        (S::Sleep, E::Light(LightEvent::Dark)) => (S::Sleep, vec![]),
        // Busy with another tune (a petting tune in particular): darkness is
        // dismissed and must be re-detected from a fresh window.
        (
            S::Booting
            | S::ButtonPush
            | S::PowerButtonPush
            | S::Feed
            | S::Exercise
            | S::Pet
            | S::Warning
            | S::GameOver,
            E::Light(LightEvent::Dark),
        ) => (state, vec![Action::RearmLight]),

        (
            S::Booting
            | S::Sleep
            | S::ButtonPush
            | S::PowerButtonPush
            | S::Feed
            | S::Exercise
            | S::Pet
            | S::Warning
            | S::GameOver,
            E::Press(_, _) | E::Motion(_) | E::Light(LightEvent::Light) | E::Inbound(_),
        ) => (state, vec![]),
    }
}

pub struct Device {
    state: DeviceState,
    debouncer: ButtonDebouncer,
    motion: MotionPipeline,
    light: AmbientLightMonitor,
    session: SessionManager,
    player: TonePlayer,
    food: usize,
}

impl Device {
    /// Power-on: enter Booting and start the boot tune.
    pub fn boot(now: Duration) -> (Self, Vec<Effect>) {
        let mut device = Self {
            state: DeviceState::Booting,
            debouncer: ButtonDebouncer::new(),
            motion: MotionPipeline::new(),
            light: AmbientLightMonitor::new(),
            session: SessionManager::new(),
            player: TonePlayer::new(),
            food: 0,
        };
        let mut effects = Vec::new();
        device.play(tones::BOOT, now, &mut effects);
        log::info!("Booting");
        (device, effects)
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn session(&self) -> SessionState {
        self.session.state()
    }

    /// Currently selected food, 0-based.
    pub fn food_index(&self) -> usize {
        self.food
    }

    pub fn handle(&mut self, input: Input, now: Duration) -> Vec<Effect> {
        let mut effects = Vec::new();

        match input {
            Input::Motion(reading) => {
                if let Some(msg) = self.session.telemetry(|| Outbound::Motion(reading)) {
                    effects.push(Effect::Send(msg));
                }
                let sample = Sample::new(now.as_secs_f32(), reading);
                if let Some(result) = self.motion.push(sample) {
                    self.dispatch(DeviceEvent::Motion(result.event), now, &mut effects);
                }
            }
            Input::Light(lux) => match self.light.sample(now, lux) {
                LightOutcome::Duplicate => {
                    log::debug!("Light reading at {:?} dropped, same second", now);
                }
                LightOutcome::Accepted(event) => {
                    if let Some(msg) = self.session.telemetry(|| Outbound::Light(lux)) {
                        effects.push(Effect::Send(msg));
                    }
                    if let Some(event) = event {
                        self.dispatch(DeviceEvent::Light(event), now, &mut effects);
                    }
                }
            },
            Input::Button(event) => {
                if let Some(kind) = self.debouncer.on_event(event) {
                    self.dispatch(DeviceEvent::Press(event.button, kind), now, &mut effects);
                }
            }
            Input::Inbound(payload) => match codec::parse_inbound(&payload) {
                Some(command) => self.dispatch(DeviceEvent::Inbound(command), now, &mut effects),
                None => log::debug!("Ignoring inbound message {:?}", payload),
            },
        }

        effects
    }

    /// Advance tone playback; leaves a tone-bearing state once its tune ends.
    pub fn tick(&mut self, now: Duration) -> Vec<Effect> {
        let mut buzz = Vec::new();
        let playback = self.player.poll(now, &mut buzz);
        let mut effects: Vec<Effect> = buzz.into_iter().map(Effect::Buzzer).collect();

        if playback == Playback::Finished {
            self.dispatch(DeviceEvent::ToneFinished, now, &mut effects);
        }
        effects
    }

    fn dispatch(&mut self, event: DeviceEvent, now: Duration, effects: &mut Vec<Effect>) {
        let (next, actions) = transition(self.state, event);
        if next != self.state {
            log::info!("{:?} -> {:?} on {:?}", self.state, next, event);
        }
        self.state = next;

        for action in actions {
            self.execute(action, now, effects);
        }
    }

    fn execute(&mut self, action: Action, now: Duration, effects: &mut Vec<Effect>) {
        match action {
            Action::Play(table) => self.play(table, now, effects),
            Action::Send(msg) => effects.push(Effect::Send(msg)),
            Action::SelectNextFood => {
                self.food = (self.food + 1) % FOOD_COUNT;
                let name = FOOD_NAMES[self.food];
                effects.push(Effect::Send(Outbound::Msg1(format!("{} selected", name))));
            }
            Action::Eat => effects.push(Effect::Send(Outbound::Eat(self.food + 1))),
            Action::ToggleSession => {
                effects.extend(self.session.toggle().into_iter().map(Effect::Send));
                effects.push(Effect::Led(self.session.is_sending()));
            }
            Action::RearmLight => self.light.rearm(),
            Action::PowerOff => effects.push(Effect::PowerOff),
        }
    }

    fn play(&mut self, table: ToneTable, now: Duration, effects: &mut Vec<Effect>) {
        let mut buzz = Vec::new();
        self.player.start(table, now, &mut buzz);
        effects.extend(buzz.into_iter().map(Effect::Buzzer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::{DeviceEvent as E, DeviceState as S};

    const ALL_STATES: [DeviceState; 11] = [
        S::Booting,
        S::ShuttingDown,
        S::Waiting,
        S::ButtonPush,
        S::PowerButtonPush,
        S::Feed,
        S::Sleep,
        S::Exercise,
        S::Pet,
        S::Warning,
        S::GameOver,
    ];

    #[test]
    fn power_long_press_shuts_down_from_anywhere() {
        for state in ALL_STATES {
            let (next, _) = transition(state, E::Press(Button::Power, PressKind::Long));
            assert_eq!(next, S::ShuttingDown, "from {:?}", state);
        }
    }

    #[test]
    fn shutting_down_only_powers_off() {
        let (next, actions) = transition(S::ShuttingDown, E::ToneFinished);
        assert_eq!(next, S::ShuttingDown);
        assert_eq!(actions, vec![Action::PowerOff]);

        let (next, actions) = transition(S::ShuttingDown, E::Press(Button::Secondary, PressKind::Long));
        assert_eq!(next, S::ShuttingDown);
        assert!(actions.is_empty());
    }

    #[test]
    fn waiting_transitions() {
        let cases = [
            (E::Press(Button::Secondary, PressKind::Long), S::Feed),
            (E::Press(Button::Secondary, PressKind::Short), S::ButtonPush),
            (E::Press(Button::Power, PressKind::Short), S::PowerButtonPush),
            (E::Motion(MotionEvent::Exercise), S::Exercise),
            (E::Motion(MotionEvent::Pet), S::Pet),
            (E::Motion(MotionEvent::NoEvent), S::Waiting),
            (E::Light(LightEvent::Dark), S::Sleep),
            (E::Light(LightEvent::Light), S::Waiting),
            (E::Inbound(InboundCommand::Warning), S::Warning),
            (E::Inbound(InboundCommand::GameOver), S::GameOver),
        ];
        for (event, expected) in cases {
            assert_eq!(transition(S::Waiting, event).0, expected, "on {:?}", event);
        }
    }

    #[test]
    fn tone_states_return_to_waiting() {
        for state in ALL_STATES {
            if state == S::ShuttingDown {
                continue;
            }
            assert_eq!(transition(state, E::ToneFinished).0, S::Waiting, "from {:?}", state);
        }
    }

    #[test]
    fn busy_states_ignore_input() {
        for event in [
            E::Press(Button::Secondary, PressKind::Long),
            E::Press(Button::Power, PressKind::Short),
            E::Motion(MotionEvent::Exercise),
            E::Inbound(InboundCommand::GameOver),
        ] {
            assert_eq!(transition(S::Pet, event), (S::Pet, vec![]));
            assert_eq!(transition(S::Booting, event), (S::Booting, vec![]));
        }
    }

    #[test]
    fn dark_while_petting_is_dismissed() {
        let (next, actions) = transition(S::Pet, E::Light(LightEvent::Dark));
        assert_eq!(next, S::Pet);
        assert_eq!(actions, vec![Action::RearmLight]);
    }

    #[test]
    fn leaving_sleep_rearms_light() {
        assert_eq!(
            transition(S::Sleep, E::ToneFinished),
            (S::Waiting, vec![Action::RearmLight])
        );
    }

    #[test]
    fn boot_starts_tune() {
        let (device, effects) = Device::boot(Duration::ZERO);
        assert_eq!(device.state(), S::Booting);
        assert_eq!(
            effects,
            vec![Effect::Buzzer(BuzzerCommand::Start(tones::BOOT[0].freq_hz))]
        );
    }

    #[test]
    fn boot_tune_ends_in_waiting() {
        let (mut device, _) = Device::boot(Duration::ZERO);
        device.tick(tones::duration(tones::BOOT) - Duration::from_millis(1));
        assert_eq!(device.state(), S::Booting);
        device.tick(tones::duration(tones::BOOT));
        assert_eq!(device.state(), S::Waiting);
    }
}
