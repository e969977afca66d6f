// PetPal — Button Input
//
// Two halves: `EdgeDetector` runs on the button task and turns polled pin
// levels into timestamped edges; `ButtonDebouncer` runs on the control task
// and classifies each press on release by comparing the release time with
// the recorded press time.

use std::time::Duration;

use crate::config::*;
use crate::events::{Button, ButtonEvent, Edge, PressKind};

// ---------------------------------------------------------------------------
// Pin level → edge
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct EdgeDetector {
    button: Button,
    last_raw: bool,
    changed_at: Duration,
    stable: bool,
}

impl EdgeDetector {
    pub fn new(button: Button) -> Self {
        Self {
            button,
            last_raw: false,
            changed_at: Duration::ZERO,
            stable: false,
        }
    }

    /// Call every `BUTTON_POLL_MS`. `pressed` is the already-inverted pin
    /// level (active LOW on the board). A level counts only once it has held
    /// for `DEBOUNCE_MS`; the edge is stamped with the time it settled from.
    pub fn update(&mut self, pressed: bool, now: Duration) -> Option<ButtonEvent> {
        // ---- debounce filter ----
        if pressed != self.last_raw {
            self.last_raw = pressed;
            self.changed_at = now;
        }
        if pressed == self.stable
            || now.saturating_sub(self.changed_at) < Duration::from_millis(DEBOUNCE_MS)
        {
            return None;
        }

        self.stable = pressed;
        Some(ButtonEvent {
            button: self.button,
            edge: if pressed { Edge::Pressed } else { Edge::Released },
            at: self.changed_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Edge → short / long press
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct PressTimer {
    pressed_at: Option<Duration>,
}

impl PressTimer {
    fn on_edge(&mut self, edge: Edge, at: Duration) -> Option<PressKind> {
        match edge {
            Edge::Pressed => {
                self.pressed_at = Some(at);
                None
            }
            Edge::Released => {
                let pressed_at = self.pressed_at.take()?;
                classify_hold(pressed_at, at)
            }
        }
    }
}

/// Presses that began within the first second after boot are power-on
/// transients; only a press starting strictly after it counts.
fn classify_hold(pressed_at: Duration, released_at: Duration) -> Option<PressKind> {
    if pressed_at <= Duration::from_millis(BOOT_GUARD_MS) {
        return None;
    }
    let held = released_at.saturating_sub(pressed_at);
    if held >= Duration::from_millis(LONG_PRESS_MS) {
        Some(PressKind::Long)
    } else {
        Some(PressKind::Short)
    }
}

/// Owns the press timestamp of both buttons.
#[derive(Debug, Default)]
pub struct ButtonDebouncer {
    secondary: PressTimer,
    power: PressTimer,
}

impl ButtonDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_event(&mut self, event: ButtonEvent) -> Option<PressKind> {
        let timer = match event.button {
            Button::Secondary => &mut self.secondary,
            Button::Power => &mut self.power,
        };
        let kind = timer.on_edge(event.edge, event.at);
        if kind.is_none() && event.edge == Edge::Released {
            log::debug!("{:?} release at {:?} ignored", event.button, event.at);
        }
        kind
    }
}
