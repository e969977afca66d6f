// PetPal — Host Simulator
//
// Simulated collaborators and a virtual-time driver, used by the host build
// of the binary and by the integration tests. Time advances in 10 ms ticks:
// button pins are polled every tick and the sensors every 100 ms, as the
// firmware tasks do.

use std::collections::VecDeque;
use std::time::Duration;

use crate::button::EdgeDetector;
use crate::config::*;
use crate::device::DeviceState;
use crate::error::{HardwareError, HwResult};
use crate::events::{Button, BuzzerCommand, Input, MotionReading};
use crate::hal::{Buzzer, Led, LightSensor, MotionSensor, PowerControl, Transport};
use crate::runtime::{Outputs, Runtime};
use crate::sampler::SensorSampler;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SimBuzzer {
    pub log: Vec<BuzzerCommand>,
}

impl Buzzer for SimBuzzer {
    fn start(&mut self, freq_hz: u32) -> HwResult<()> {
        self.log.push(BuzzerCommand::Start(freq_hz));
        Ok(())
    }

    fn stop(&mut self) -> HwResult<()> {
        self.log.push(BuzzerCommand::Stop);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SimLed {
    pub on: bool,
}

impl Led for SimLed {
    fn set(&mut self, on: bool) -> HwResult<()> {
        self.on = on;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SimTransport {
    pub sent: Vec<String>,
    pub inbound: VecDeque<String>,
}

impl Transport for SimTransport {
    fn send(&mut self, message: &str) -> HwResult<()> {
        log::info!("radio > {}", message);
        self.sent.push(message.to_string());
        Ok(())
    }

    fn poll_inbound(&mut self) -> HwResult<Option<String>> {
        Ok(self.inbound.pop_front())
    }
}

#[derive(Debug, Default)]
pub struct SimPower {
    pub off: bool,
}

impl PowerControl for SimPower {
    fn power_off(&mut self) -> HwResult<()> {
        self.off = true;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

type MotionScript = Box<dyn FnMut(usize) -> MotionReading + Send>;

/// Motion sensor driven by a function of the sample index.
pub struct ScriptedMotion {
    index: usize,
    script: MotionScript,
    failing: bool,
}

impl ScriptedMotion {
    pub fn new(script: impl FnMut(usize) -> MotionReading + Send + 'static) -> Self {
        Self {
            index: 0,
            script: Box::new(script),
            failing: false,
        }
    }

    /// Device resting flat: 1 g on Z.
    pub fn still() -> Self {
        Self::new(|_| resting())
    }

    /// Replace the script; the sample index restarts at zero.
    pub fn set_script(&mut self, script: impl FnMut(usize) -> MotionReading + Send + 'static) {
        self.index = 0;
        self.script = Box::new(script);
    }

    pub fn fail(&mut self) {
        self.failing = true;
    }
}

impl MotionSensor for ScriptedMotion {
    fn read(&mut self) -> HwResult<MotionReading> {
        if self.failing {
            return Err(HardwareError::sensor("MPU9250", "simulated bus fault"));
        }
        let reading = (self.script)(self.index);
        self.index += 1;
        Ok(reading)
    }
}

pub fn resting() -> MotionReading {
    MotionReading {
        az: 1.0,
        ..MotionReading::default()
    }
}

/// Up-and-down pumping: Z ramps by `step` per sample, reversing every 10.
pub fn vertical_pump(step: f32) -> impl FnMut(usize) -> MotionReading + Send {
    move |i| MotionReading {
        az: 1.0 + triangle(i, 10) * step,
        ..MotionReading::default()
    }
}

/// Side-to-side stroking: X ramps by `step` per sample, Z stays put.
pub fn horizontal_stroke(step: f32) -> impl FnMut(usize) -> MotionReading + Send {
    move |i| MotionReading {
        ax: triangle(i, 10) * step,
        az: 1.0,
        ..MotionReading::default()
    }
}

fn triangle(i: usize, half_period: usize) -> f32 {
    let phase = i % (2 * half_period);
    if phase < half_period {
        phase as f32
    } else {
        (2 * half_period - phase) as f32
    }
}

#[derive(Debug)]
pub struct SimLight {
    pub lux: f32,
}

impl LightSensor for SimLight {
    fn read_lux(&mut self) -> HwResult<f32> {
        Ok(self.lux)
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

pub type SimRuntime = Runtime<SimBuzzer, SimLed, SimTransport, SimPower>;

pub struct Simulator {
    runtime: SimRuntime,
    sampler: SensorSampler<ScriptedMotion, SimLight>,
    buttons: [EdgeDetector; 2],
    /// Raw pin levels (true = held down).
    pins: [bool; 2],
    now: Duration,
    history: Vec<DeviceState>,
}

const STEP: Duration = Duration::from_millis(CONTROL_POLL_MS);

impl Simulator {
    /// Power on at t = 0 in a bright room with the device at rest.
    pub fn new() -> HwResult<Self> {
        let outputs = Outputs {
            buzzer: SimBuzzer::default(),
            led: SimLed::default(),
            transport: SimTransport::default(),
            power: SimPower::default(),
        };
        Ok(Self {
            runtime: Runtime::start(outputs, Duration::ZERO)?,
            sampler: SensorSampler::new(ScriptedMotion::still(), SimLight { lux: 300.0 }),
            buttons: [
                EdgeDetector::new(Button::Secondary),
                EdgeDetector::new(Button::Power),
            ],
            pins: [false; 2],
            now: Duration::ZERO,
            history: vec![DeviceState::Booting],
        })
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Every state the device has been in, in order, without repeats.
    pub fn history(&self) -> &[DeviceState] {
        &self.history
    }

    pub fn state(&self) -> DeviceState {
        self.runtime.device().state()
    }

    pub fn runtime(&self) -> &SimRuntime {
        &self.runtime
    }

    pub fn sent(&self) -> &[String] {
        &self.runtime.outputs().transport.sent
    }

    pub fn buzzer_log(&self) -> &[BuzzerCommand] {
        &self.runtime.outputs().buzzer.log
    }

    pub fn led(&self) -> bool {
        self.runtime.outputs().led.on
    }

    pub fn motion(&mut self) -> &mut ScriptedMotion {
        self.sampler.motion_mut()
    }

    pub fn set_lux(&mut self, lux: f32) {
        self.sampler.light_mut().lux = lux;
    }

    pub fn receive(&mut self, payload: &str) {
        self.runtime
            .outputs_mut()
            .transport
            .inbound
            .push_back(payload.to_string());
    }

    /// One 10 ms control tick, with a sensor poll on every 100 ms boundary.
    pub fn step(&mut self) -> HwResult<()> {
        self.now += STEP;
        if self.now.as_millis() % u128::from(MOTION_TICK_MS) == 0 {
            for input in self.sampler.poll(self.now)? {
                self.runtime.handle(input, self.now)?;
                self.record();
            }
        }
        self.poll_buttons()?;
        self.runtime.tick(self.now)?;
        self.record();
        Ok(())
    }

    fn record(&mut self) {
        let state = self.state();
        if self.history.last() != Some(&state) {
            self.history.push(state);
        }
    }

    pub fn run_for(&mut self, duration: Duration) -> HwResult<()> {
        let until = self.now + duration;
        while self.now < until && !self.runtime.is_powered_off() {
            self.step()?;
        }
        Ok(())
    }

    pub fn run_until_waiting(&mut self, limit: Duration) -> HwResult<()> {
        let until = self.now + limit;
        while self.state() != DeviceState::Waiting && self.now < until {
            self.step()?;
        }
        Ok(())
    }

    /// Hold `button` down for `hold` of simulated time, then release it and
    /// wait out the debounce so the release has been handled on return.
    pub fn press(&mut self, button: Button, hold: Duration) -> HwResult<()> {
        self.set_pin(button, true)?;
        self.run_for(hold)?;
        self.set_pin(button, false)?;
        self.run_for(Duration::from_millis(DEBOUNCE_MS))
    }

    /// Drive the raw pin level; it is sampled now and on every later tick.
    pub fn set_pin(&mut self, button: Button, pressed: bool) -> HwResult<()> {
        self.pins[pin_index(button)] = pressed;
        self.poll_buttons()
    }

    fn poll_buttons(&mut self) -> HwResult<()> {
        for i in 0..self.buttons.len() {
            if let Some(event) = self.buttons[i].update(self.pins[i], self.now) {
                self.runtime.handle(Input::Button(event), self.now)?;
                self.record();
            }
        }
        Ok(())
    }
}

fn pin_index(button: Button) -> usize {
    match button {
        Button::Secondary => 0,
        Button::Power => 1,
    }
}
