// PetPal — Sensor Sampler
//
// One call per 100 ms motion tick. The light sensor is read only on the
// first tick of each whole second.

use std::time::Duration;

use crate::error::HwResult;
use crate::events::Input;
use crate::hal::{LightSensor, MotionSensor};
use crate::light::SecondGate;

pub struct SensorSampler<M, S> {
    motion: M,
    light: S,
    gate: SecondGate,
}

impl<M: MotionSensor, S: LightSensor> SensorSampler<M, S> {
    pub fn new(motion: M, light: S) -> Self {
        Self {
            motion,
            light,
            gate: SecondGate::new(),
        }
    }

    pub fn poll(&mut self, now: Duration) -> HwResult<Vec<Input>> {
        let mut inputs = vec![Input::Motion(self.motion.read()?)];
        if self.gate.admit(now) {
            inputs.push(Input::Light(self.light.read_lux()?));
        }
        Ok(inputs)
    }

    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }

    pub fn light_mut(&mut self) -> &mut S {
        &mut self.light
    }
}
