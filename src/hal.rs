// PetPal — Hardware Collaborator Interfaces
//
// The core never touches a peripheral directly. Firmware drivers implement
// these on the ESP32; `sim` implements them for the host.

use crate::error::HwResult;
use crate::events::MotionReading;

pub trait MotionSensor {
    fn read(&mut self) -> HwResult<MotionReading>;
}

pub trait LightSensor {
    /// Ambient light in lux.
    fn read_lux(&mut self) -> HwResult<f32>;
}

pub trait Buzzer {
    fn start(&mut self, freq_hz: u32) -> HwResult<()>;
    fn stop(&mut self) -> HwResult<()>;
}

pub trait Led {
    fn set(&mut self, on: bool) -> HwResult<()>;
}

pub trait Transport {
    fn send(&mut self, message: &str) -> HwResult<()>;
    /// Next complete inbound payload, if one has arrived. Never blocks.
    fn poll_inbound(&mut self) -> HwResult<Option<String>>;
}

pub trait PowerControl {
    /// Cut power. On hardware this does not come back.
    fn power_off(&mut self) -> HwResult<()>;
}
