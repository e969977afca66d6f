// PetPal — Motion-Reactive Virtual Pet Firmware Core
//
// Platform-independent part of the firmware: the motion signal pipeline and
// classifier, ambient light monitor, button debouncing, device/session state
// machine, tone sequencing and telemetry codec. Hardware sits behind the
// traits in `hal`; the ESP32 implementations live in the binary.

pub mod button;
pub mod codec;
pub mod config;
pub mod device;
pub mod error;
pub mod events;
pub mod hal;
pub mod light;
pub mod motion;
pub mod runtime;
pub mod sampler;
pub mod session;
#[cfg(not(target_os = "espidf"))]
pub mod sim;
pub mod tones;

pub use device::{Device, DeviceState};
pub use error::{HardwareError, HwResult};
pub use events::{Effect, Input};
pub use runtime::{Outputs, Runtime};
