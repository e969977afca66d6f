// PetPal — Hardware Error Types
//
// Any of these reaching a task boundary is fatal: the task logs it and the
// device aborts. Nothing is retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HardwareError {
    #[error("sensor bus error on {device}: {reason}")]
    SensorBus { device: &'static str, reason: String },

    #[error("pin {pin} configuration failed: {reason}")]
    Pin { pin: i32, reason: String },

    #[error("buzzer error: {0}")]
    Buzzer(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("power control error: {0}")]
    Power(String),
}

impl HardwareError {
    pub fn sensor(device: &'static str, reason: impl ToString) -> Self {
        Self::SensorBus {
            device,
            reason: reason.to_string(),
        }
    }
}

pub type HwResult<T> = Result<T, HardwareError>;
