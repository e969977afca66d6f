// PetPal — OPT3001 Ambient Light Driver

use petpal::config::*;
use petpal::error::{HardwareError, HwResult};
use petpal::hal::LightSensor;

use super::imu::SharedBus;

const REG_RESULT: u8 = 0x00;
const REG_CONFIG: u8 = 0x01;
// Auto full-scale, 800 ms conversion, continuous mode.
const CONFIG_CONTINUOUS: u16 = 0xCC10;

const DEVICE: &str = "OPT3001";

pub struct Opt3001 {
    bus: SharedBus,
}

impl Opt3001 {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }

    pub fn init(&self) -> HwResult<()> {
        let [hi, lo] = CONFIG_CONTINUOUS.to_be_bytes();
        let mut bus = self
            .bus
            .lock()
            .map_err(|_| HardwareError::sensor(DEVICE, "bus mutex poisoned"))?;
        bus.write(I2C_ADDR_OPT3001, &[REG_CONFIG, hi, lo], I2C_TIMEOUT_TICKS)
            .map_err(|e| HardwareError::sensor(DEVICE, e))?;
        log::info!("OPT3001 initialised (continuous, auto-range)");
        Ok(())
    }
}

/// Result register: 4-bit exponent, 12-bit mantissa, 0.01 lux LSB.
fn to_lux(raw: u16) -> f32 {
    let exponent = raw >> 12;
    let mantissa = raw & 0x0FFF;
    0.01 * f32::from(1u16 << exponent) * f32::from(mantissa)
}

impl LightSensor for Opt3001 {
    fn read_lux(&mut self) -> HwResult<f32> {
        let mut raw = [0u8; 2];
        let mut bus = self
            .bus
            .lock()
            .map_err(|_| HardwareError::sensor(DEVICE, "bus mutex poisoned"))?;
        bus.write_read(I2C_ADDR_OPT3001, &[REG_RESULT], &mut raw, I2C_TIMEOUT_TICKS)
            .map_err(|e| HardwareError::sensor(DEVICE, e))?;
        Ok(to_lux(u16::from_be_bytes(raw)))
    }
}
