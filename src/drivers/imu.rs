// PetPal — MPU9250 IMU Driver
//
// Register-level driver over the shared I2C bus. Only the accelerometer and
// gyroscope are used; the magnetometer stays off.

use std::sync::Mutex;

use esp_idf_hal::i2c::I2cDriver;

use petpal::config::*;
use petpal::error::{HardwareError, HwResult};
use petpal::events::MotionReading;
use petpal::hal::MotionSensor;

/// Thread-safe handle to a shared I2C bus.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

// MPU9250 register addresses
const REG_SMPLRT_DIV: u8 = 0x19;
const REG_CONFIG: u8 = 0x1A;
const REG_GYRO_CONFIG: u8 = 0x1B;
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_ACCEL_XOUT_H: u8 = 0x3B; // Start of 14-byte sensor burst
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_WHO_AM_I: u8 = 0x75;
const WHO_AM_I_EXPECTED: u8 = 0x71;

const DEVICE: &str = "MPU9250";

pub struct Mpu9250 {
    bus: SharedBus,
}

impl Mpu9250 {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }

    fn write(&self, reg: u8, value: u8) -> HwResult<()> {
        let mut bus = self
            .bus
            .lock()
            .map_err(|_| HardwareError::sensor(DEVICE, "bus mutex poisoned"))?;
        bus.write(I2C_ADDR_MPU9250, &[reg, value], I2C_TIMEOUT_TICKS)
            .map_err(|e| HardwareError::sensor(DEVICE, e))
    }

    fn read_regs(&self, reg: u8, buf: &mut [u8]) -> HwResult<()> {
        let mut bus = self
            .bus
            .lock()
            .map_err(|_| HardwareError::sensor(DEVICE, "bus mutex poisoned"))?;
        bus.write_read(I2C_ADDR_MPU9250, &[reg], buf, I2C_TIMEOUT_TICKS)
            .map_err(|e| HardwareError::sensor(DEVICE, e))
    }

    /// Wake the sensor and configure accel (±2 g), gyro (±250 °/s), DLPF 41 Hz.
    pub fn init(&self) -> HwResult<()> {
        let mut who = [0u8; 1];
        self.read_regs(REG_WHO_AM_I, &mut who)?;
        if who[0] != WHO_AM_I_EXPECTED {
            return Err(HardwareError::sensor(
                DEVICE,
                format!("unexpected WHO_AM_I 0x{:02X}", who[0]),
            ));
        }

        // Wake up, PLL clock source
        self.write(REG_PWR_MGMT_1, 0x01)?;
        // DLPF bandwidth 41 Hz
        self.write(REG_CONFIG, 0x03)?;
        // 1 kHz / (1 + 9) = 100 Hz internal rate
        self.write(REG_SMPLRT_DIV, 0x09)?;
        self.write(REG_GYRO_CONFIG, 0x00)?;
        self.write(REG_ACCEL_CONFIG, 0x00)?;

        log::info!("MPU9250 initialised (±2g, ±250°/s, DLPF 41Hz)");
        Ok(())
    }
}

impl MotionSensor for Mpu9250 {
    /// Burst-read all 6 axes and convert to physical units.
    fn read(&mut self) -> HwResult<MotionReading> {
        let mut raw = [0u8; 14];
        self.read_regs(REG_ACCEL_XOUT_H, &mut raw)?;

        let axis = |i: usize| i16::from_be_bytes([raw[i], raw[i + 1]]) as f32;
        Ok(MotionReading {
            ax: axis(0) / ACCEL_SCALE_2G,
            ay: axis(2) / ACCEL_SCALE_2G,
            az: axis(4) / ACCEL_SCALE_2G,
            // raw[6..8] = temperature: skipped
            gx: axis(8) / GYRO_SCALE_250,
            gy: axis(10) / GYRO_SCALE_250,
            gz: axis(12) / GYRO_SCALE_250,
        })
    }
}
