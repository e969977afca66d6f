// PetPal — Board Outputs (status LED, power)

use esp_idf_hal::gpio::{Gpio10, Output, PinDriver};

use petpal::config::*;
use petpal::error::{HardwareError, HwResult};
use petpal::hal::{Led, PowerControl};

pub struct StatusLed {
    pin: PinDriver<'static, Gpio10, Output>,
}

impl StatusLed {
    pub fn new(pin: PinDriver<'static, Gpio10, Output>) -> Self {
        Self { pin }
    }
}

impl Led for StatusLed {
    fn set(&mut self, on: bool) -> HwResult<()> {
        let result = if on { self.pin.set_high() } else { self.pin.set_low() };
        result.map_err(|e| HardwareError::Pin {
            pin: PIN_LED,
            reason: e.to_string(),
        })
    }
}

/// Deep sleep with wake on the power button; the closest thing this board
/// has to switching itself off.
pub struct DeepSleep;

impl PowerControl for DeepSleep {
    fn power_off(&mut self) -> HwResult<()> {
        log::info!("Entering deep sleep: wake on power button (GPIO{})", PIN_POWER_BUTTON);
        unsafe {
            let ret = esp_idf_sys::esp_deep_sleep_enable_gpio_wakeup(
                1u64 << PIN_POWER_BUTTON,
                esp_idf_sys::esp_deepsleep_gpio_wake_up_mode_t_ESP_GPIO_WAKEUP_GPIO_LOW,
            );
            if ret != esp_idf_sys::ESP_OK {
                return Err(HardwareError::Power(format!("wakeup config failed ({})", ret)));
            }
            esp_idf_sys::esp_deep_sleep_start();
        }
        // Never reached on hardware.
        Ok(())
    }
}
