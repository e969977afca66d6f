// PetPal — Passive Buzzer Driver
//
// LEDC PWM at 50 % duty. The note frequency is changed on the running timer
// through the raw ESP-IDF call, so one timer/channel pair serves every tone.

use esp_idf_hal::gpio::Gpio4;
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, CHANNEL0, TIMER0};
use esp_idf_hal::prelude::*;

use petpal::error::{HardwareError, HwResult};
use petpal::hal::Buzzer;

pub struct PwmBuzzer {
    channel: LedcDriver<'static>,
}

fn buzzer_err(e: impl ToString) -> HardwareError {
    HardwareError::Buzzer(e.to_string())
}

impl PwmBuzzer {
    pub fn new(timer: TIMER0, channel: CHANNEL0, pin: Gpio4) -> HwResult<Self> {
        let timer = LedcTimerDriver::new(timer, &TimerConfig::new().frequency(1.kHz().into()))
            .map_err(buzzer_err)?;
        let mut channel = LedcDriver::new(channel, timer, pin).map_err(buzzer_err)?;
        channel.set_duty(0).map_err(buzzer_err)?;
        Ok(Self { channel })
    }
}

impl Buzzer for PwmBuzzer {
    fn start(&mut self, freq_hz: u32) -> HwResult<()> {
        let ret = unsafe {
            esp_idf_sys::ledc_set_freq(
                esp_idf_sys::ledc_mode_t_LEDC_LOW_SPEED_MODE,
                esp_idf_sys::ledc_timer_t_LEDC_TIMER_0,
                freq_hz,
            )
        };
        if ret != esp_idf_sys::ESP_OK {
            return Err(HardwareError::Buzzer(format!("ledc_set_freq({}) failed ({})", freq_hz, ret)));
        }
        let half = self.channel.get_max_duty() / 2;
        self.channel.set_duty(half).map_err(buzzer_err)
    }

    fn stop(&mut self) -> HwResult<()> {
        self.channel.set_duty(0).map_err(buzzer_err)
    }
}
