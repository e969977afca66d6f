// PetPal — Radio Transport over UART
//
// The radio module is a transparent serial bridge: one message per line in
// each direction. Framing beyond the newline is the module's business.

use esp_idf_hal::delay::NON_BLOCK;
use esp_idf_hal::gpio::{AnyIOPin, Gpio20, Gpio21};
use esp_idf_hal::uart::{config::Config, UartDriver, UART1};
use esp_idf_hal::units::Hertz;

use petpal::config::*;
use petpal::error::{HardwareError, HwResult};
use petpal::hal::Transport;

pub struct UartRadio {
    uart: UartDriver<'static>,
    line: Vec<u8>,
}

fn radio_err(e: impl ToString) -> HardwareError {
    HardwareError::Transport(e.to_string())
}

impl UartRadio {
    pub fn new(
        uart: UART1,
        tx: Gpio21,
        rx: Gpio20,
        cts: Option<AnyIOPin>,
        rts: Option<AnyIOPin>,
    ) -> HwResult<Self> {
        let config = Config::new().baudrate(Hertz(RADIO_BAUD));
        let uart = UartDriver::new(uart, tx, rx, cts, rts, &config).map_err(radio_err)?;
        log::info!("Radio UART open at {} baud", RADIO_BAUD);
        Ok(Self {
            uart,
            line: Vec::with_capacity(RADIO_LINE_MAX),
        })
    }
}

impl Transport for UartRadio {
    fn send(&mut self, message: &str) -> HwResult<()> {
        self.uart.write(message.as_bytes()).map_err(radio_err)?;
        self.uart.write(b"\n").map_err(radio_err)?;
        Ok(())
    }

    fn poll_inbound(&mut self) -> HwResult<Option<String>> {
        let mut byte = [0u8; 1];
        while self.uart.read(&mut byte, NON_BLOCK).map_err(radio_err)? == 1 {
            match byte[0] {
                b'\n' | b'\r' if self.line.is_empty() => {}
                b'\n' | b'\r' => {
                    let payload = String::from_utf8_lossy(&self.line).into_owned();
                    self.line.clear();
                    return Ok(Some(payload));
                }
                b if self.line.len() < RADIO_LINE_MAX => self.line.push(b),
                _ => log::warn!("Inbound line over {} bytes, truncating", RADIO_LINE_MAX),
            }
        }
        Ok(None)
    }
}
