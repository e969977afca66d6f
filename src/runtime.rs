// PetPal — Control Runtime
//
// Owns the device context and the output collaborators. Every input from
// the other tasks arrives here through one channel, so device state has a
// single writer.

use std::time::Duration;

use crate::device::Device;
use crate::error::HwResult;
use crate::events::{BuzzerCommand, Effect, Input};
use crate::hal::{Buzzer, Led, PowerControl, Transport};

pub struct Outputs<B, L, T, P> {
    pub buzzer: B,
    pub led: L,
    pub transport: T,
    pub power: P,
}

pub struct Runtime<B, L, T, P> {
    device: Device,
    outputs: Outputs<B, L, T, P>,
    powered_off: bool,
}

impl<B, L, T, P> Runtime<B, L, T, P>
where
    B: Buzzer,
    L: Led,
    T: Transport,
    P: PowerControl,
{
    /// Boot the device and start the boot tune.
    pub fn start(outputs: Outputs<B, L, T, P>, now: Duration) -> HwResult<Self> {
        let (device, effects) = Device::boot(now);
        let mut runtime = Self {
            device,
            outputs,
            powered_off: false,
        };
        runtime.outputs.led.set(false)?;
        runtime.apply(effects)?;
        Ok(runtime)
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn outputs(&self) -> &Outputs<B, L, T, P> {
        &self.outputs
    }

    pub fn outputs_mut(&mut self) -> &mut Outputs<B, L, T, P> {
        &mut self.outputs
    }

    pub fn is_powered_off(&self) -> bool {
        self.powered_off
    }

    pub fn handle(&mut self, input: Input, now: Duration) -> HwResult<()> {
        let effects = self.device.handle(input, now);
        self.apply(effects)
    }

    /// Advance tone playback and pick up any inbound radio payload.
    pub fn tick(&mut self, now: Duration) -> HwResult<()> {
        let effects = self.device.tick(now);
        self.apply(effects)?;

        while let Some(payload) = self.outputs.transport.poll_inbound()? {
            log::debug!("Inbound: {}", payload);
            self.handle(Input::Inbound(payload), now)?;
        }
        Ok(())
    }

    fn apply(&mut self, effects: Vec<Effect>) -> HwResult<()> {
        for effect in effects {
            match effect {
                Effect::Buzzer(BuzzerCommand::Start(freq)) => self.outputs.buzzer.start(freq)?,
                Effect::Buzzer(BuzzerCommand::Stop) => self.outputs.buzzer.stop()?,
                Effect::Led(on) => self.outputs.led.set(on)?,
                Effect::Send(message) => {
                    let line = message.encode();
                    log::debug!("Send: {}", line);
                    self.outputs.transport.send(&line)?;
                }
                Effect::PowerOff => {
                    log::info!("Powering off");
                    self.powered_off = true;
                    self.outputs.power.power_off()?;
                }
            }
        }
        Ok(())
    }
}
