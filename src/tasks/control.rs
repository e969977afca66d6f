// PetPal — Control Task
//
// Sole owner of the device runtime. Drains the input channel with a short
// timeout so tone playback and inbound radio are serviced between inputs.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use petpal::config::*;
use petpal::events::Input;
use petpal::hal::{Buzzer, Led, PowerControl, Transport};
use petpal::runtime::Runtime;

pub fn control_task<B, L, T, P>(mut runtime: Runtime<B, L, T, P>, input_rx: Receiver<Input>)
where
    B: Buzzer,
    L: Led,
    T: Transport,
    P: PowerControl,
{
    log::info!("Control task started");

    let poll = Duration::from_millis(CONTROL_POLL_MS);

    loop {
        match input_rx.recv_timeout(poll) {
            Ok(input) => {
                if let Err(e) = runtime.handle(input, crate::since_boot()) {
                    super::fatal("control", e);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log::warn!("All input senders dropped: exiting control task");
                return;
            }
        }

        if let Err(e) = runtime.tick(crate::since_boot()) {
            super::fatal("control", e);
        }
    }
}
