// PetPal — Button Task
//
// Polls both buttons at 100 Hz and posts each debounced edge, stamped with
// the time since boot, to the control task. Classification happens there.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::{Gpio3, Gpio5, Input as PinInput, PinDriver};

use petpal::button::EdgeDetector;
use petpal::config::*;
use petpal::events::{Button, Input};

pub fn button_task(
    button: PinDriver<'static, Gpio3, PinInput>,
    power_button: PinDriver<'static, Gpio5, PinInput>,
    input_tx: Sender<Input>,
) {
    log::info!("Button task started");

    let mut secondary = EdgeDetector::new(Button::Secondary);
    let mut power = EdgeDetector::new(Button::Power);
    let poll_interval = Duration::from_millis(BUTTON_POLL_MS);

    loop {
        let now = crate::since_boot();
        // Active LOW with pull-up.
        let edges = [
            secondary.update(button.is_low(), now),
            power.update(power_button.is_low(), now),
        ];

        for event in edges.into_iter().flatten() {
            if input_tx.send(Input::Button(event)).is_err() {
                log::warn!("Input channel closed: exiting button task");
                return;
            }
        }

        thread::sleep(poll_interval);
    }
}
