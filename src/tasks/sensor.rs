// PetPal — Sensor Task
//
// Reads the IMU every 100 ms (and the light sensor once per second) and
// forwards the readings to the control task.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use petpal::config::*;
use petpal::events::Input;
use petpal::hal::{LightSensor, MotionSensor};
use petpal::sampler::SensorSampler;

pub fn sensor_task<M, S>(mut sampler: SensorSampler<M, S>, input_tx: Sender<Input>)
where
    M: MotionSensor,
    S: LightSensor,
{
    log::info!("Sensor task started");

    let interval = Duration::from_millis(MOTION_TICK_MS);

    loop {
        let tick_start = Instant::now();

        let inputs = match sampler.poll(crate::since_boot()) {
            Ok(inputs) => inputs,
            Err(e) => super::fatal("sensor", e),
        };
        for input in inputs {
            if input_tx.send(input).is_err() {
                // Receiver dropped: control task has exited.
                log::warn!("Input channel closed: exiting sensor task");
                return;
            }
        }

        // Sleep for the remainder of the tick to hold 10 Hz.
        let elapsed = tick_start.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
}
