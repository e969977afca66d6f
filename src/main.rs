// PetPal — Firmware Entry Point
//
// Boot sequence (ESP32):
//   1. Bring up the I2C bus, power the IMU and light sensor.
//   2. Open buttons, status LED, buzzer and the radio UART.
//   3. Start the control runtime (plays the boot tune).
//   4. Spawn sensor, button and control tasks.
//
// On any other target the binary is a host simulator that replays a short
// scripted day in the life of the pet through the same runtime.

#[cfg(target_os = "espidf")]
mod drivers;
#[cfg(target_os = "espidf")]
mod tasks;

// ---------------------------------------------------------------------------
// Utility: time since boot
// ---------------------------------------------------------------------------
#[cfg(target_os = "espidf")]
pub fn since_boot() -> std::time::Duration {
    let us = unsafe { esp_idf_sys::esp_timer_get_time() };
    std::time::Duration::from_micros(us.max(0) as u64)
}

// ---------------------------------------------------------------------------
// Main (firmware)
// ---------------------------------------------------------------------------
#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::sync::{mpsc, Mutex};
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::gpio::{AnyIOPin, PinDriver, Pull};
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;

    use petpal::config::*;
    use petpal::runtime::{Outputs, Runtime};
    use petpal::sampler::SensorSampler;

    use crate::drivers::board::{DeepSleep, StatusLed};
    use crate::drivers::buzzer::PwmBuzzer;
    use crate::drivers::imu::Mpu9250;
    use crate::drivers::light::Opt3001;
    use crate::drivers::radio::UartRadio;

    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("PetPal firmware starting…");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;

    // ---- I2C bus (shared between IMU and light sensor) --------------------
    let i2c_config = I2cConfig::new().baudrate(400u32.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio6, // SDA
        peripherals.pins.gpio7, // SCL
        &i2c_config,
    )?;
    // The bus lives for the whole programme; firmware never exits.
    let i2c_bus: &'static Mutex<I2cDriver<'static>> = Box::leak(Box::new(Mutex::new(i2c)));

    let imu = Mpu9250::new(i2c_bus);
    thread::sleep(Duration::from_millis(SENSOR_POWER_UP_MS));
    imu.init()?;

    let light = Opt3001::new(i2c_bus);
    thread::sleep(Duration::from_millis(SENSOR_POWER_UP_MS));
    light.init()?;

    // ---- Buttons (pull-up, active LOW) ------------------------------------
    let mut button = PinDriver::input(peripherals.pins.gpio3)?;
    button.set_pull(Pull::Up)?;
    let mut power_button = PinDriver::input(peripherals.pins.gpio5)?;
    power_button.set_pull(Pull::Up)?;

    // ---- Outputs ----------------------------------------------------------
    let led = StatusLed::new(PinDriver::output(peripherals.pins.gpio10)?);
    let buzzer = PwmBuzzer::new(
        peripherals.ledc.timer0,
        peripherals.ledc.channel0,
        peripherals.pins.gpio4,
    )?;
    let radio = UartRadio::new(
        peripherals.uart1,
        peripherals.pins.gpio21, // TX
        peripherals.pins.gpio20, // RX
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
    )?;

    let runtime = Runtime::start(
        Outputs {
            buzzer,
            led,
            transport: radio,
            power: DeepSleep,
        },
        since_boot(),
    )?;

    // ---- Channel ----------------------------------------------------------
    let (input_tx, input_rx) = mpsc::channel();

    // ---- Spawn tasks (map to FreeRTOS tasks via std::thread) ---------------

    // Sensor task: 100 ms IMU tick, 1 Hz light.
    let sampler = SensorSampler::new(imu, light);
    let sensor_tx = input_tx.clone();
    thread::Builder::new()
        .name("sensor".into())
        .stack_size(STACK_SENSOR)
        .spawn(move || {
            tasks::sensor::sensor_task(sampler, sensor_tx);
        })?;

    // Button task: pin poll → timestamped edges.
    thread::Builder::new()
        .name("button".into())
        .stack_size(STACK_BUTTON)
        .spawn(move || {
            tasks::button::button_task(button, power_button, input_tx);
        })?;

    // Control task: sole owner of device state.
    thread::Builder::new()
        .name("control".into())
        .stack_size(STACK_CONTROL)
        .spawn(move || {
            tasks::control::control_task(runtime, input_rx);
        })?;

    // Main thread has nothing left to do: park it forever.
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

// ---------------------------------------------------------------------------
// Main (host simulator)
// ---------------------------------------------------------------------------
#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    use std::time::Duration;

    use petpal::events::Button;
    use petpal::sim::{self, Simulator};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("PetPal host simulator");

    let mut sim = Simulator::new()?;
    sim.run_for(Duration::from_secs(2))?;

    // Pick the second food, start streaming, then feed.
    sim.press(Button::Secondary, Duration::from_millis(500))?;
    sim.run_for(Duration::from_millis(500))?;
    sim.press(Button::Power, Duration::from_millis(500))?;
    sim.run_for(Duration::from_millis(500))?;
    sim.press(Button::Secondary, Duration::from_millis(2500))?;

    // A workout, then some petting.
    sim.motion().set_script(sim::vertical_pump(5.0));
    sim.run_for(Duration::from_secs(7))?;
    sim.motion().set_script(sim::horizontal_stroke(3.0));
    sim.run_for(Duration::from_secs(7))?;
    sim.motion().set_script(|_| sim::resting());

    // The server complains; then the lights go out.
    sim.receive("301,BEEP:Feed me!");
    sim.run_for(Duration::from_secs(2))?;
    sim.set_lux(0.5);
    sim.run_for(Duration::from_secs(14))?;

    sim.press(Button::Power, Duration::from_millis(500))?;
    sim.run_for(Duration::from_secs(1))?;
    sim.press(Button::Power, Duration::from_millis(2500))?;
    sim.run_for(Duration::from_secs(3))?;

    log::info!(
        "Finished at {:?}: state {:?}, {} messages sent, {} buzzer commands, powered off: {}",
        sim.now(),
        sim.runtime().device().state(),
        sim.sent().len(),
        sim.buzzer_log().len(),
        sim.runtime().is_powered_off()
    );
    Ok(())
}
