pub mod button;
pub mod control;
pub mod sensor;

/// Hardware failures are not recovered from: report on the debug channel and
/// stop the device.
pub fn fatal(task: &str, err: impl std::fmt::Display) -> ! {
    log::error!("{} task: fatal hardware error: {}", task, err);
    std::process::abort()
}
