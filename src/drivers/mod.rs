pub mod board;
pub mod buzzer;
pub mod imu;
pub mod light;
pub mod radio;
