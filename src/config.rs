// PetPal — Hardware & System Configuration
// Target: Xiao ESP32-C3 (RISC-V) with 9-axis IMU + ambient light sensor

// ---------------------------------------------------------------------------
// GPIO Pin Definitions
// ---------------------------------------------------------------------------
pub const PIN_BUTTON: i32 = 3;       // D1: Secondary (food) button, active LOW
pub const PIN_POWER_BUTTON: i32 = 5; // D3: Power / session button, active LOW
pub const PIN_BUZZER: i32 = 4;       // D2: Passive buzzer (LEDC PWM)
pub const PIN_LED: i32 = 10;         // D10: Status LED
pub const PIN_I2C_SDA: i32 = 6;      // D4: I2C data line
pub const PIN_I2C_SCL: i32 = 7;      // D5: I2C clock line
pub const PIN_RADIO_TX: i32 = 21;    // D6: UART TX to radio module
pub const PIN_RADIO_RX: i32 = 20;    // D7: UART RX from radio module

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_MPU9250: u8 = 0x68;
pub const I2C_ADDR_OPT3001: u8 = 0x44;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// Radio UART
// ---------------------------------------------------------------------------
pub const RADIO_BAUD: u32 = 57_600;
pub const RADIO_LINE_MAX: usize = 80;

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_SENSOR: usize = 8192;
pub const STACK_BUTTON: usize = 4096;
pub const STACK_CONTROL: usize = 8192;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const MOTION_TICK_MS: u64 = 100;      // 10 Hz IMU poll
pub const LIGHT_TICK_MS: u64 = 1000;      // 1 Hz ambient light poll
pub const BUTTON_POLL_MS: u64 = 10;       // 100 Hz pin poll
pub const DEBOUNCE_MS: u64 = 50;          // level must hold this long to count
pub const CONTROL_POLL_MS: u64 = 10;      // tone cursor / inbound radio poll
pub const SENSOR_POWER_UP_MS: u64 = 100;  // sensor settle time after power-on
pub const BOOT_GUARD_MS: u64 = 1000;      // presses inside the first second are ignored
pub const LONG_PRESS_MS: u64 = 2000;      // 2-second hold

// ---------------------------------------------------------------------------
// Motion Pipeline
// ---------------------------------------------------------------------------
pub const SAMPLE_CAPACITY: usize = 50;    // 5-second window @ 10 Hz
pub const SMOOTHING_WINDOW: usize = 3;
pub const SAMPLE_PERIOD_S: f32 = 0.1;     // derivative dt
pub const MOTION_AXES: usize = 6;         // ax, ay, az, gx, gy, gz

// ---------------------------------------------------------------------------
// Motion Classifier Thresholds (average |d/dt| over the window)
// ---------------------------------------------------------------------------
pub const EXERCISE_Z_THRESHOLD: f32 = 3.0;
pub const PET_XY_THRESHOLD: f32 = 2.0;
pub const PET_Z_CEILING: f32 = 1.0;

// ---------------------------------------------------------------------------
// Ambient Light
// ---------------------------------------------------------------------------
pub const LIGHT_WINDOW: usize = 10;       // consecutive 1 Hz readings
pub const DARK_THRESHOLD_LUX: f32 = 5.0;

// ---------------------------------------------------------------------------
// Telemetry Protocol
// ---------------------------------------------------------------------------
pub const DEVICE_ID: &str = "0301";
pub const INBOUND_GAME_OVER: &str = "301,BEEP:Too late";
pub const INBOUND_WARNING: &str = "301,BEEP";
pub const SESSION_START_REPEATS: usize = 3;

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------
pub const FOOD_NAMES: [&str; 5] = ["Berries", "Fish", "Carrot", "Cake", "Soup"];
pub const FOOD_COUNT: usize = FOOD_NAMES.len();

// ---------------------------------------------------------------------------
// MPU9250 Sensor Scale Factors
// ---------------------------------------------------------------------------
pub const ACCEL_SCALE_2G: f32 = 16384.0;  // LSB/g  at ±2 g
pub const GYRO_SCALE_250: f32 = 131.0;    // LSB/°/s at ±250 °/s
