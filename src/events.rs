// PetPal — System Events & Data Types

use std::time::Duration;

use crate::codec::Outbound;

// ---------------------------------------------------------------------------
// Sensor Data
// ---------------------------------------------------------------------------

/// One 6-axis read from the IMU, in g and °/s.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionReading {
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
    pub gx: f32,
    pub gy: f32,
    pub gz: f32,
}

impl MotionReading {
    pub fn axes(&self) -> [f32; 6] {
        [self.ax, self.ay, self.az, self.gx, self.gy, self.gz]
    }
}

/// A timestamped motion reading as stored in the sample buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    /// Seconds since boot.
    pub time: f32,
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
    pub gx: f32,
    pub gy: f32,
    pub gz: f32,
}

impl Sample {
    pub fn new(time: f32, reading: MotionReading) -> Self {
        Self {
            time,
            ax: reading.ax,
            ay: reading.ay,
            az: reading.az,
            gx: reading.gx,
            gy: reading.gy,
            gz: reading.gz,
        }
    }

    /// Time followed by the six motion axes.
    pub fn channels(&self) -> [f32; 7] {
        [self.time, self.ax, self.ay, self.az, self.gx, self.gy, self.gz]
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionEvent {
    #[default]
    NoEvent,
    Exercise,
    Pet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightEvent {
    Dark,
    Light,
}

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Food selection / feeding.
    Secondary,
    /// Session toggle / shutdown.
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

/// Posted by the pin poller; consumed by the debouncer on the control task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    pub button: Button,
    pub edge: Edge,
    /// Time since boot at which the edge was seen.
    pub at: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Short,
    Long,
}

// ---------------------------------------------------------------------------
// Inbound radio commands
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundCommand {
    Warning,
    GameOver,
}

// ---------------------------------------------------------------------------
// Task → control channel
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Motion(MotionReading),
    /// Ambient light in lux.
    Light(f32),
    Button(ButtonEvent),
    Inbound(String),
}

// ---------------------------------------------------------------------------
// Effects: produced by the device, applied by the runtime
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerCommand {
    Start(u32),
    Stop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Buzzer(BuzzerCommand),
    Led(bool),
    Send(Outbound),
    /// Irreversible hardware power-down.
    PowerOff,
}
