// PetPal — Motion Pipeline
//
// buffer → smooth → derive → classify. Samples accumulate until the
// 5-second window is full, then the whole window is recomputed in one batch.
// If nothing crossed a threshold the window slides by one sample; otherwise
// it is cleared so the same motion is not detected again in the overlapping
// next window.

pub mod buffer;
pub mod classifier;
pub mod derivative;
pub mod smoother;

use crate::config::*;
use crate::events::Sample;

pub use buffer::{Fill, SampleBuffer};
pub use classifier::{classify, Classification};
pub use derivative::derivative;
pub use smoother::{mean, moving_average};

/// Smooth every channel (time included) of a window of samples.
pub fn smooth(samples: &[Sample]) -> [Vec<f32>; 7] {
    std::array::from_fn(|channel| {
        let series: Vec<f32> = samples.iter().map(|s| s.channels()[channel]).collect();
        moving_average(&series, SMOOTHING_WINDOW)
    })
}

/// Mean absolute derivative of each smoothed motion axis.
pub fn average_derivatives(samples: &[Sample]) -> [f32; MOTION_AXES] {
    let smoothed = smooth(samples);
    std::array::from_fn(|axis| {
        // Channel 0 is time.
        let rates = derivative(&smoothed[axis + 1], SAMPLE_PERIOD_S);
        mean(&rates)
    })
}

#[derive(Debug, Default)]
pub struct MotionPipeline {
    buffer: SampleBuffer,
}

impl MotionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a sample; returns the classification whenever the window filled.
    pub fn push(&mut self, sample: Sample) -> Option<Classification> {
        if self.buffer.push(sample) == Fill::NotFull {
            return None;
        }

        let averages = average_derivatives(&self.buffer.snapshot());
        log::debug!(
            "Window averages ax:{:.2} ay:{:.2} az:{:.2} gx:{:.2} gy:{:.2} gz:{:.2}",
            averages[0],
            averages[1],
            averages[2],
            averages[3],
            averages[4],
            averages[5]
        );

        let result = classify(&averages);
        if result.should_restart {
            self.buffer.clear();
        } else {
            self.buffer.drain_oldest();
        }
        Some(result)
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MotionEvent;

    fn ramp(i: usize, dx: f32, dz: f32) -> Sample {
        Sample {
            time: i as f32 * SAMPLE_PERIOD_S,
            ax: i as f32 * dx,
            az: i as f32 * dz,
            ..Sample::default()
        }
    }

    #[test]
    fn series_lengths() {
        let samples: Vec<Sample> = (0..SAMPLE_CAPACITY).map(|i| ramp(i, 1.0, 0.0)).collect();
        let smoothed = smooth(&samples);
        assert!(smoothed.iter().all(|s| s.len() == 48));
        assert_eq!(derivative(&smoothed[1], SAMPLE_PERIOD_S).len(), 47);
    }

    #[test]
    fn constant_window_slides() {
        let mut pipeline = MotionPipeline::new();
        let still = Sample {
            az: 1.0,
            ..Sample::default()
        };

        for _ in 0..SAMPLE_CAPACITY - 1 {
            assert!(pipeline.push(still).is_none());
        }
        let result = pipeline.push(still).unwrap();
        assert_eq!(result.event, MotionEvent::NoEvent);
        assert!(!result.should_restart);
        assert_eq!(pipeline.buffered(), SAMPLE_CAPACITY - 1);

        // One more sample refills the slid window.
        assert!(pipeline.push(still).is_some());
    }

    #[test]
    fn vertical_motion_is_exercise_and_restarts() {
        let mut pipeline = MotionPipeline::new();
        let mut last = None;
        for i in 0..SAMPLE_CAPACITY {
            last = pipeline.push(ramp(i, 0.0, 5.0));
        }

        let result = last.unwrap();
        assert_eq!(result.event, MotionEvent::Exercise);
        assert!(result.should_restart);
        assert_eq!(pipeline.buffered(), 0);
    }

    #[test]
    fn horizontal_shake_is_pet() {
        let samples: Vec<Sample> = (0..SAMPLE_CAPACITY).map(|i| ramp(i, 3.0, 0.0)).collect();
        let averages = average_derivatives(&samples);
        assert!((averages[0] - 30.0).abs() < 1e-2);

        let result = classify(&averages);
        assert_eq!(result.event, MotionEvent::Pet);
        assert!(result.should_restart);
    }
}
