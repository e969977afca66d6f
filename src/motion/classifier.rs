// PetPal — Motion Classifier
//
// Threshold rules turning average per-axis derivatives into a motion event.
// `should_restart` follows raw threshold crossings (Z above the exercise
// level, or X/Y above the pet level) while `event` follows the ordered
// rules. A vigorous X shake with Z between the pet ceiling and the exercise
// level therefore restarts the window without playing anything.

use crate::config::*;
use crate::events::MotionEvent;

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub should_restart: bool,
    pub event: MotionEvent,
}

/// `averages` are in ax, ay, az, gx, gy, gz order. Only the linear axes are
/// consulted.
pub fn classify(averages: &[f32; MOTION_AXES]) -> Classification {
    let (x, y, z) = (averages[X], averages[Y], averages[Z]);

    let exercise = z > EXERCISE_Z_THRESHOLD;
    let shaken = x > PET_XY_THRESHOLD || y > PET_XY_THRESHOLD;

    let event = if exercise {
        MotionEvent::Exercise
    } else if shaken && z < PET_Z_CEILING {
        MotionEvent::Pet
    } else {
        MotionEvent::NoEvent
    };

    Classification {
        should_restart: exercise || shaken,
        event,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn averages(x: f32, y: f32, z: f32) -> [f32; MOTION_AXES] {
        [x, y, z, 0.0, 0.0, 0.0]
    }

    #[test]
    fn quiet_window() {
        let c = classify(&averages(0.1, 0.2, 0.3));
        assert_eq!(c.event, MotionEvent::NoEvent);
        assert!(!c.should_restart);
    }

    #[test]
    fn exercise_wins_over_pet() {
        let c = classify(&averages(5.0, 5.0, 3.5));
        assert_eq!(c.event, MotionEvent::Exercise);
        assert!(c.should_restart);
    }

    #[test]
    fn pet_needs_still_z() {
        let c = classify(&averages(2.5, 0.0, 0.5));
        assert_eq!(c.event, MotionEvent::Pet);
        assert!(c.should_restart);

        let c = classify(&averages(0.0, 2.5, 0.5));
        assert_eq!(c.event, MotionEvent::Pet);
    }

    #[test]
    fn shake_with_moderate_z_restarts_silently() {
        let c = classify(&averages(2.5, 0.0, 2.0));
        assert_eq!(c.event, MotionEvent::NoEvent);
        assert!(c.should_restart);
    }

    #[test]
    fn thresholds_are_strict() {
        let c = classify(&averages(PET_XY_THRESHOLD, PET_XY_THRESHOLD, EXERCISE_Z_THRESHOLD));
        assert_eq!(c.event, MotionEvent::NoEvent);
        assert!(!c.should_restart);
    }

    #[test]
    fn gyro_axes_are_ignored() {
        let c = classify(&[0.0, 0.0, 0.0, 50.0, 50.0, 50.0]);
        assert_eq!(c.event, MotionEvent::NoEvent);
        assert!(!c.should_restart);
    }
}
