// PetPal — Ambient Light Monitor
//
// Samples once per whole second and reports sustained darkness: ten
// consecutive readings under the threshold. A Dark report disarms the
// monitor until the device has been through (and left) Sleep, so a dark
// room does not re-trigger the sleep tune every ten seconds.

use std::time::Duration;

use heapless::Deque;

use crate::config::*;
use crate::events::LightEvent;

/// Admits at most one reading per truncated second.
#[derive(Debug, Default)]
pub struct SecondGate {
    last: Option<u64>,
}

impl SecondGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(&mut self, now: Duration) -> bool {
        let second = now.as_secs();
        if self.last == Some(second) {
            return false;
        }
        self.last = Some(second);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightOutcome {
    /// A reading was already taken during this second.
    Duplicate,
    Accepted(Option<LightEvent>),
}

#[derive(Debug)]
pub struct AmbientLightMonitor {
    window: Deque<f32, LIGHT_WINDOW>,
    gate: SecondGate,
    armed: bool,
}

impl Default for AmbientLightMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl AmbientLightMonitor {
    pub fn new() -> Self {
        Self {
            window: Deque::new(),
            gate: SecondGate::new(),
            armed: true,
        }
    }

    pub fn sample(&mut self, now: Duration, lux: f32) -> LightOutcome {
        if !self.gate.admit(now) {
            return LightOutcome::Duplicate;
        }

        // The window never holds more than LIGHT_WINDOW - 1 readings here.
        let _ = self.window.push_back(lux);
        if !self.window.is_full() {
            return LightOutcome::Accepted(None);
        }

        if self.window.iter().all(|&l| l < DARK_THRESHOLD_LUX) {
            self.window.clear();
            if !self.armed {
                return LightOutcome::Accepted(None);
            }
            self.armed = false;
            log::info!("Sustained darkness for {} s", LIGHT_WINDOW);
            LightOutcome::Accepted(Some(LightEvent::Dark))
        } else {
            self.window.pop_front();
            LightOutcome::Accepted(Some(LightEvent::Light))
        }
    }

    /// Allow the next dark window to report again, starting from scratch.
    pub fn rearm(&mut self) {
        if !self.armed {
            self.armed = true;
            self.window.clear();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn gate_rejects_same_second() {
        let mut gate = SecondGate::new();
        assert!(gate.admit(Duration::from_millis(1100)));
        assert!(!gate.admit(Duration::from_millis(1900)));
        assert!(gate.admit(Duration::from_millis(2000)));
    }

    #[test]
    fn ten_dark_readings_emit_once() {
        let mut monitor = AmbientLightMonitor::new();
        for s in 0..9 {
            assert_eq!(monitor.sample(secs(s), 0.0), LightOutcome::Accepted(None));
        }
        assert_eq!(
            monitor.sample(secs(9), 0.0),
            LightOutcome::Accepted(Some(LightEvent::Dark))
        );

        // The 11th reading starts a fresh window.
        assert_eq!(monitor.sample(secs(10), 0.0), LightOutcome::Accepted(None));
    }

    #[test]
    fn disarmed_until_rearmed() {
        let mut monitor = AmbientLightMonitor::new();
        for s in 0..10 {
            monitor.sample(secs(s), 0.0);
        }
        assert!(!monitor.is_armed());

        let events: Vec<_> = (10..20).map(|s| monitor.sample(secs(s), 0.0)).collect();
        assert!(events.iter().all(|e| *e == LightOutcome::Accepted(None)));

        monitor.rearm();
        for s in 20..29 {
            assert_eq!(monitor.sample(secs(s), 0.0), LightOutcome::Accepted(None));
        }
        assert_eq!(
            monitor.sample(secs(29), 0.0),
            LightOutcome::Accepted(Some(LightEvent::Dark))
        );
    }

    #[test]
    fn one_bright_reading_slides() {
        let mut monitor = AmbientLightMonitor::new();
        monitor.sample(secs(0), 100.0);
        for s in 1..9 {
            monitor.sample(secs(s), 0.0);
        }
        assert_eq!(
            monitor.sample(secs(9), 0.0),
            LightOutcome::Accepted(Some(LightEvent::Light))
        );
        // Bright reading has slid out; the next dark one completes the window.
        assert_eq!(
            monitor.sample(secs(10), 0.0),
            LightOutcome::Accepted(Some(LightEvent::Dark))
        );
    }

    #[test]
    fn duplicate_second_is_not_recorded() {
        let mut monitor = AmbientLightMonitor::new();
        assert_eq!(monitor.sample(secs(3), 0.0), LightOutcome::Accepted(None));
        assert_eq!(
            monitor.sample(Duration::from_millis(3500), 0.0),
            LightOutcome::Duplicate
        );
    }
}
