// PetPal — Telemetry Session
//
// Orthogonal to the device state: while Sending, every accepted sensor
// sample is serialised and handed to the transport.

use crate::codec::Outbound;
use crate::config::SESSION_START_REPEATS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NotSending,
    Sending,
}

#[derive(Debug, Default)]
pub struct SessionManager {
    state: SessionState,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == SessionState::Sending
    }

    /// Flip the session and return the announcement to send. Start is
    /// repeated because the radio link drops packets silently.
    pub fn toggle(&mut self) -> Vec<Outbound> {
        match self.state {
            SessionState::NotSending => {
                self.state = SessionState::Sending;
                log::info!("Session started");
                vec![Outbound::SessionStart; SESSION_START_REPEATS]
            }
            SessionState::Sending => {
                self.state = SessionState::NotSending;
                log::info!("Session ended");
                vec![Outbound::SessionEnd]
            }
        }
    }

    /// Wrap a sample for the transport when a session is running.
    pub fn telemetry(&self, message: impl FnOnce() -> Outbound) -> Option<Outbound> {
        self.is_sending().then(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_and_announces() {
        let mut session = SessionManager::new();
        assert_eq!(session.state(), SessionState::NotSending);

        let start = session.toggle();
        assert_eq!(start, vec![Outbound::SessionStart; 3]);
        assert!(session.is_sending());

        assert_eq!(session.toggle(), vec![Outbound::SessionEnd]);
        assert_eq!(session.state(), SessionState::NotSending);
    }

    #[test]
    fn telemetry_gated_by_state() {
        let mut session = SessionManager::new();
        assert!(session.telemetry(|| Outbound::Light(1.0)).is_none());
        session.toggle();
        assert_eq!(session.telemetry(|| Outbound::Light(1.0)), Some(Outbound::Light(1.0)));
    }
}
