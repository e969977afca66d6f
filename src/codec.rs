// PetPal — Telemetry Text Protocol
//
// Outbound: comma-separated `key:value` pairs, always led by `id:0301`.
// Inbound: free text, recognised only by substring.

use std::fmt;

use crate::config::*;
use crate::events::{InboundCommand, MotionReading};

#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    SessionStart,
    SessionEnd,
    /// Food index 1..=5.
    Eat(usize),
    Msg1(String),
    Msg2(String),
    Exercise(u32),
    Pet(u32),
    /// Batched activity totals. Part of the protocol for completeness; the
    /// device reports each event on its own and never sends this.
    Activate { eat: u32, exercise: u32, pet: u32 },
    Light(f32),
    Motion(MotionReading),
}

impl fmt::Display for Outbound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id:{}", DEVICE_ID)?;
        match self {
            Self::SessionStart => write!(f, ",session:start"),
            Self::SessionEnd => write!(f, ",session:end"),
            Self::Eat(food) => write!(f, ",EAT:{}", food),
            Self::Msg1(text) => write!(f, ",MSG1:{}", sanitize(text)),
            Self::Msg2(text) => write!(f, ",MSG2:{}", sanitize(text)),
            Self::Exercise(amount) => write!(f, ",EXERCISE:{}", amount),
            Self::Pet(amount) => write!(f, ",PET:{}", amount),
            Self::Activate { eat, exercise, pet } => {
                write!(f, ",ACTIVATE:{};{};{}", eat, exercise, pet)
            }
            Self::Light(lux) => write!(f, ",light:{:.2}", lux),
            Self::Motion(m) => write!(
                f,
                ",ax:{:.2},ay:{:.2},az:{:.2},gx:{:.2},gy:{:.2},gz:{:.2}",
                m.ax, m.ay, m.az, m.gx, m.gy, m.gz
            ),
        }
    }
}

impl Outbound {
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

/// Commas and colons would split a free-text value into bogus pairs.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c == ',' || c == ':' { ' ' } else { c })
        .collect()
}

/// The more specific game-over match is checked first.
pub fn parse_inbound(payload: &str) -> Option<InboundCommand> {
    if payload.contains(INBOUND_GAME_OVER) {
        Some(InboundCommand::GameOver)
    } else if payload.contains(INBOUND_WARNING) {
        Some(InboundCommand::Warning)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_messages() {
        assert_eq!(Outbound::SessionStart.encode(), "id:0301,session:start");
        assert_eq!(Outbound::SessionEnd.encode(), "id:0301,session:end");
    }

    #[test]
    fn pet_messages() {
        assert_eq!(Outbound::Eat(3).encode(), "id:0301,EAT:3");
        assert_eq!(Outbound::Exercise(1).encode(), "id:0301,EXERCISE:1");
        assert_eq!(Outbound::Pet(2).encode(), "id:0301,PET:2");
        assert_eq!(
            Outbound::Activate { eat: 1, exercise: 2, pet: 3 }.encode(),
            "id:0301,ACTIVATE:1;2;3"
        );
    }

    #[test]
    fn free_text_is_sanitized() {
        assert_eq!(
            Outbound::Msg1("Fish, selected: yes".into()).encode(),
            "id:0301,MSG1:Fish  selected  yes"
        );
        assert_eq!(Outbound::Msg2("device off".into()).encode(), "id:0301,MSG2:device off");
    }

    #[test]
    fn telemetry_uses_two_decimals() {
        assert_eq!(Outbound::Light(12.346).encode(), "id:0301,light:12.35");

        let reading = MotionReading {
            ax: 0.1,
            ay: -0.25,
            az: 1.0,
            gx: 3.0,
            gy: 0.0,
            gz: -12.5,
        };
        assert_eq!(
            Outbound::Motion(reading).encode(),
            "id:0301,ax:0.10,ay:-0.25,az:1.00,gx:3.00,gy:0.00,gz:-12.50"
        );
    }

    #[test]
    fn inbound_precedence() {
        assert_eq!(
            parse_inbound("301,BEEP:Too late, your pet is gone"),
            Some(InboundCommand::GameOver)
        );
        assert_eq!(parse_inbound("301,BEEP:Feed me"), Some(InboundCommand::Warning));
        assert_eq!(parse_inbound("302,BEEP:Feed me"), None);
        assert_eq!(parse_inbound("hello"), None);
    }
}
