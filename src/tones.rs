// PetPal — Tone Tables & Cooperative Player
//
// Each row is played start → hold → stop → gap. The player never sleeps:
// the control task polls it and it issues buzzer commands as deadlines
// pass, so buttons and radio traffic keep flowing during a long tune.

use std::time::Duration;

use crate::events::BuzzerCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub freq_hz: u32,
    pub note_us: u32,
    pub gap_us: u32,
}

const fn note(freq_hz: u32, note_ms: u32, gap_ms: u32) -> Note {
    Note {
        freq_hz,
        note_us: note_ms * 1000,
        gap_us: gap_ms * 1000,
    }
}

pub type ToneTable = &'static [Note];

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------
pub const BOOT: ToneTable = &[
    note(523, 150, 50),
    note(659, 150, 50),
    note(784, 150, 50),
    note(1047, 400, 100),
];
pub const SHUTDOWN: ToneTable = &[note(784, 200, 50), note(523, 200, 50), note(262, 500, 0)];
pub const FOOD_SELECT: ToneTable = &[note(1319, 60, 20)];
pub const SESSION_TOGGLE: ToneTable = &[note(880, 80, 40), note(1760, 80, 0)];
pub const EAT: ToneTable = &[
    note(659, 100, 60),
    note(659, 100, 60),
    note(784, 250, 0),
];
pub const EXERCISE: ToneTable = &[
    note(392, 120, 30),
    note(523, 120, 30),
    note(659, 120, 30),
    note(784, 300, 0),
];
pub const PET: ToneTable = &[note(1047, 200, 80), note(988, 200, 80), note(1047, 400, 0)];
pub const SLEEP: ToneTable = &[note(440, 400, 200), note(349, 400, 200), note(262, 800, 0)];
pub const WARNING: ToneTable = &[
    note(2000, 150, 150),
    note(2000, 150, 150),
    note(2000, 150, 0),
];
pub const GAME_OVER: ToneTable = &[
    note(494, 300, 50),
    note(466, 300, 50),
    note(440, 300, 50),
    note(415, 900, 0),
];

/// Total playing time of a table, gaps included.
pub fn duration(table: ToneTable) -> Duration {
    let us: u64 = table
        .iter()
        .map(|n| u64::from(n.note_us) + u64::from(n.gap_us))
        .sum();
    Duration::from_micros(us)
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Note,
    Gap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Idle,
    Playing,
    /// The last row's gap has elapsed. Reported once per table.
    Finished,
}

#[derive(Debug)]
struct Cursor {
    table: ToneTable,
    index: usize,
    phase: Phase,
    deadline: Duration,
}

#[derive(Debug, Default)]
pub struct TonePlayer {
    cursor: Option<Cursor>,
}

impl TonePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Begin a table, replacing whatever was playing.
    pub fn start(&mut self, table: ToneTable, now: Duration, out: &mut Vec<BuzzerCommand>) {
        self.cancel(out);
        let deadline = match table.first() {
            Some(first) => {
                out.push(BuzzerCommand::Start(first.freq_hz));
                now + Duration::from_micros(u64::from(first.note_us))
            }
            None => now,
        };
        self.cursor = Some(Cursor {
            table,
            index: 0,
            phase: Phase::Note,
            deadline,
        });
    }

    /// Silence the buzzer and forget the current table.
    pub fn cancel(&mut self, out: &mut Vec<BuzzerCommand>) {
        if let Some(cursor) = self.cursor.take() {
            if cursor.phase == Phase::Note && !cursor.table.is_empty() {
                out.push(BuzzerCommand::Stop);
            }
        }
    }

    /// Advance past every deadline that has expired by `now`.
    pub fn poll(&mut self, now: Duration, out: &mut Vec<BuzzerCommand>) -> Playback {
        let Some(cursor) = self.cursor.as_mut() else {
            return Playback::Idle;
        };

        while now >= cursor.deadline {
            let Some(row) = cursor.table.get(cursor.index) else {
                self.cursor = None;
                return Playback::Finished;
            };
            match cursor.phase {
                Phase::Note => {
                    out.push(BuzzerCommand::Stop);
                    cursor.phase = Phase::Gap;
                    cursor.deadline += Duration::from_micros(u64::from(row.gap_us));
                }
                Phase::Gap => {
                    cursor.index += 1;
                    let Some(next) = cursor.table.get(cursor.index) else {
                        self.cursor = None;
                        return Playback::Finished;
                    };
                    out.push(BuzzerCommand::Start(next.freq_hz));
                    cursor.phase = Phase::Note;
                    cursor.deadline += Duration::from_micros(u64::from(next.note_us));
                }
            }
        }
        Playback::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO: ToneTable = &[note(100, 100, 50), note(200, 100, 50)];

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn plays_rows_in_order() {
        let mut player = TonePlayer::new();
        let mut out = Vec::new();

        player.start(TWO, ms(0), &mut out);
        assert_eq!(out, vec![BuzzerCommand::Start(100)]);
        out.clear();

        assert_eq!(player.poll(ms(50), &mut out), Playback::Playing);
        assert!(out.is_empty());

        assert_eq!(player.poll(ms(100), &mut out), Playback::Playing);
        assert_eq!(out, vec![BuzzerCommand::Stop]);
        out.clear();

        assert_eq!(player.poll(ms(150), &mut out), Playback::Playing);
        assert_eq!(out, vec![BuzzerCommand::Start(200)]);
        out.clear();

        assert_eq!(player.poll(ms(299), &mut out), Playback::Playing);
        assert_eq!(out, vec![BuzzerCommand::Stop]);
        out.clear();

        assert_eq!(player.poll(ms(300), &mut out), Playback::Finished);
        assert!(out.is_empty());
        assert_eq!(player.poll(ms(400), &mut out), Playback::Idle);
    }

    #[test]
    fn late_poll_catches_up() {
        let mut player = TonePlayer::new();
        let mut out = Vec::new();
        player.start(TWO, ms(0), &mut out);
        out.clear();

        assert_eq!(player.poll(ms(1000), &mut out), Playback::Finished);
        assert_eq!(
            out,
            vec![BuzzerCommand::Stop, BuzzerCommand::Start(200), BuzzerCommand::Stop]
        );
    }

    #[test]
    fn cancel_silences_a_sounding_note() {
        let mut player = TonePlayer::new();
        let mut out = Vec::new();
        player.start(TWO, ms(0), &mut out);
        out.clear();

        player.cancel(&mut out);
        assert_eq!(out, vec![BuzzerCommand::Stop]);
        assert!(!player.is_playing());
    }

    #[test]
    fn restart_replaces_current_table() {
        let mut player = TonePlayer::new();
        let mut out = Vec::new();
        player.start(TWO, ms(0), &mut out);
        player.start(FOOD_SELECT, ms(10), &mut out);
        assert_eq!(
            out,
            vec![BuzzerCommand::Start(100), BuzzerCommand::Stop, BuzzerCommand::Start(1319)]
        );
    }

    #[test]
    fn empty_table_finishes_immediately() {
        let mut player = TonePlayer::new();
        let mut out = Vec::new();
        player.start(&[], ms(0), &mut out);
        assert!(out.is_empty());
        assert_eq!(player.poll(ms(0), &mut out), Playback::Finished);
    }

    #[test]
    fn table_durations() {
        assert_eq!(duration(TWO), ms(300));
        assert_eq!(duration(FOOD_SELECT), ms(80));
    }
}
