//! Serializable journal records.
//!
//! Every line of the journal is one [`JournalRecord`]:
//!
//! ```text
//! {"seq":1,"ts":1700000000000,"type":"spawn","piece":{"kind":"T","rotation":0,"x":3,"y":0}}
//! {"seq":9,"ts":1700000000420,"type":"clear","rows":[20,21]}
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{ActiveSnapshot, ClockEvent, GameEvent};
use crate::types::Coord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    pub kind: String,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<&ActiveSnapshot> for PieceRecord {
    fn from(piece: &ActiveSnapshot) -> Self {
        Self {
            kind: piece.kind.as_str().to_string(),
            rotation: piece.rotation.index() as u8,
            x: piece.x,
            y: piece.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventRecord {
    Spawn {
        piece: PieceRecord,
    },
    Update {
        x: i8,
        y: i8,
        width: u8,
        height: u8,
    },
    Move {
        piece: PieceRecord,
    },
    Rotate {
        piece: PieceRecord,
    },
    Hold {
        held: String,
    },
    Lock {
        cells: Vec<Coord>,
    },
    Clear {
        rows: Vec<usize>,
    },
    Score {
        score: u32,
        combo: u32,
    },
    Clock {
        event: String,
        state: String,
        delay_ms: u32,
        ticks: u32,
    },
}

impl From<&GameEvent> for EventRecord {
    fn from(event: &GameEvent) -> Self {
        match event {
            GameEvent::Spawn(piece) => EventRecord::Spawn {
                piece: piece.into(),
            },
            GameEvent::Update(region) => EventRecord::Update {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
            },
            GameEvent::Move(piece) => EventRecord::Move {
                piece: piece.into(),
            },
            GameEvent::Rotate(piece) => EventRecord::Rotate {
                piece: piece.into(),
            },
            GameEvent::Hold { held } => EventRecord::Hold {
                held: held.as_str().to_string(),
            },
            GameEvent::Lock(cells) => EventRecord::Lock {
                cells: cells.clone(),
            },
            GameEvent::Clear(rows) => EventRecord::Clear { rows: rows.clone() },
            GameEvent::Score { score, combo } => EventRecord::Score {
                score: *score,
                combo: *combo,
            },
            GameEvent::Clock(clock) => {
                let snapshot = clock.snapshot();
                EventRecord::Clock {
                    event: clock.name().to_string(),
                    state: snapshot.state.as_str().to_string(),
                    delay_ms: snapshot.delay_ms,
                    ticks: snapshot.ticks,
                }
            }
        }
    }
}

/// One journal line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub seq: u64,
    /// Milliseconds since the Unix epoch
    pub ts: u64,
    #[serde(flatten)]
    pub event: EventRecord,
}

impl JournalRecord {
    pub fn new(seq: u64, ts: u64, event: &GameEvent) -> Self {
        Self {
            seq,
            ts,
            event: event.into(),
        }
    }
}

/// True for the per-tick clock notifications
pub fn is_tick(event: &GameEvent) -> bool {
    matches!(
        event,
        GameEvent::Clock(ClockEvent::Uptick(_)) | GameEvent::Clock(ClockEvent::Downtick(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Region;

    #[test]
    fn test_clear_record_json_shape() {
        let record = JournalRecord::new(9, 420, &GameEvent::Clear(vec![20, 21]));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"seq": 9, "ts": 420, "type": "clear", "rows": [20, 21]})
        );
    }

    #[test]
    fn test_lock_cells_serialize_as_pairs() {
        let record = JournalRecord::new(1, 0, &GameEvent::Lock(vec![(4, 20), (5, 21)]));
        let line = serde_json::to_string(&record).unwrap();
        assert!(line.contains(r#""cells":[[4,20],[5,21]]"#));
        let back: JournalRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_update_record_keeps_region() {
        let record = EventRecord::from(&GameEvent::Update(Region::new(-1, 0, 5, 5)));
        assert_eq!(
            record,
            EventRecord::Update {
                x: -1,
                y: 0,
                width: 5,
                height: 5
            }
        );
    }
}
