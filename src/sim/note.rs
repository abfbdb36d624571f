//! Note templates and per-session run state
//!
//! A chart holds immutable `NoteDef`s. Each session copies them into
//! `NoteSlot`s whose `NoteStatus` tracks the lifecycle:
//! pending -> active -> hit | missed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which hand is expected to strike a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Required swing direction at impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CutDirection {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    /// Wildcard - any swing direction is accepted
    #[default]
    Any,
}

impl CutDirection {
    /// All directions with a concrete vector
    pub const DIRECTED: [CutDirection; 8] = [
        CutDirection::Up,
        CutDirection::Down,
        CutDirection::Left,
        CutDirection::Right,
        CutDirection::UpLeft,
        CutDirection::UpRight,
        CutDirection::DownLeft,
        CutDirection::DownRight,
    ];

    /// Unit vector of the required swing, `None` for the wildcard
    pub fn vector(self) -> Option<Vec3> {
        use std::f32::consts::FRAC_1_SQRT_2 as D;
        let v = match self {
            CutDirection::Up => Vec3::Y,
            CutDirection::Down => Vec3::NEG_Y,
            CutDirection::Left => Vec3::NEG_X,
            CutDirection::Right => Vec3::X,
            CutDirection::UpLeft => Vec3::new(-D, D, 0.0),
            CutDirection::UpRight => Vec3::new(D, D, 0.0),
            CutDirection::DownLeft => Vec3::new(-D, -D, 0.0),
            CutDirection::DownRight => Vec3::new(D, -D, 0.0),
            CutDirection::Any => return None,
        };
        Some(v)
    }
}

/// Hit quality, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Accuracy {
    Perfect,
    Good,
    Bad,
}

impl Accuracy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accuracy::Perfect => "Perfect",
            Accuracy::Good => "Good",
            Accuracy::Bad => "Bad",
        }
    }
}

/// One scheduled target, as authored in a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDef {
    pub id: String,
    /// Scheduled hit time (seconds)
    pub time: f32,
    pub lane: usize,
    pub layer: usize,
    pub side: Side,
    #[serde(default)]
    pub cut_direction: CutDirection,
}

/// Lifecycle of a note within one session
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum NoteStatus {
    /// Not yet within lead time
    #[default]
    Pending,
    /// In the working set, travelling toward the player
    Active,
    /// Struck by the matching hand
    Hit { accuracy: Accuracy, time: f32 },
    /// Passed the miss plane unresolved
    Missed,
}

impl NoteStatus {
    pub fn is_resolved(&self) -> bool {
        matches!(self, NoteStatus::Hit { .. } | NoteStatus::Missed)
    }
}

/// A note plus its run state, addressed by index in the session arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteSlot {
    pub def: NoteDef,
    pub status: NoteStatus,
}

impl NoteSlot {
    pub fn new(def: NoteDef) -> Self {
        Self {
            def,
            status: NoteStatus::Pending,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self.status, NoteStatus::Hit { .. })
    }

    pub fn is_missed(&self) -> bool {
        self.status == NoteStatus::Missed
    }

    pub fn hit_time(&self) -> Option<f32> {
        match self.status {
            NoteStatus::Hit { time, .. } => Some(time),
            _ => None,
        }
    }

    pub fn accuracy(&self) -> Option<Accuracy> {
        match self.status {
            NoteStatus::Hit { accuracy, .. } => Some(accuracy),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_are_unit() {
        for dir in CutDirection::DIRECTED {
            let v = dir.vector().unwrap();
            assert!((v.length() - 1.0).abs() < 1e-5, "{dir:?}");
        }
        assert!(CutDirection::Any.vector().is_none());
    }

    #[test]
    fn test_note_json_shape() {
        let json = r#"{"id":"n1","time":2.0,"lane":1,"layer":0,"side":"left","cutDirection":"downRight"}"#;
        let note: NoteDef = serde_json::from_str(json).unwrap();
        assert_eq!(note.side, Side::Left);
        assert_eq!(note.cut_direction, CutDirection::DownRight);

        // Missing direction means any
        let json = r#"{"id":"n2","time":3.0,"lane":0,"layer":2,"side":"right"}"#;
        let note: NoteDef = serde_json::from_str(json).unwrap();
        assert_eq!(note.cut_direction, CutDirection::Any);
    }

    #[test]
    fn test_slot_accessors() {
        let mut slot = NoteSlot::new(NoteDef {
            id: "a".into(),
            time: 1.0,
            lane: 0,
            layer: 0,
            side: Side::Right,
            cut_direction: CutDirection::Up,
        });
        assert!(!slot.status.is_resolved());
        assert_eq!(slot.hit_time(), None);

        slot.status = NoteStatus::Hit {
            accuracy: Accuracy::Good,
            time: 1.05,
        };
        assert!(slot.is_hit());
        assert!(!slot.is_missed());
        assert_eq!(slot.accuracy(), Some(Accuracy::Good));
        assert_eq!(slot.hit_time(), Some(1.05));
    }
}
