//! Error types for chart construction, session lifecycle and persistence
//!
//! Nothing inside the per-tick evaluator can fail; errors only surface at
//! the boundaries where a caller hands us data or asks for a transition.

use thiserror::Error;

use crate::sim::SessionStatus;

/// Chart precondition violations, detected before a session can start
#[derive(Debug, Error)]
pub enum ChartError {
    /// A chart needs at least one note
    #[error("chart has no notes")]
    Empty,
    /// Notes must be sorted ascending by time
    #[error("note {id} at index {index} ({time}s) is earlier than the previous note ({previous}s)")]
    Unsorted {
        id: String,
        index: usize,
        time: f32,
        previous: f32,
    },
    /// NaN or infinite times cannot be ordered
    #[error("note {0} has a non-finite time")]
    NonFiniteTime(String),
    /// Note ids identify events and must be unique
    #[error("duplicate note id: {0}")]
    DuplicateId(String),
    /// Demo tempo must be a positive, finite BPM
    #[error("invalid bpm: {0}")]
    InvalidBpm(f32),
    /// Chart JSON could not be decoded
    #[error("invalid chart json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Balance values that would break the simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    /// Notes must travel toward the player
    #[error("note speed must be positive and finite, got {0}")]
    Speed(f32),
    /// Planes must be ordered spawn < player < miss
    #[error("planes out of order: spawn {spawn_z}, player {player_z}, miss {miss_z}")]
    Planes {
        spawn_z: f32,
        player_z: f32,
        miss_z: f32,
    },
    /// Windows, reach and thresholds cannot be negative or NaN
    #[error("{0} must be a non-negative finite number")]
    Negative(&'static str),
    /// Points or health amounts above the allowed ceiling
    #[error("{0} is out of range")]
    OutOfRange(&'static str),
}

/// The audio transport refused to start playback
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("audio transport failed: {0}")]
pub struct TransportError(pub String);

/// Session lifecycle failures
#[derive(Debug, Error)]
pub enum SessionError {
    /// `start` was requested outside the `Idle` state
    #[error("session cannot start from {0:?}")]
    NotIdle(SessionStatus),
    /// Playback never started; the session stays `Idle`
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Settings/high score file failures
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
