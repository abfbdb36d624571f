//! Session state and the score/combo/health state machine
//!
//! Everything a running session owns lives here: the note arena, the active
//! working set, and the scoreboard. A fresh `GameState` is built from the
//! chart for every session so nothing leaks across restarts.

use serde::{Deserialize, Serialize};

use super::chart::Chart;
use super::note::{Accuracy, NoteSlot};
use crate::consts::{MAX_HEALTH, MIN_HEALTH};
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Waiting for external collaborators (hand tracking) to come up
    Loading,
    /// Ready, waiting for a start request
    Idle,
    /// Ticks are processed only in this state
    Playing,
    /// Track ended with health remaining
    Victory,
    /// Health depleted or session aborted
    GameOver,
}

impl SessionStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionStatus::Victory | SessionStatus::GameOver)
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    Victory,
    GameOver,
}

impl SessionOutcome {
    pub fn is_victory(&self) -> bool {
        *self == SessionOutcome::Victory
    }

    pub fn status(&self) -> SessionStatus {
        match self {
            SessionOutcome::Victory => SessionStatus::Victory,
            SessionOutcome::GameOver => SessionStatus::GameOver,
        }
    }
}

/// A note was struck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitEvent {
    pub note_id: String,
    pub accuracy: Accuracy,
    /// Points awarded (base points times multiplier)
    pub points: u64,
}

/// A note passed the miss plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissEvent {
    pub note_id: String,
}

/// Score multiplier for a combo count
///
/// Breakpoints: above 30 -> x8, above 20 -> x4, above 10 -> x2.
pub fn multiplier_for_combo(combo: u32) -> u32 {
    match combo {
        c if c > 30 => 8,
        c if c > 20 => 4,
        c if c > 10 => 2,
        _ => 1,
    }
}

/// Score, combo and health
///
/// The multiplier is never stored; it is always derived from the combo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    score: u64,
    combo: u32,
    health: i32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            score: 0,
            combo: 0,
            health: MAX_HEALTH,
        }
    }
}

impl Scoreboard {
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn multiplier(&self) -> u32 {
        multiplier_for_combo(self.combo)
    }

    pub fn is_depleted(&self) -> bool {
        self.health <= MIN_HEALTH
    }

    /// Apply a hit and return the points awarded
    ///
    /// The combo is incremented first, so a hit that crosses a breakpoint
    /// is already scored at the new multiplier.
    pub fn apply_hit(&mut self, accuracy: Accuracy, tuning: &Tuning) -> u64 {
        self.combo = self.combo.saturating_add(1);
        let points = tuning
            .base_points(accuracy)
            .saturating_mul(u64::from(self.multiplier()));
        self.score = self.score.saturating_add(points);
        self.health = self
            .health
            .saturating_add(tuning.health_restore(accuracy))
            .clamp(MIN_HEALTH, MAX_HEALTH);
        points
    }

    /// Apply a miss; returns true when health has run out
    pub fn apply_miss(&mut self, tuning: &Tuning) -> bool {
        self.combo = 0;
        self.health = self
            .health
            .saturating_sub(tuning.miss_penalty)
            .clamp(MIN_HEALTH, MAX_HEALTH);
        self.is_depleted()
    }
}

/// Complete per-session simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub status: SessionStatus,
    pub scoreboard: Scoreboard,
    /// Note arena, chart order
    pub(crate) notes: Vec<NoteSlot>,
    /// Indices into `notes`, oldest spawn first
    pub(crate) active: Vec<usize>,
    /// Next chart index to consider for spawning
    pub(crate) cursor: usize,
    /// Clock reading of the last processed tick
    pub elapsed: f32,
}

impl GameState {
    /// Build a fresh run state from a chart template
    pub fn new(chart: &Chart) -> Self {
        Self {
            status: SessionStatus::Idle,
            scoreboard: Scoreboard::default(),
            notes: chart.notes().iter().cloned().map(NoteSlot::new).collect(),
            active: Vec::new(),
            cursor: 0,
            elapsed: 0.0,
        }
    }

    pub fn notes(&self) -> &[NoteSlot] {
        &self.notes
    }

    /// Active notes in spawn order
    pub fn active_notes(&self) -> impl Iterator<Item = &NoteSlot> {
        self.active.iter().map(|&i| &self.notes[i])
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn note(&self, id: &str) -> Option<&NoteSlot> {
        self.notes.iter().find(|n| n.def.id == id)
    }

    /// Notes resolved so far (hit or missed)
    pub fn resolved_count(&self) -> usize {
        self.notes.iter().filter(|n| n.status.is_resolved()).count()
    }
}
