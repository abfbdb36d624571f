//! Chart: the validated, time-sorted note timeline for a session

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::note::{CutDirection, NoteDef, Side};
use crate::consts::{LANE_X_POSITIONS, LAYER_Y_POSITIONS};
use crate::error::ChartError;

/// Tempo of the bundled demo track
pub const DEMO_BPM: f32 = 140.0;

/// Beats of silence before the first demo note
const DEMO_INTRO_BEATS: u32 = 2;

/// An immutable, validated note timeline
///
/// Sessions never mutate a chart; they copy it into their own run state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    notes: Vec<NoteDef>,
}

impl Chart {
    /// Validate and wrap a note list
    pub fn new(notes: Vec<NoteDef>) -> Result<Self, ChartError> {
        if notes.is_empty() {
            return Err(ChartError::Empty);
        }

        let mut seen = HashSet::with_capacity(notes.len());
        let mut previous = f32::NEG_INFINITY;
        for (index, note) in notes.iter().enumerate() {
            if !note.time.is_finite() {
                return Err(ChartError::NonFiniteTime(note.id.clone()));
            }
            if note.time < previous {
                return Err(ChartError::Unsorted {
                    id: note.id.clone(),
                    index,
                    time: note.time,
                    previous,
                });
            }
            if !seen.insert(note.id.as_str()) {
                return Err(ChartError::DuplicateId(note.id.clone()));
            }
            previous = note.time;
        }

        Ok(Self { notes })
    }

    /// Parse a JSON array of note templates
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let notes: Vec<NoteDef> = serde_json::from_str(json)?;
        Self::new(notes)
    }

    /// Generate a deterministic demo chart, one note per beat
    pub fn demo(seed: u64, bpm: f32, beats: u32) -> Result<Self, ChartError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(ChartError::InvalidBpm(bpm));
        }
        let beat = 60.0 / bpm;
        let mut rng = Pcg32::seed_from_u64(seed);
        let lanes = LANE_X_POSITIONS.len();
        let layers = LAYER_Y_POSITIONS.len();

        let notes = (0..beats.max(1))
            .map(|i| {
                let side = if rng.random_bool(0.5) {
                    Side::Left
                } else {
                    Side::Right
                };
                // Each hand favors its own half of the lanes
                let half = lanes / 2;
                let lane = match side {
                    Side::Left => rng.random_range(0..half),
                    Side::Right => rng.random_range(half..lanes),
                };
                let layer = rng.random_range(0..layers);
                let cut_direction = if rng.random_range(0..4) == 0 {
                    CutDirection::Any
                } else {
                    CutDirection::DIRECTED[rng.random_range(0..CutDirection::DIRECTED.len())]
                };

                NoteDef {
                    id: format!("demo-{i}"),
                    time: (DEMO_INTRO_BEATS + i) as f32 * beat,
                    lane,
                    layer,
                    side,
                    cut_direction,
                }
            })
            .collect();

        Self::new(notes)
    }

    pub fn notes(&self) -> &[NoteDef] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Scheduled time of the last note
    pub fn duration(&self) -> f32 {
        self.notes.last().map(|n| n.time).unwrap_or(0.0)
    }
}
