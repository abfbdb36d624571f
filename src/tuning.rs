//! Data-driven game balance
//!
//! Every threshold the simulation compares against lives here so a session's
//! feel can be adjusted (or loaded from JSON) without touching the evaluator.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;
use crate::sim::Accuracy;

/// Ceiling for base points per hit
pub const MAX_BASE_POINTS: u64 = 1_000_000;

/// Timing, collision and scoring constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Travel ===
    pub player_z: f32,
    pub spawn_z: f32,
    pub miss_z: f32,
    /// Scroll speed in units/s
    pub note_speed: f32,

    // === Hit window (depth band around the player plane) ===
    /// Allowance on the approach side (before the plane)
    pub window_early: f32,
    /// Allowance on the departure side (after the plane)
    pub window_late: f32,

    // === Swing gate ===
    /// Max hand-to-note distance
    pub hit_radius: f32,
    /// Minimum hand speed; slower hands never register
    pub min_swing_speed: f32,
    /// Alignment must be strictly above this
    pub min_alignment: f32,

    // === Accuracy tiers (depth error, alignment) ===
    pub perfect_depth: f32,
    pub perfect_alignment: f32,
    pub good_depth: f32,
    pub good_alignment: f32,

    // === Rewards ===
    pub perfect_points: u64,
    pub good_points: u64,
    pub bad_points: u64,
    pub perfect_health: i32,
    pub good_health: i32,
    pub bad_health: i32,
    pub miss_penalty: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_z: PLAYER_Z,
            spawn_z: SPAWN_Z,
            miss_z: MISS_Z,
            note_speed: NOTE_SPEED,

            window_early: 2.0,
            window_late: 1.5,

            hit_radius: 1.3,
            min_swing_speed: 0.4,
            min_alignment: 0.1,

            perfect_depth: 0.6,
            perfect_alignment: 0.5,
            good_depth: 1.2,
            good_alignment: 0.2,

            perfect_points: 115,
            good_points: 100,
            bad_points: 50,
            perfect_health: 4,
            good_health: 2,
            bad_health: 1,
            miss_penalty: 15,
        }
    }
}

impl Tuning {
    /// Reject values that would stall notes or break scoring
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.note_speed.is_finite() && self.note_speed > 0.0) {
            return Err(TuningError::Speed(self.note_speed));
        }
        let planes_ordered = [self.spawn_z, self.player_z, self.miss_z]
            .iter()
            .all(|z| z.is_finite())
            && self.spawn_z < self.player_z
            && self.player_z < self.miss_z;
        if !planes_ordered {
            return Err(TuningError::Planes {
                spawn_z: self.spawn_z,
                player_z: self.player_z,
                miss_z: self.miss_z,
            });
        }

        let non_negative = [
            ("window_early", self.window_early),
            ("window_late", self.window_late),
            ("hit_radius", self.hit_radius),
            ("min_swing_speed", self.min_swing_speed),
            ("perfect_depth", self.perfect_depth),
            ("good_depth", self.good_depth),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Negative(name));
            }
        }
        // Alignment thresholds live on the dot-product range
        for (name, value) in [
            ("min_alignment", self.min_alignment),
            ("perfect_alignment", self.perfect_alignment),
            ("good_alignment", self.good_alignment),
        ] {
            if !(-1.0..=1.0).contains(&value) {
                return Err(TuningError::OutOfRange(name));
            }
        }

        for (name, value) in [
            ("perfect_points", self.perfect_points),
            ("good_points", self.good_points),
            ("bad_points", self.bad_points),
        ] {
            if value > MAX_BASE_POINTS {
                return Err(TuningError::OutOfRange(name));
            }
        }
        for (name, value) in [
            ("perfect_health", self.perfect_health),
            ("good_health", self.good_health),
            ("bad_health", self.bad_health),
            ("miss_penalty", self.miss_penalty),
        ] {
            if !(0..=MAX_HEALTH).contains(&value) {
                return Err(TuningError::OutOfRange(name));
            }
        }
        Ok(())
    }

    /// Seconds a note is on screen before its scheduled time
    pub fn lead_time(&self) -> f32 {
        crate::lead_time(self.spawn_z, self.player_z, self.note_speed)
    }

    /// Depth of a note at the given clock reading
    #[inline]
    pub fn depth_at(&self, note_time: f32, elapsed: f32) -> f32 {
        crate::note_depth(note_time, elapsed, self.player_z, self.note_speed)
    }

    /// Whether a depth lies inside the (open) hit window
    #[inline]
    pub fn in_hit_window(&self, depth: f32) -> bool {
        depth > self.player_z - self.window_early && depth < self.player_z + self.window_late
    }

    /// Whether a depth has scrolled strictly past the miss plane
    #[inline]
    pub fn past_miss_plane(&self, depth: f32) -> bool {
        depth > self.miss_z
    }

    /// Base points for a hit, before the combo multiplier
    pub fn base_points(&self, accuracy: Accuracy) -> u64 {
        match accuracy {
            Accuracy::Perfect => self.perfect_points,
            Accuracy::Good => self.good_points,
            Accuracy::Bad => self.bad_points,
        }
    }

    /// Health restored by a hit
    pub fn health_restore(&self, accuracy: Accuracy) -> i32 {
        match accuracy {
            Accuracy::Perfect => self.perfect_health,
            Accuracy::Good => self.good_health,
            Accuracy::Bad => self.bad_health,
        }
    }

    /// Scale spatial/timing tolerances (used by leniency presets)
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            window_early: self.window_early * factor,
            window_late: self.window_late * factor,
            hit_radius: self.hit_radius * factor,
            perfect_depth: self.perfect_depth * factor,
            good_depth: self.good_depth * factor,
            ..self.clone()
        }
    }
}
