//! Swing collision and accuracy classification
//!
//! A note inside the hit window is struck when the matching hand is close
//! enough, moving fast enough, and moving roughly along the required cut
//! direction. The quality tier then combines how close to the player plane
//! the strike landed with how well the swing was aligned.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::note::{Accuracy, NoteDef, Side};
use crate::slot_position;
use crate::tuning::Tuning;

/// One tracked hand for the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandState {
    pub position: Option<Vec3>,
    pub velocity: Option<Vec3>,
}

impl HandState {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position: Some(position),
            velocity: Some(velocity),
        }
    }

    /// Both position and velocity are needed to register a hit
    pub fn sample(&self) -> Option<(Vec3, Vec3)> {
        Some((self.position?, self.velocity?))
    }
}

/// Immutable per-frame snapshot of both hands
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandsSnapshot {
    pub left: HandState,
    pub right: HandState,
}

impl HandsSnapshot {
    pub fn for_side(&self, side: Side) -> &HandState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Why a swing did not resolve a note this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingReject {
    /// Note is outside the depth band
    OutsideWindow,
    /// Matching hand lacks position or velocity
    NoHand,
    /// Lane/layer outside the slot grid
    BadSlot,
    TooFar,
    TooSlow,
    WrongDirection,
}

/// Directional alignment of a swing, in [-1, 1]
///
/// The wildcard direction always scores 1.0.
pub fn alignment(velocity: Vec3, required: Option<Vec3>) -> f32 {
    match required {
        Some(dir) => velocity.normalize_or_zero().dot(dir),
        None => 1.0,
    }
}

/// Classify a confirmed strike by depth error and alignment
///
/// Anything that passed the swing gate but misses both tier thresholds is
/// still a hit, just the worst one.
pub fn classify(depth_error: f32, alignment: f32, tuning: &Tuning) -> Accuracy {
    if depth_error < tuning.perfect_depth && alignment > tuning.perfect_alignment {
        Accuracy::Perfect
    } else if depth_error < tuning.good_depth && alignment > tuning.good_alignment {
        Accuracy::Good
    } else {
        Accuracy::Bad
    }
}

/// Test one note against the hands at the given depth
pub fn evaluate_swing(
    note: &NoteDef,
    depth: f32,
    hands: &HandsSnapshot,
    tuning: &Tuning,
) -> Result<Accuracy, SwingReject> {
    if !tuning.in_hit_window(depth) {
        return Err(SwingReject::OutsideWindow);
    }

    let (hand_pos, hand_vel) = hands
        .for_side(note.side)
        .sample()
        .ok_or(SwingReject::NoHand)?;

    let note_pos = slot_position(note.lane, note.layer, depth).ok_or(SwingReject::BadSlot)?;

    if hand_pos.distance(note_pos) >= tuning.hit_radius {
        return Err(SwingReject::TooFar);
    }

    // Parked hands never register
    if hand_vel.length() < tuning.min_swing_speed {
        return Err(SwingReject::TooSlow);
    }

    let score = alignment(hand_vel, note.cut_direction.vector());
    if score <= tuning.min_alignment {
        return Err(SwingReject::WrongDirection);
    }

    let depth_error = (depth - tuning.player_z).abs();
    Ok(classify(depth_error, score, tuning))
}
