//! Autoplay hands for demo/attract mode
//!
//! Puppets the matching hand onto the earliest due note with a clean swing
//! along its cut direction, so a session can run without hand tracking.

use glam::Vec3;

use super::collision::{HandState, HandsSnapshot};
use super::note::Side;
use super::state::GameState;
use crate::slot_position;
use crate::tuning::Tuning;

/// Swing speed used for puppeted strikes
pub const AUTOPLAY_SWING_SPEED: f32 = 2.0;

/// Where idle hands rest (roughly chest height, at the player plane)
const REST_LEFT: Vec3 = Vec3::new(-0.6, 1.0, 0.0);
const REST_RIGHT: Vec3 = Vec3::new(0.6, 1.0, 0.0);

/// Build a hand snapshot that strikes whatever is due at `elapsed`
pub fn hands_for(state: &GameState, elapsed: f32, tuning: &Tuning) -> HandsSnapshot {
    let mut hands = HandsSnapshot {
        left: HandState::new(REST_LEFT, Vec3::ZERO),
        right: HandState::new(REST_RIGHT, Vec3::ZERO),
    };

    let mut left_done = false;
    let mut right_done = false;

    for slot in state.active_notes() {
        let depth = tuning.depth_at(slot.def.time, elapsed);
        // Wait for the note to reach the perfect band
        if (depth - tuning.player_z).abs() >= tuning.perfect_depth {
            continue;
        }
        let Some(pos) = slot_position(slot.def.lane, slot.def.layer, depth) else {
            continue;
        };
        let dir = slot.def.cut_direction.vector().unwrap_or(Vec3::NEG_Y);
        let hand = HandState::new(pos, dir * AUTOPLAY_SWING_SPEED);

        match slot.def.side {
            Side::Left if !left_done => {
                hands.left = hand;
                left_done = true;
            }
            Side::Right if !right_done => {
                hands.right = hand;
                right_done = true;
            }
            _ => {}
        }

        if left_done && right_done {
            break;
        }
    }

    hands
}
