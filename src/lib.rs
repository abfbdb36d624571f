//! Tempo Strike - a hand-tracked rhythm-action simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, scoring state)
//! - `session`: Lifecycle driver wiring the audio clock and hand input seams
//! - `platform`: Native stand-ins for external collaborators (clock)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences persisted as JSON
//! - `highscores`: Best score persistence

pub mod error;
pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ChartError, PersistError, SessionError, TransportError, TuningError};
pub use highscores::HighScore;
pub use session::{AudioClock, HandInputProvider, Session};
pub use settings::{Leniency, Settings};
pub use tuning::Tuning;

use glam::Vec3;

/// Play-space geometry constants
pub mod consts {
    /// Fixed step used by the headless driver (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Depth of the plane the player strikes notes at
    pub const PLAYER_Z: f32 = 0.0;
    /// Depth notes appear at
    pub const SPAWN_Z: f32 = -30.0;
    /// Depth past which an unresolved note counts as missed
    pub const MISS_Z: f32 = 5.0;
    /// Scroll speed (units/s) toward the player
    pub const NOTE_SPEED: f32 = 10.0;

    /// Horizontal slot coordinates, indexed by lane
    pub const LANE_X_POSITIONS: [f32; 4] = [-1.2, -0.4, 0.4, 1.2];
    /// Vertical slot coordinates, indexed by layer
    pub const LAYER_Y_POSITIONS: [f32; 3] = [0.8, 1.4, 2.0];

    /// Health bounds
    pub const MAX_HEALTH: i32 = 100;
    pub const MIN_HEALTH: i32 = 0;
}

/// Seconds between a note appearing and its scheduled hit time
#[inline]
pub fn lead_time(spawn_z: f32, player_z: f32, speed: f32) -> f32 {
    (spawn_z - player_z).abs() / speed
}

/// Depth of a note scheduled at `note_time` when the clock reads `elapsed`
///
/// Pure function of time, so placement never depends on frame rate.
#[inline]
pub fn note_depth(note_time: f32, elapsed: f32, player_z: f32, speed: f32) -> f32 {
    player_z - (note_time - elapsed) * speed
}

/// Map a lane/layer slot to its play-space position at the given depth
///
/// Returns `None` for slots outside the fixed grid.
#[inline]
pub fn slot_position(lane: usize, layer: usize, depth: f32) -> Option<Vec3> {
    let x = consts::LANE_X_POSITIONS.get(lane)?;
    let y = consts::LAYER_Y_POSITIONS.get(layer)?;
    Some(Vec3::new(*x, *y, depth))
}

#[cfg(test)]
mod tests {
    use super::consts::*;
    use super::*;

    #[test]
    fn test_lead_time_matches_travel() {
        assert!((lead_time(SPAWN_Z, PLAYER_Z, NOTE_SPEED) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_note_depth_spawns_and_arrives() {
        let lead = lead_time(SPAWN_Z, PLAYER_Z, NOTE_SPEED);
        let at_spawn = note_depth(5.0, 5.0 - lead, PLAYER_Z, NOTE_SPEED);
        assert!((at_spawn - SPAWN_Z).abs() < 1e-4);
        assert_eq!(note_depth(5.0, 5.0, PLAYER_Z, NOTE_SPEED), PLAYER_Z);
        // Past the scheduled time the note moves beyond the player
        assert!(note_depth(5.0, 5.5, PLAYER_Z, NOTE_SPEED) > PLAYER_Z);
    }

    #[test]
    fn test_slot_position_bounds() {
        let p = slot_position(0, 2, -1.0).unwrap();
        assert_eq!(p, Vec3::new(-1.2, 2.0, -1.0));
        assert!(slot_position(4, 0, 0.0).is_none());
        assert!(slot_position(0, 3, 0.0).is_none());
    }
}
