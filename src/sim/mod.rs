//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Note placement is a function of the audio clock only
//! - Stable iteration order (chart order, oldest spawn first)
//! - No rendering, audio or platform dependencies

pub mod autoplay;
pub mod chart;
pub mod collision;
pub mod note;
pub mod state;
pub mod tick;

pub use chart::{Chart, DEMO_BPM};
pub use collision::{HandState, HandsSnapshot, SwingReject, alignment, classify, evaluate_swing};
pub use note::{Accuracy, CutDirection, NoteDef, NoteSlot, NoteStatus, Side};
pub use state::{
    GameState, HitEvent, MissEvent, Scoreboard, SessionOutcome, SessionStatus,
    multiplier_for_combo,
};
pub use tick::{TickInput, TickResult, tick};
