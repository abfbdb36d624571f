//! Per-frame simulation tick
//!
//! One call runs spawning, miss-plane retirement, collision and scoring to
//! completion. Inputs are plain snapshots and outputs are plain events, so
//! the whole step is a deterministic function of (state, input).

use serde::{Deserialize, Serialize};

use super::collision::{HandsSnapshot, evaluate_swing};
use super::note::{Accuracy, NoteStatus};
use super::state::{GameState, HitEvent, MissEvent, SessionOutcome, SessionStatus};
use crate::slot_position;
use crate::tuning::Tuning;

/// Everything the tick reads from the outside world for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Audio clock reading (seconds)
    pub elapsed: f32,
    /// Audio clock reports end of track
    pub track_ended: bool,
    pub hands: HandsSnapshot,
}

/// Events produced by one tick, in resolution order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickResult {
    pub hits: Vec<HitEvent>,
    pub misses: Vec<MissEvent>,
    /// Set on the tick that ends the session
    pub outcome: Option<SessionOutcome>,
}

impl TickResult {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.misses.is_empty() && self.outcome.is_none()
    }
}

enum Resolution {
    Keep,
    Hit(Accuracy),
    Miss,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) -> TickResult {
    let mut result = TickResult::default();

    // Only a playing session is simulated
    if state.status != SessionStatus::Playing {
        return result;
    }

    if input.track_ended {
        log::info!(
            "Track ended: score={} health={}",
            state.scoreboard.score(),
            state.scoreboard.health()
        );
        state.status = SessionStatus::Victory;
        result.outcome = Some(SessionOutcome::Victory);
        return result;
    }

    state.elapsed = input.elapsed;
    spawn_due(state, tuning);

    // Rebuild the working set instead of removing in place
    let active = std::mem::take(&mut state.active);
    let mut next = Vec::with_capacity(active.len());

    for idx in active {
        // Health ran out earlier this tick: leave the rest untouched
        if state.status != SessionStatus::Playing {
            next.push(idx);
            continue;
        }

        let resolution = {
            let slot = &state.notes[idx];
            if slot.status != NoteStatus::Active {
                // Resolved notes never re-enter the set
                continue;
            }
            let depth = tuning.depth_at(slot.def.time, input.elapsed);
            if tuning.past_miss_plane(depth) {
                Resolution::Miss
            } else {
                match evaluate_swing(&slot.def, depth, &input.hands, tuning) {
                    Ok(accuracy) => Resolution::Hit(accuracy),
                    Err(_) => Resolution::Keep,
                }
            }
        };

        match resolution {
            Resolution::Keep => next.push(idx),
            Resolution::Hit(accuracy) => {
                let slot = &mut state.notes[idx];
                slot.status = NoteStatus::Hit {
                    accuracy,
                    time: input.elapsed,
                };
                let points = state.scoreboard.apply_hit(accuracy, tuning);
                log::debug!(
                    "Hit {} ({}) +{} combo={}",
                    slot.def.id,
                    accuracy.as_str(),
                    points,
                    state.scoreboard.combo()
                );
                result.hits.push(HitEvent {
                    note_id: slot.def.id.clone(),
                    accuracy,
                    points,
                });
            }
            Resolution::Miss => {
                let slot = &mut state.notes[idx];
                slot.status = NoteStatus::Missed;
                let depleted = state.scoreboard.apply_miss(tuning);
                log::debug!(
                    "Miss {} health={}",
                    slot.def.id,
                    state.scoreboard.health()
                );
                result.misses.push(MissEvent {
                    note_id: slot.def.id.clone(),
                });

                if depleted {
                    log::info!("Health depleted: score={}", state.scoreboard.score());
                    state.status = SessionStatus::GameOver;
                    result.outcome = Some(SessionOutcome::GameOver);
                }
            }
        }
    }

    state.active = next;
    result
}

/// Promote every pending note whose lead time has been reached
///
/// The cursor only moves forward, so promoted notes are never re-examined.
fn spawn_due(state: &mut GameState, tuning: &Tuning) {
    let lead = tuning.lead_time();
    while let Some(slot) = state.notes.get_mut(state.cursor) {
        if slot.def.time - lead > state.elapsed {
            break;
        }
        if slot_position(slot.def.lane, slot.def.layer, 0.0).is_none() {
            // Still spawned; it can only resolve through the miss plane
            log::warn!(
                "Note {} has out-of-range slot lane={} layer={}",
                slot.def.id,
                slot.def.lane,
                slot.def.layer
            );
        }
        slot.status = NoteStatus::Active;
        state.active.push(state.cursor);
        state.cursor += 1;
    }
}
