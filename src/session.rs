//! Session lifecycle and the seams to external collaborators
//!
//! The audio transport and the hand tracker live outside this crate. A
//! `Session` polls both once per update, runs a tick, and drives the
//! `Loading -> Idle -> Playing -> {Victory, GameOver} -> Idle` lifecycle.

use crate::error::{SessionError, TransportError};
use crate::sim::{
    Chart, GameState, HandsSnapshot, NoteSlot, SessionOutcome, SessionStatus, TickInput,
    TickResult, tick,
};
use crate::tuning::Tuning;

/// Audio playback clock
pub trait AudioClock {
    /// Seconds since the start of the track; non-decreasing while playing
    fn elapsed_seconds(&self) -> f32;
    fn has_ended(&self) -> bool;
    /// Start playback; resolves once the transport is actually running
    fn play(&mut self) -> Result<(), TransportError>;
    fn pause(&mut self);
    /// Rewind to the start of the track
    fn seek_start(&mut self);
}

/// Current-frame hand tracking snapshot
pub trait HandInputProvider {
    fn hand_state(&self) -> HandsSnapshot;
}

impl HandInputProvider for HandsSnapshot {
    fn hand_state(&self) -> HandsSnapshot {
        *self
    }
}

/// One play session over a chart template
pub struct Session<C: AudioClock> {
    chart: Chart,
    state: GameState,
    clock: C,
    tuning: Tuning,
    /// Added to the clock reading (calibration)
    audio_offset: f32,
}

impl<C: AudioClock> Session<C> {
    pub fn new(chart: Chart, clock: C, tuning: Tuning) -> Self {
        let mut state = GameState::new(&chart);
        state.status = SessionStatus::Loading;
        Self {
            chart,
            state,
            clock,
            tuning,
            audio_offset: 0.0,
        }
    }

    /// Set the calibration offset in seconds
    pub fn with_audio_offset(mut self, offset: f32) -> Self {
        self.audio_offset = offset;
        self
    }

    /// External collaborators are up; allow starting
    pub fn mark_ready(&mut self) {
        if self.state.status == SessionStatus::Loading {
            log::info!("Session ready");
            self.state.status = SessionStatus::Idle;
        }
    }

    /// Begin playing from a fresh copy of the chart
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state.status != SessionStatus::Idle {
            return Err(SessionError::NotIdle(self.state.status));
        }

        self.state = GameState::new(&self.chart);
        self.clock.seek_start();
        if let Err(e) = self.clock.play() {
            log::warn!("Session start failed: {}", e);
            return Err(e.into());
        }

        self.state.status = SessionStatus::Playing;
        log::info!("Session started ({} notes)", self.chart.len());
        Ok(())
    }

    /// Poll inputs once and advance one tick
    pub fn update(&mut self, hands: &impl HandInputProvider) -> TickResult {
        if self.state.status != SessionStatus::Playing {
            return TickResult::default();
        }

        let input = TickInput {
            elapsed: self.elapsed(),
            track_ended: self.clock.has_ended(),
            hands: hands.hand_state(),
        };
        let result = tick(&mut self.state, &input, &self.tuning);

        if let Some(outcome) = result.outcome {
            self.end(outcome);
        }
        result
    }

    /// Force a running session to end (cancellation)
    pub fn abort(&mut self) -> Option<SessionOutcome> {
        if self.state.status != SessionStatus::Playing {
            return None;
        }
        self.state.status = SessionStatus::GameOver;
        self.end(SessionOutcome::GameOver);
        Some(SessionOutcome::GameOver)
    }

    /// Return to `Idle`, discarding the run state
    ///
    /// A session still playing is aborted first. Returns false from
    /// `Loading` or `Idle`, where there is nothing to reset.
    pub fn restart(&mut self) -> bool {
        self.abort();
        if !self.state.status.is_finished() {
            return false;
        }
        self.state = GameState::new(&self.chart);
        self.clock.seek_start();
        log::info!("Session reset");
        true
    }

    fn end(&mut self, outcome: SessionOutcome) {
        self.clock.pause();
        log::info!(
            "Session ended: {:?} score={} resolved={}/{}",
            outcome,
            self.state.scoreboard.score(),
            self.state.resolved_count(),
            self.chart.len()
        );
    }

    /// Calibrated clock reading used for ticks
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed_seconds() + self.audio_offset
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    pub fn score(&self) -> u64 {
        self.state.scoreboard.score()
    }

    pub fn combo(&self) -> u32 {
        self.state.scoreboard.combo()
    }

    pub fn multiplier(&self) -> u32 {
        self.state.scoreboard.multiplier()
    }

    pub fn health(&self) -> i32 {
        self.state.scoreboard.health()
    }

    pub fn notes(&self) -> &[NoteSlot] {
        self.state.notes()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SimulatedClock;
    use crate::sim::{CutDirection, HandState, NoteDef, Side};
    use glam::Vec3;

    fn chart() -> Chart {
        Chart::new(vec![NoteDef {
            id: "n1".into(),
            time: 2.0,
            lane: 0,
            layer: 0,
            side: Side::Left,
            cut_direction: CutDirection::Any,
        }])
        .unwrap()
    }

    fn ready_session(track_len: f32) -> Session<SimulatedClock> {
        let mut session = Session::new(chart(), SimulatedClock::new(track_len), Tuning::default());
        session.mark_ready();
        session
    }

    #[test]
    fn test_lifecycle() {
        let mut session = Session::new(chart(), SimulatedClock::new(5.0), Tuning::default());
        assert_eq!(session.status(), SessionStatus::Loading);
        assert!(matches!(session.start(), Err(SessionError::NotIdle(SessionStatus::Loading))));

        session.mark_ready();
        assert_eq!(session.status(), SessionStatus::Idle);
        session.start().unwrap();
        assert_eq!(session.status(), SessionStatus::Playing);
        assert!(session.clock().is_playing());
    }

    #[test]
    fn test_transport_failure_stays_idle() {
        let mut session = Session::new(
            chart(),
            SimulatedClock::new(5.0).failing("device busy"),
            Tuning::default(),
        );
        session.mark_ready();
        let err = session.start().unwrap_err();
        assert!(matches!(err, SessionError::Transport(_)));
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(session.update(&HandsSnapshot::default()).is_empty());
    }

    #[test]
    fn test_hit_through_session() {
        let mut session = ready_session(5.0);
        session.start().unwrap();
        session.clock_mut().advance(2.0);

        let hands = HandsSnapshot {
            left: HandState::new(Vec3::new(-1.2, 0.8, 0.0), Vec3::NEG_Y),
            right: HandState::default(),
        };
        let result = session.update(&hands);
        assert_eq!(result.hits.len(), 1);
        assert_eq!(session.score(), 115);
        assert_eq!(session.combo(), 1);
        assert_eq!(session.multiplier(), 1);
        assert_eq!(session.health(), 100);
    }

    #[test]
    fn test_victory_pauses_clock() {
        let mut session = ready_session(3.0);
        session.start().unwrap();
        session.clock_mut().advance(3.5);

        let result = session.update(&HandsSnapshot::default());
        assert_eq!(result.outcome, Some(SessionOutcome::Victory));
        assert_eq!(session.status(), SessionStatus::Victory);
        assert!(!session.clock().is_playing());
    }

    #[test]
    fn test_restart_uses_fresh_chart() {
        let mut session = ready_session(10.0);
        session.start().unwrap();
        session.clock_mut().advance(3.0);
        let result = session.update(&HandsSnapshot::default());
        assert_eq!(result.misses.len(), 1);
        assert_eq!(session.health(), 85);

        assert_eq!(session.abort(), Some(SessionOutcome::GameOver));
        assert_eq!(session.abort(), None);
        assert!(session.restart());
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(!session.restart(), "nothing to reset while idle");

        session.start().unwrap();
        assert_eq!(session.health(), 100);
        assert_eq!(session.score(), 0);
        assert!(session.notes().iter().all(|n| !n.status.is_resolved()));
        assert_eq!(session.chart().notes()[0].id, "n1");
        assert_eq!(session.clock().elapsed_seconds(), 0.0);
    }

    #[test]
    fn test_restart_while_playing_aborts() {
        let mut session = ready_session(10.0);
        session.start().unwrap();
        session.clock_mut().advance(3.0);
        session.update(&HandsSnapshot::default());
        assert_eq!(session.health(), 85);

        assert!(session.restart());
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(!session.clock().is_playing());
        assert_eq!(session.clock().elapsed_seconds(), 0.0);
        assert_eq!(session.health(), 100);

        // Ticks are ignored until the next start
        session.clock_mut().advance(1.0);
        assert!(session.update(&HandsSnapshot::default()).is_empty());
    }

    #[test]
    fn test_audio_offset_shifts_clock() {
        let mut session = ready_session(10.0).with_audio_offset(0.5);
        session.start().unwrap();
        session.clock_mut().advance(1.5);

        let hands = HandsSnapshot {
            left: HandState::new(Vec3::new(-1.2, 0.8, 0.0), Vec3::NEG_Y),
            right: HandState::default(),
        };
        let result = session.update(&hands);
        assert_eq!(result.hits.len(), 1);
        assert_eq!(session.notes()[0].hit_time(), Some(2.0));
    }
}
