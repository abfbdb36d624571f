//! Platform abstraction layer
//!
//! Native stand-ins for the collaborators a real host provides:
//! - Audio clock (manually advanced track time)

use crate::error::TransportError;
use crate::session::AudioClock;

/// A track clock advanced by the host loop instead of an audio device
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    elapsed: f32,
    track_length: f32,
    playing: bool,
    /// When set, `play` fails with this message
    fail_start: Option<String>,
}

impl SimulatedClock {
    pub fn new(track_length: f32) -> Self {
        Self {
            elapsed: 0.0,
            track_length: track_length.max(0.0),
            playing: false,
            fail_start: None,
        }
    }

    /// Make every `play` call fail (transport unavailable)
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.fail_start = Some(reason.into());
        self
    }

    /// Move track time forward; no-op while paused
    pub fn advance(&mut self, dt: f32) {
        if self.playing && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.track_length);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn track_length(&self) -> f32 {
        self.track_length
    }
}

impl AudioClock for SimulatedClock {
    fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }

    fn has_ended(&self) -> bool {
        self.elapsed >= self.track_length
    }

    fn play(&mut self) -> Result<(), TransportError> {
        if let Some(reason) = &self.fail_start {
            return Err(TransportError(reason.clone()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek_start(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_only_while_playing() {
        let mut clock = SimulatedClock::new(2.0);
        clock.advance(1.0);
        assert_eq!(clock.elapsed_seconds(), 0.0);

        clock.play().unwrap();
        clock.advance(1.0);
        assert_eq!(clock.elapsed_seconds(), 1.0);
        assert!(!clock.has_ended());

        clock.advance(5.0);
        assert_eq!(clock.elapsed_seconds(), 2.0);
        assert!(clock.has_ended());

        clock.pause();
        clock.seek_start();
        assert_eq!(clock.elapsed_seconds(), 0.0);
        assert!(!clock.is_playing());
    }

    #[test]
    fn test_failing_transport() {
        let mut clock = SimulatedClock::new(1.0).failing("no device");
        assert_eq!(clock.play(), Err(TransportError("no device".into())));
        assert!(!clock.is_playing());
    }
}
