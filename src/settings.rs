//! Player settings and preferences
//!
//! Persisted separately from high scores as a JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::tuning::Tuning;

/// How forgiving the hit detection is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Leniency {
    Strict,
    #[default]
    Normal,
    Relaxed,
}

impl Leniency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Leniency::Strict => "Strict",
            Leniency::Normal => "Normal",
            Leniency::Relaxed => "Relaxed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" | "hard" => Some(Leniency::Strict),
            "normal" => Some(Leniency::Normal),
            "relaxed" | "easy" => Some(Leniency::Relaxed),
            _ => None,
        }
    }

    /// Scale applied to hit window, reach and tier depths
    pub fn tolerance_scale(&self) -> f32 {
        match self {
            Leniency::Strict => 0.8,
            Leniency::Normal => 1.0,
            Leniency::Relaxed => 1.25,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub leniency: Leniency,
    /// Calibration added to the audio clock (milliseconds)
    pub audio_offset_ms: f32,
    /// Music volume (0.0 - 1.0), forwarded to the audio host
    pub music_volume: f32,
    /// Balance overrides; defaults when absent
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            leniency: Leniency::Normal,
            audio_offset_ms: 0.0,
            music_volume: 0.8,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Create settings from a leniency preset
    pub fn from_leniency(leniency: Leniency) -> Self {
        Self {
            leniency,
            ..Self::default()
        }
    }

    /// Tuning after applying the leniency preset
    pub fn effective_tuning(&self) -> Tuning {
        self.tuning.scaled(self.leniency.tolerance_scale())
    }

    /// Calibration offset in seconds
    pub fn audio_offset(&self) -> f32 {
        self.audio_offset_ms / 1000.0
    }

    /// Effective music volume, clamped
    pub fn effective_music_volume(&self) -> f32 {
        self.music_volume.clamp(0.0, 1.0)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => match settings.effective_tuning().validate() {
                    Ok(()) => {
                        log::info!("Loaded settings from {}", path.display());
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring settings file {}: {}", path.display(), e),
                },
                Err(e) => log::warn!("Ignoring invalid settings file {}: {}", path.display(), e),
            },
            Err(e) => log::info!("No settings at {} ({}), using defaults", path.display(), e),
        }
        Self::default()
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("tempo-strike-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_leniency_parse() {
        assert_eq!(Leniency::from_str("EASY"), Some(Leniency::Relaxed));
        assert_eq!(Leniency::from_str("strict"), Some(Leniency::Strict));
        assert_eq!(Leniency::from_str("nope"), None);
        assert_eq!(Leniency::Normal.as_str(), "Normal");
    }

    #[test]
    fn test_effective_tuning() {
        assert_eq!(Settings::default().effective_tuning(), Tuning::default());

        let strict = Settings::from_leniency(Leniency::Strict).effective_tuning();
        assert!(strict.hit_radius < Tuning::default().hit_radius);
        assert_eq!(strict.miss_penalty, Tuning::default().miss_penalty);
    }

    #[test]
    fn test_offset_and_volume() {
        let settings = Settings {
            audio_offset_ms: -40.0,
            music_volume: 1.7,
            ..Settings::default()
        };
        assert!((settings.audio_offset() + 0.04).abs() < 1e-6);
        assert_eq!(settings.effective_music_volume(), 1.0);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = temp_path("settings.json");
        let settings = Settings {
            leniency: Leniency::Relaxed,
            audio_offset_ms: 25.0,
            ..Settings::default()
        };
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path);
        assert_eq!(loaded.leniency, Leniency::Relaxed);
        assert_eq!(loaded.audio_offset_ms, 25.0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_falls_back() {
        let missing = Settings::load(temp_path("missing.json"));
        assert_eq!(missing.leniency, Leniency::Normal);

        let path = temp_path("garbage.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path).music_volume, 0.8);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_broken_tuning() {
        let path = temp_path("stalled.json");
        fs::write(
            &path,
            r#"{ "leniency": "Relaxed", "tuning": { "note_speed": 0.0 } }"#,
        )
        .unwrap();

        let loaded = Settings::load(&path);
        assert_eq!(loaded.leniency, Leniency::Normal);
        assert_eq!(loaded.tuning, Tuning::default());
        let _ = fs::remove_file(&path);
    }
}
