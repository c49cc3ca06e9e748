//! Game settings and preferences
//!
//! Loaded from a JSON file at startup and validated once.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{FPS, SPAWN_INTERVAL_FRAMES, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::error::GameError;
use crate::locale::Language;

/// Log verbosity accepted in the settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Success,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn parse(s: &str) -> Result<Self, GameError> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "SUCCESS" => Ok(LogLevel::Success),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            _ => Err(GameError::InvalidConfiguration(format!(
                "unsupported log level '{s}', use one of TRACE, DEBUG, INFO, SUCCESS, WARNING, ERROR, CRITICAL"
            ))),
        }
    }

    /// Map onto the `log` crate's filter (SUCCESS and CRITICAL have no direct twin)
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info | LogLevel::Success => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error | LogLevel::Critical => log::LevelFilter::Error,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub window_width: f32,
    pub window_height: f32,
    pub fps: u32,
    /// Mean frames between enemy spawns
    pub spawn_interval_frames: f32,
    /// Fixed RNG seed (None = fresh seed per scene)
    pub seed: Option<u64>,

    // === Logging ===
    pub log_level: String,
    /// Include module, thread and file:line in log lines
    pub log_detailed: bool,

    // === Audio ===
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub music_volume: f32,
    pub muted: bool,

    // === Presentation ===
    pub language: Language,
    pub assets_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            fps: FPS,
            spawn_interval_frames: SPAWN_INTERVAL_FRAMES,
            seed: None,

            log_level: "INFO".to_string(),
            log_detailed: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            language: Language::English,
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, GameError> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path).map_err(|source| GameError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        LogLevel::parse(&self.log_level)?;

        if self.window_width <= 0.0 || self.window_height <= 0.0 {
            return Err(GameError::InvalidConfiguration(format!(
                "playfield must be positive, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if self.fps == 0 {
            return Err(GameError::InvalidConfiguration("fps must be > 0".into()));
        }
        if !(self.spawn_interval_frames >= 1.0) {
            return Err(GameError::InvalidConfiguration(format!(
                "spawn_interval_frames must be >= 1, got {}",
                self.spawn_interval_frames
            )));
        }
        for (name, vol) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("music_volume", self.music_volume),
        ] {
            if !(0.0..=1.0).contains(&vol) {
                return Err(GameError::InvalidConfiguration(format!(
                    "{name} must be within 0.0-1.0, got {vol}"
                )));
            }
        }
        Ok(())
    }

    pub fn log_level(&self) -> Result<LogLevel, GameError> {
        LogLevel::parse(&self.log_level)
    }

    /// Effective sound effect volume
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "log_level": "debug", "seed": 7 }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.log_level().unwrap(), LogLevel::Debug);
        assert_eq!(settings.window_width, WINDOW_WIDTH);
    }

    #[test]
    fn test_unknown_log_level_is_invalid_configuration() {
        let err = Settings::from_json(r#"{ "log_level": "loud" }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_volume_out_of_range_rejected() {
        let settings = Settings {
            sfx_volume: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::parse("Success").unwrap().to_filter(), log::LevelFilter::Info);
        assert_eq!(LogLevel::parse("CRITICAL").unwrap().to_filter(), log::LevelFilter::Error);
    }

    #[test]
    fn test_muted_silences_everything() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/space-plane.json")).unwrap();
        assert_eq!(settings.fps, FPS);
    }
}
