use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::PlaybackError;

/// Tunables for one playback session. Defaults match the engine's standard
/// match settings, so an empty config file is a valid config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Rounds per match.
    pub round_max: u32,
    /// Outer updates spent in the pre-round break interval.
    pub break_frames: u32,
    /// Frames per round before the timeout ends it.
    pub round_frames: u32,
    /// Selectable tick multipliers; 0 pauses playback. Playback starts on
    /// the second entry.
    pub speeds: Vec<u32>,
    /// Character roster, indexed by the header's character index.
    pub roster: Vec<String>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            round_max: 3,
            break_frames: 70,
            round_frames: 3600,
            speeds: vec![0, 1, 2, 4],
            roster: vec!["ZEN".into(), "GARNET".into(), "LUD".into()],
        }
    }
}

/// Source of playback settings. File-backed in production; tests tend to
/// inject a fixed [`PlaybackConfig`] instead.
pub trait ConfigSource: std::fmt::Debug {
    fn read_current(&self) -> Result<PlaybackConfig, PlaybackError>;
}

/// Reads a JSON settings file off disk on every call, so external tools can
/// adjust settings between sessions by rewriting the file.
#[derive(Debug, Clone)]
pub struct JsonFileConfig {
    path: PathBuf,
}

impl JsonFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for JsonFileConfig {
    fn read_current(&self) -> Result<PlaybackConfig, PlaybackError> {
        let txt = fs::read_to_string(&self.path)
            .map_err(|e| PlaybackError::ConfigIo(format!("{}: {e}", self.path.display())))?;
        serde_json::from_str::<PlaybackConfig>(&txt)
            .map_err(|e| PlaybackError::ConfigParse(format!("{}: {e}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_match_settings() {
        let cfg = PlaybackConfig::default();
        assert_eq!(cfg.round_max, 3);
        assert_eq!(cfg.break_frames, 70);
        assert_eq!(cfg.round_frames, 3600);
        assert_eq!(cfg.speeds, vec![0, 1, 2, 4]);
        assert_eq!(cfg.roster.len(), 3);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: PlaybackConfig = serde_json::from_str(r#"{ "round_max": 5 }"#).unwrap();
        assert_eq!(cfg.round_max, 5);
        assert_eq!(cfg.break_frames, 70);
        assert_eq!(cfg.speeds, vec![0, 1, 2, 4]);
    }

    #[test]
    fn json_file_config_reads_from_disk() {
        let path = std::env::temp_dir().join("taiman-playback-config-test.json");
        fs::write(&path, r#"{ "round_frames": 1800, "speeds": [0, 1, 8] }"#).unwrap();

        let cfg = JsonFileConfig::new(&path).read_current().unwrap();
        assert_eq!(cfg.round_frames, 1800);
        assert_eq!(cfg.speeds, vec![0, 1, 8]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_a_config_io_error() {
        let err = JsonFileConfig::new("/definitely/not/here.json")
            .read_current()
            .unwrap_err();
        assert!(matches!(err, PlaybackError::ConfigIo(_)));
    }
}
