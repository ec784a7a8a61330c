// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for the lyric trainer.
//!
//! Settings load from a YAML file; every field has a default so an
//! empty or missing file yields a usable configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Root configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigFile {
    /// Playback settings
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl ConfigFile {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Check the configuration for contradictions
    pub fn validate(&self) -> Result<()> {
        let p = &self.playback;
        if p.min_tempo_secs == 0 {
            anyhow::bail!("min_tempo_secs must be at least 1");
        }
        if p.min_tempo_secs > p.max_tempo_secs {
            anyhow::bail!(
                "min_tempo_secs ({}) exceeds max_tempo_secs ({})",
                p.min_tempo_secs,
                p.max_tempo_secs
            );
        }
        if p.tempo_secs < p.min_tempo_secs || p.tempo_secs > p.max_tempo_secs {
            anyhow::bail!(
                "tempo_secs ({}) outside range {}..={}",
                p.tempo_secs,
                p.min_tempo_secs,
                p.max_tempo_secs
            );
        }
        if self.display.frame_rate == 0 {
            anyhow::bail!("frame_rate must be at least 1");
        }
        Ok(())
    }
}

/// Playback settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Path to the lyric source file
    #[serde(default = "default_lyrics_path")]
    pub lyrics_path: String,
    /// Autoplay tempo in seconds per line
    #[serde(default = "default_tempo_secs")]
    pub tempo_secs: u64,
    /// Lower bound of the adjustable tempo range
    #[serde(default = "default_min_tempo_secs")]
    pub min_tempo_secs: u64,
    /// Upper bound of the adjustable tempo range
    #[serde(default = "default_max_tempo_secs")]
    pub max_tempo_secs: u64,
}

fn default_lyrics_path() -> String {
    "lyrics.txt".to_string()
}
fn default_tempo_secs() -> u64 {
    2
}
fn default_min_tempo_secs() -> u64 {
    1
}
fn default_max_tempo_secs() -> u64 {
    10
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            lyrics_path: default_lyrics_path(),
            tempo_secs: default_tempo_secs(),
            min_tempo_secs: default_min_tempo_secs(),
            max_tempo_secs: default_max_tempo_secs(),
        }
    }
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// UI refresh rate in frames per second
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

fn default_frame_rate() -> u32 {
    30
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.playback.lyrics_path, "lyrics.txt");
        assert_eq!(config.playback.tempo_secs, 2);
        assert_eq!(config.playback.min_tempo_secs, 1);
        assert_eq!(config.playback.max_tempo_secs, 10);
        assert_eq!(config.display.frame_rate, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_yaml_uses_defaults() {
        let yaml = r#"
playback:
  tempo_secs: 4
"#;
        let config = ConfigFile::from_yaml(yaml).unwrap();
        assert_eq!(config.playback.tempo_secs, 4);
        assert_eq!(config.playback.lyrics_path, "lyrics.txt");
        assert_eq!(config.display.frame_rate, 30);
    }

    #[test]
    fn test_roundtrip() {
        let mut config = ConfigFile::default();
        config.playback.lyrics_path = "songs/verse.txt".to_string();
        config.playback.tempo_secs = 3;

        let yaml = config.to_yaml().unwrap();
        let parsed = ConfigFile::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trainer.yaml");

        let config = ConfigFile::default();
        config.save(&path).unwrap();

        let loaded = ConfigFile::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut config = ConfigFile::default();
        config.playback.min_tempo_secs = 8;
        config.playback.max_tempo_secs = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_default_outside_range() {
        let mut config = ConfigFile::default();
        config.playback.tempo_secs = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_tempo() {
        let mut config = ConfigFile::default();
        config.playback.min_tempo_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(ConfigFile::load("/nonexistent/trainer.yaml").is_err());
    }
}
