// Configuration management for Segue
// Handles loading/saving settings, with sensible defaults when config is missing

use anyhow::Result;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub sequencer: SequencerConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencerConfig {
    pub jazzy_factor: f64,
    pub target_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sequencer: SequencerConfig {
                jazzy_factor: 5.0,
                target_length: 10,
            },
            export: ExportConfig {
                output_path: PathBuf::from("generated-playlist.csv"),
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("segue");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.sequencer.jazzy_factor, 5.0);
        assert_eq!(config.sequencer.target_length, 10);
        assert_eq!(
            config.export.output_path,
            PathBuf::from("generated-playlist.csv")
        );
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = Config {
            sequencer: SequencerConfig {
                jazzy_factor: 2.5,
                target_length: 25,
            },
            export: ExportConfig {
                output_path: PathBuf::from("sets/warmup.csv"),
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.sequencer.jazzy_factor, 2.5);
        assert_eq!(parsed.sequencer.target_length, 25);
        assert_eq!(parsed.export.output_path, PathBuf::from("sets/warmup.csv"));
    }
}
