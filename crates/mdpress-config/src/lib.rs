use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Playback timing and upload limits. Every field has a default matching
/// the timings the target editor is known to keep up with, so a partial
/// config file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Simulated typing time per character, in milliseconds.
    #[serde(default = "default_pacing_char_ms")]
    pub pacing_char_ms: u64,
    /// Settle-wait after each block, in milliseconds.
    #[serde(default = "default_pacing_settle_ms")]
    pub pacing_settle_ms: u64,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

fn default_pacing_char_ms() -> u64 {
    2
}

fn default_pacing_settle_ms() -> u64 {
    5000
}

fn default_max_upload_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pacing_char_ms: default_pacing_char_ms(),
            pacing_settle_ms: default_pacing_settle_ms(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/mdpress");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/mdpress/config.toml"));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let result = Config::load_from_path(dir.path().join("config.toml")).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.pacing_char_ms, 2);
        assert_eq!(config.pacing_settle_ms, 5000);
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "pacing_settle_ms = 100\n").unwrap();

        let config = Config::load_from_path(&path).unwrap().unwrap();
        assert_eq!(config.pacing_settle_ms, 100);
        assert_eq!(config.pacing_char_ms, 2);
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            pacing_char_ms: 0,
            pacing_settle_ms: 250,
            max_upload_bytes: 1024,
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "pacing_char_ms = \"not a number\"").unwrap();

        let result = Config::load_from_path(&path);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }
}
