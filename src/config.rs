//! Configuration management
//!
//! Config is stored at ~/.config/subcarousel/config.toml. Every key is
//! optional; missing keys take their default.

use crate::error::CarouselError;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Delay between ticks while playing (16ms is one frame at ~60Hz)
    pub tick_interval_ms: u64,
    /// Seconds moved by a plain forward/backward seek
    pub seek_step_secs: f64,
    /// Maximum length of the media label in the title
    pub label_max_chars: usize,
    /// Initial playback rate
    pub playback_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            seek_step_secs: 2.5,
            label_max_chars: 10,
            playback_rate: 1.0,
        }
    }
}

impl Config {
    /// Get config file path (~/.config/subcarousel/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("subcarousel").join("config.toml"))
    }

    /// Load config from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist. The default location may be absent, in
    /// which case the defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: '{}'", path.display()))?;
        let config = Self::from_toml(&raw)
            .with_context(|| format!("Failed to load config file: '{}'", path.display()))?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CarouselError> {
        let invalid = |msg: &str| Err(CarouselError::InvalidConfig(msg.to_string()));
        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms must be positive");
        }
        if !(self.seek_step_secs > 0.0) {
            return invalid("seek_step_secs must be positive");
        }
        if !(self.playback_rate > 0.0) {
            return invalid("playback_rate must be positive");
        }
        Ok(())
    }
}
