use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use crate::playback::DEFAULT_STEP_DELAY;

/// Environment override for `[playback] step_delay_ms`.
pub const STEP_DELAY_ENV: &str = "COFACTOR_STEP_DELAY_MS";

#[derive(Debug, Default, Deserialize)]
pub struct CofactorConfig {
    pub app: Option<AppConfig>,
    pub playback: Option<PlaybackConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for borders and markers.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

/// Playback timing.
///
/// ```toml
/// [playback]
/// step_delay_ms = 1500
/// autoplay = false
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct PlaybackConfig {
    pub step_delay_ms: Option<u64>,
    /// Start playing as soon as a calculation finishes.
    #[serde(default)]
    pub autoplay: bool,
}

impl CofactorConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load from an explicit path. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Effective delay between automatic advances.
    ///
    /// Precedence: environment, then config file, then the default. Zero is
    /// ignored at every level.
    #[must_use]
    pub fn step_delay(&self) -> Duration {
        let from_env = env::var(STEP_DELAY_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok());
        let from_file = self.playback.as_ref().and_then(|p| p.step_delay_ms);

        from_env
            .filter(|ms| *ms > 0)
            .or(from_file.filter(|ms| *ms > 0))
            .map_or(DEFAULT_STEP_DELAY, Duration::from_millis)
    }

    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.playback.as_ref().is_some_and(|p| p.autoplay)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cofactor").join("config.toml"))
}
