//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted config inside a config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

const APP_NAME: &str = "equicube";

/// Top-level converter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Face rendering settings.
    pub conversion: ConversionConfig,
    /// Folder-mode settings.
    pub batch: BatchConfig,
    /// Logging settings.
    pub debug: DebugConfig,
}

/// Face rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConversionConfig {
    /// Output face edge length in pixels. Must be positive.
    pub face_size: u32,
    /// Worker threads rendering faces. 1 renders on the calling thread,
    /// 0 uses one worker per logical CPU.
    pub workers: usize,
}

/// What a folder run does when one input file fails.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the whole run at the first failing file.
    #[default]
    Abort,
    /// Record the failure and carry on with the next file.
    Continue,
}

/// Folder-mode configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    /// Per-file failure handling.
    pub failure_policy: FailurePolicy,
    /// Stage the six faces in a temporary sibling folder and move them into
    /// place only once all six are written.
    pub atomic_output: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level filter (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to `equicube.log` in the log directory.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            face_size: 1024,
            workers: 1,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

/// The platform config directory for equicube (`~/.config/equicube` on Linux).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Validate ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::load(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Load config from an explicit RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Reject values the converter cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.conversion.face_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "conversion.face_size",
                reason: "must be a positive number of pixels".to_string(),
            });
        }
        Ok(())
    }
}
