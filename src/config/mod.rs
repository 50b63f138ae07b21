mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::Path;
use tracing::debug;

impl Default for Config {
    fn default() -> Self {
        Self {
            binary: None,
            local_binary: default_local_binary(),
            level: default_level(),
            error_format: ErrorFormat::default(),
            memory_limit: None,
            extra_args: Vec::new(),
            timeout_sec: default_timeout_sec(),
            default_severity: Severity::default(),
            include: default_include(),
            exclude: default_exclude(),
            config_markers: default_config_markers(),
            autoload_file: default_autoload_file(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config if the file exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level_ok = self.level == "max"
            || self
                .level
                .parse::<u8>()
                .map(|l| l <= 10)
                .unwrap_or(false);
        if !level_ok {
            return Err(ConfigError::InvalidLevel(self.level.clone()));
        }
        Ok(())
    }
}
