use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    /// PHPStan executable; when unset, the project's own install is
    /// preferred over `phpstan` on PATH
    #[serde(default)]
    pub binary: Option<PathBuf>,

    /// Project-local executable looked up relative to each ancestor directory
    #[serde(default = "default_local_binary")]
    pub local_binary: PathBuf,

    /// Rule level used when no PHPStan config file is found
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub error_format: ErrorFormat,

    #[serde(default)]
    pub memory_limit: Option<String>,

    #[serde(default)]
    pub extra_args: Vec<String>,

    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,

    /// Severity for findings from the raw error format
    #[serde(default)]
    pub default_severity: Severity,

    #[serde(default = "default_include")]
    pub include: Vec<String>,

    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// File names marking a PHPStan project root
    #[serde(default = "default_config_markers")]
    pub config_markers: Vec<String>,

    /// Autoloader looked up relative to each ancestor directory
    #[serde(default = "default_autoload_file")]
    pub autoload_file: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ErrorFormat {
    #[default]
    Json,
    Raw,
}

impl ErrorFormat {
    pub fn as_arg(&self) -> &'static str {
        match self {
            ErrorFormat::Json => "--error-format=json",
            ErrorFormat::Raw => "--error-format=raw",
        }
    }
}

impl std::str::FromStr for ErrorFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ErrorFormat::Json),
            "raw" => Ok(ErrorFormat::Raw),
            _ => Err(format!("Unknown error format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
