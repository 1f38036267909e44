//! Configuration loading for the gauge CLI.
//!
//! Resolution order (highest to lowest priority):
//! 1. Explicit `--config <path>` flag
//! 2. `GAUGE_CONFIG` environment variable
//! 3. XDG config home (`~/.config/acmg-gauge/config.toml`)
//! 4. Built-in defaults
//!
//! An explicitly named file (1 or 2) must exist. The XDG file is optional.
//! CLI flags such as `--format` are applied on top of the loaded values by
//! the binary.

use crate::logging::LogConfig;
use gauge_common::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG_PATH: &str = "GAUGE_CONFIG";

/// Config directory name under the XDG config home.
const CONFIG_DIR_NAME: &str = "acmg-gauge";

/// Config file name.
const CONFIG_FILENAME: &str = "config.toml";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid TOML in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ConfigError> for gauge_common::Error {
    fn from(err: ConfigError) -> Self {
        match &err {
            ConfigError::ParseError { path, source } => gauge_common::Error::InvalidConfig {
                path: path.display().to_string(),
                message: source.message().to_string(),
            },
            _ => gauge_common::Error::Config(err.to_string()),
        }
    }
}

/// Where the configuration came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    /// Explicitly provided via `--config`.
    CliArgument,
    /// Named by the GAUGE_CONFIG environment variable.
    Environment,
    /// Found in the XDG config directory.
    XdgConfig,
    /// No file; built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// `[output]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format when `--format` is not given.
    pub format: OutputFormat,
}

/// Contents of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GaugeConfig {
    pub output: OutputConfig,
    pub log: LogConfig,
}

impl GaugeConfig {
    /// Parse config.toml contents.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a config file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }
}

/// Configuration with provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub config: GaugeConfig,
    /// File the config was read from (None for defaults).
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Configuration resolution options.
#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    /// Explicit config file (highest priority).
    pub config_path: Option<PathBuf>,
    /// Value of GAUGE_CONFIG, if set.
    pub env_path: Option<PathBuf>,
    /// XDG config home override; `None` means ask `dirs`.
    pub config_home: Option<PathBuf>,
}

impl ConfigOptions {
    /// Options from the CLI flag plus the process environment.
    pub fn from_env(config_path: Option<PathBuf>) -> Self {
        ConfigOptions {
            config_path,
            env_path: std::env::var_os(ENV_CONFIG_PATH)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            config_home: None,
        }
    }
}

/// Default location of config.toml under the XDG config home.
pub fn default_config_path(config_home: Option<&Path>) -> Option<PathBuf> {
    let home = match config_home {
        Some(home) => home.to_path_buf(),
        None => dirs::config_dir()?,
    };
    Some(home.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME))
}

/// Load configuration with the standard resolution order.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    let explicit = options
        .config_path
        .as_ref()
        .map(|p| (p, ConfigSource::CliArgument))
        .or_else(|| {
            options
                .env_path
                .as_ref()
                .map(|p| (p, ConfigSource::Environment))
        });

    let resolved = if let Some((path, source)) = explicit {
        ResolvedConfig {
            config: GaugeConfig::load_file(path)?,
            path: Some(path.clone()),
            source,
        }
    } else {
        match default_config_path(options.config_home.as_deref()) {
            Some(path) if path.exists() => ResolvedConfig {
                config: GaugeConfig::load_file(&path)?,
                path: Some(path),
                source: ConfigSource::XdgConfig,
            },
            _ => ResolvedConfig {
                config: GaugeConfig::default(),
                path: None,
                source: ConfigSource::BuiltinDefault,
            },
        }
    };

    Ok(resolved)
}
