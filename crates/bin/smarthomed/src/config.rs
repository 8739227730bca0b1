//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `smarthome.toml` in the working directory unless another path
//! is given. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use smarthome_domain::automation::DEFAULT_ENERGY_SAVING_COOLDOWN;

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "smarthome.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Automation rule settings.
    pub automation: AutomationConfig,
    /// Controller settings.
    pub controller: ControllerConfig,
    /// Audit log settings.
    pub audit: AuditConfig,
    /// Scenario to run.
    pub scenario: ScenarioConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    /// Logical time units before an idle group is switched off.
    pub energy_saving_cooldown: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Maximum undo history length. Unbounded when absent.
    pub history_cap: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// File the audit log is flushed to. Records stay in memory when absent.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub path: PathBuf,
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SMARTHOME_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("SMARTHOME_SCENARIO") {
            self.scenario.path = PathBuf::from(val);
        }
        if let Some(val) = var("SMARTHOME_AUDIT_PATH") {
            self.audit.path = Some(PathBuf::from(val));
        }
        if let Some(cooldown) = var("SMARTHOME_COOLDOWN").and_then(|val| val.parse().ok()) {
            self.automation.energy_saving_cooldown = cooldown;
        }
        if let Some(cap) = var("SMARTHOME_HISTORY_CAP").and_then(|val| val.parse().ok()) {
            self.controller.history_cap = Some(cap);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.automation.energy_saving_cooldown < 0 {
            return Err(ConfigError::Validation(
                "energy_saving_cooldown must not be negative".to_string(),
            ));
        }
        if self.controller.history_cap == Some(0) {
            return Err(ConfigError::Validation(
                "history_cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthomed=info,smarthome_app=info,audit=info".to_string(),
        }
    }
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            energy_saving_cooldown: DEFAULT_ENERGY_SAVING_COOLDOWN,
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("scenario.toml"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
