use crate::error::ConfigError;
use analytics::scenario::{DEFAULT_BEST_CASE_MULTIPLIER, DEFAULT_WORST_CASE_MULTIPLIER};
use analytics::ScenarioMultipliers;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// The root settings structure for the application.
///
/// Every section is optional in the source; missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: Logging,
    pub scenarios: Scenarios,
}

/// Verbosity used when `RUST_LOG` is not set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Where diagnostic output goes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: LogLevel,
    /// When set, logs are written to `directory/file_name` instead of stderr.
    pub directory: Option<PathBuf>,
    pub file_name: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            directory: None,
            file_name: "bizcalc.log".to_string(),
        }
    }
}

/// Revenue multipliers for the best- and worst-case scenario runs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Scenarios {
    pub best_case_multiplier: Decimal,
    pub worst_case_multiplier: Decimal,
}

impl Default for Scenarios {
    fn default() -> Self {
        Self {
            best_case_multiplier: DEFAULT_BEST_CASE_MULTIPLIER,
            worst_case_multiplier: DEFAULT_WORST_CASE_MULTIPLIER,
        }
    }
}

impl Scenarios {
    pub fn multipliers(&self) -> ScenarioMultipliers {
        ScenarioMultipliers {
            best_case: self.best_case_multiplier,
            worst_case: self.worst_case_multiplier,
        }
    }
}

impl Settings {
    /// Checks cross-field constraints that deserialization cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.file_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.file_name must not be empty".to_string(),
            ));
        }

        let scenarios = &self.scenarios;
        if scenarios.best_case_multiplier <= Decimal::ZERO
            || scenarios.worst_case_multiplier <= Decimal::ZERO
        {
            return Err(ConfigError::ValidationError(
                "scenario multipliers must be positive".to_string(),
            ));
        }
        if scenarios.worst_case_multiplier > scenarios.best_case_multiplier {
            return Err(ConfigError::ValidationError(format!(
                "scenarios.worst_case_multiplier ({}) exceeds scenarios.best_case_multiplier ({})",
                scenarios.worst_case_multiplier, scenarios.best_case_multiplier
            )));
        }

        Ok(())
    }
}
