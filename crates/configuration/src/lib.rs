use crate::error::ConfigError;
use config::{Environment, File};
use serde::de::DeserializeOwned;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use config::FileFormat;
pub use logging::init_logging;
pub use settings::{LogLevel, Logging, Scenarios, Settings};

/// Environment variables with this prefix override file settings, with `__`
/// separating nested keys (`BIZCALC__LOGGING__LEVEL=debug`).
pub const ENV_PREFIX: &str = "BIZCALC";
const ENV_SEPARATOR: &str = "__";

/// Loads the application settings.
///
/// Sources are layered in order: built-in defaults, the optional settings file
/// (TOML or JSON, chosen by extension), then `BIZCALC__*` environment
/// variables. The merged result is validated before it is returned.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR),
        )
        .build()?
        .try_deserialize::<Settings>()?;

    settings.validate()?;
    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}

/// Parses settings from an in-memory document, without environment overrides.
pub fn load_settings_from_str(contents: &str, format: FileFormat) -> Result<Settings, ConfigError> {
    let settings = load_request_from_str::<Settings>(contents, format)?;
    settings.validate()?;
    Ok(settings)
}

/// Reads a calculation request (or any other deserializable document) from a
/// TOML or JSON file.
pub fn load_request<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let request = config::Config::builder()
        .add_source(File::from(path).required(true))
        .build()?
        .try_deserialize::<T>()?;
    Ok(request)
}

pub fn load_request_from_str<T: DeserializeOwned>(
    contents: &str,
    format: FileFormat,
) -> Result<T, ConfigError> {
    let request = config::Config::builder()
        .add_source(File::from_str(contents, format))
        .build()?
        .try_deserialize::<T>()?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::StandardMetricsInput;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    #[test]
    fn empty_document_yields_defaults() {
        let settings = load_settings_from_str("", FileFormat::Toml).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.logging.level, LogLevel::Info);
        assert_eq!(settings.logging.file_name, "bizcalc.log");
        assert_eq!(settings.scenarios.best_case_multiplier, dec!(1.2));
        assert_eq!(settings.scenarios.worst_case_multiplier, dec!(0.8));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let toml = r#"
            [logging]
            level = "debug"
            directory = "logs"

            [scenarios]
            best_case_multiplier = 1.5
        "#;
        let settings = load_settings_from_str(toml, FileFormat::Toml).unwrap();

        assert_eq!(settings.logging.level, LogLevel::Debug);
        assert_eq!(settings.logging.directory, Some(PathBuf::from("logs")));
        assert_eq!(settings.logging.file_name, "bizcalc.log");

        let multipliers = settings.scenarios.multipliers();
        assert_eq!(multipliers.best_case, dec!(1.5));
        assert_eq!(multipliers.worst_case, dec!(0.8));
    }

    #[test]
    fn json_settings_are_accepted() {
        let json = r#"{ "scenarios": { "best_case_multiplier": "1.1", "worst_case_multiplier": "0.9" } }"#;
        let settings = load_settings_from_str(json, FileFormat::Json).unwrap();
        assert_eq!(settings.scenarios.best_case_multiplier, dec!(1.1));
        assert_eq!(settings.scenarios.worst_case_multiplier, dec!(0.9));
    }

    #[test]
    fn inverted_multipliers_fail_validation() {
        let toml = r#"
            [scenarios]
            best_case_multiplier = 0.7
        "#;
        let err = load_settings_from_str(toml, FileFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn non_positive_multiplier_fails_validation() {
        let toml = r#"
            [scenarios]
            worst_case_multiplier = 0
        "#;
        let err = load_settings_from_str(toml, FileFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn unknown_log_level_is_a_load_error() {
        let toml = r#"
            [logging]
            level = "chatty"
        "#;
        let err = load_settings_from_str(toml, FileFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn request_documents_deserialize_through_the_builder() {
        let toml = r#"
            initial_investment = 100000
            discount_rate = 8
            project_duration = 36
            yearly_revenue = 120000
            revenue_growth = 10
            operating_costs = 60000
            maintenance_costs = 12000
        "#;
        let input: StandardMetricsInput = load_request_from_str(toml, FileFormat::Toml).unwrap();
        assert_eq!(input.initial_investment, dec!(100000));
        assert_eq!(input.project_duration, 36);
        assert_eq!(input.multiplier, None);
    }

    #[test]
    fn missing_request_file_is_reported() {
        let result = load_request::<StandardMetricsInput>(Path::new("does-not-exist.toml"));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
