use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::message::{Interpolator, OnUnresolved, DEFAULT_MAX_DEPTH};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub interpolation: InterpolationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterpolationConfig {
    /// What happens to placeholders that do not resolve
    #[serde(default)]
    pub on_unresolved: OnUnresolved,
    /// Maximum number of segments in a placeholder path
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Prefix interpolated lines with the severity label
    #[serde(default = "default_severity_prefix")]
    pub severity_prefix: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_severity_prefix() -> bool {
    true
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("interpolation.on_unresolved", "leave_verbatim")?
            .set_default("interpolation.max_depth", DEFAULT_MAX_DEPTH as i64)?
            .set_default("interpolation.severity_prefix", true)?
            .set_default("logging.filter", "info")?
            .set_default("logging.format", "pretty")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // INTERPOLATION__MAX_DEPTH, INTERPOLATION__ON_UNRESOLVED, LOGGING__FORMAT, etc.
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Build an interpolator from the interpolation section
    pub fn interpolator(&self) -> Interpolator {
        self.interpolation.interpolator()
    }
}

impl InterpolationConfig {
    pub fn interpolator(&self) -> Interpolator {
        Interpolator::new()
            .with_policy(self.on_unresolved)
            .with_max_depth(self.max_depth)
            .with_severity_prefix(self.severity_prefix)
    }
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            on_unresolved: OnUnresolved::default(),
            max_depth: default_max_depth(),
            severity_prefix: default_severity_prefix(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.interpolation.on_unresolved, OnUnresolved::LeaveVerbatim);
        assert_eq!(settings.interpolation.max_depth, 64);
        assert!(settings.interpolation.severity_prefix);
        assert_eq!(settings.logging.filter, "info");
        assert_eq!(settings.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                r#"
                [interpolation]
                on_unresolved = "replace_empty"
                max_depth = 8
                severity_prefix = false

                [logging]
                format = "json"
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.interpolation.on_unresolved, OnUnresolved::ReplaceEmpty);
        assert_eq!(settings.interpolation.max_depth, 8);
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.filter, "info");

        let interpolator = settings.interpolator();
        assert_eq!(interpolator.policy(), OnUnresolved::ReplaceEmpty);
        assert_eq!(interpolator.max_depth(), 8);
        assert!(!interpolator.severity_prefix());
    }

    #[test]
    fn test_zero_max_depth_still_resolves_top_level_names() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                "[interpolation]\nmax_depth = 0\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.interpolation.max_depth, 0);
        assert_eq!(settings.interpolator().max_depth(), 1);
    }
}
