use thiserror::Error;

use crate::message::InterpolationError;
use crate::telemetry::TelemetryError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    #[error("Invalid context JSON: {0}")]
    ContextJson(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
}

impl AppError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Interpolation(InterpolationError::InvalidPlaceholder(_)) => {
                "VALIDATION_ERROR"
            }
            AppError::Interpolation(InterpolationError::InvalidContext { .. })
            | AppError::Interpolation(InterpolationError::InvalidContextRoot(_)) => {
                "INVALID_CONTEXT"
            }
            AppError::Interpolation(InterpolationError::Stringification { .. }) => {
                "STRINGIFICATION_ERROR"
            }
            AppError::Interpolation(InterpolationError::PathTooDeep { .. }) => "PATH_TOO_DEEP",
            AppError::ContextJson(_) => "CONTEXT_JSON_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Telemetry(_) => "TELEMETRY_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
