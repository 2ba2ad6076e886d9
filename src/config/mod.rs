mod settings;

pub use settings::{InterpolationConfig, LogFormat, LoggingConfig, Settings};
