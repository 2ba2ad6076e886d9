// Infrastructure (shared components)
pub mod config;
pub mod error;
pub mod telemetry;

// Interpolation engine
pub mod message;

// Log emission
pub mod logger;

pub use logger::{LogSink, MessageLogger, Severity};
pub use message::{interpolate, Context, InterpolationError, Interpolator, OnUnresolved, Value};
