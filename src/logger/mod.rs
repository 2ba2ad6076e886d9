//! Log emission on top of the interpolation engine.
//!
//! A [`MessageLogger`] takes `(severity, template, context)`, interpolates the
//! line with the severity label as prefix, and hands the result to a
//! [`LogSink`].

mod severity;
mod sink;

pub use severity::Severity;
pub use sink::{LogSink, MemorySink, TracingSink};

use crate::message::{Context, InterpolationResult, Interpolator};

/// Interpolating logger writing to a sink
#[derive(Debug, Clone)]
pub struct MessageLogger<S> {
    interpolator: Interpolator,
    sink: S,
}

impl<S: LogSink> MessageLogger<S> {
    pub fn new(sink: S) -> Self {
        Self::with_interpolator(Interpolator::new(), sink)
    }

    pub fn with_interpolator(interpolator: Interpolator, sink: S) -> Self {
        Self { interpolator, sink }
    }

    pub fn interpolator(&self) -> &Interpolator {
        &self.interpolator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Interpolate and write one line. Nothing is written if interpolation fails.
    pub fn log(
        &self,
        severity: Severity,
        template: &str,
        context: &Context,
    ) -> InterpolationResult<()> {
        let line = self
            .interpolator
            .interpolate(Some(severity.as_str()), template, context)?;
        self.sink.write(severity, &line);
        Ok(())
    }

    pub fn emergency(&self, template: &str, context: &Context) -> InterpolationResult<()> {
        self.log(Severity::Emergency, template, context)
    }

    pub fn alert(&self, template: &str, context: &Context) -> InterpolationResult<()> {
        self.log(Severity::Alert, template, context)
    }

    pub fn critical(&self, template: &str, context: &Context) -> InterpolationResult<()> {
        self.log(Severity::Critical, template, context)
    }

    pub fn error(&self, template: &str, context: &Context) -> InterpolationResult<()> {
        self.log(Severity::Error, template, context)
    }

    pub fn warning(&self, template: &str, context: &Context) -> InterpolationResult<()> {
        self.log(Severity::Warning, template, context)
    }

    pub fn notice(&self, template: &str, context: &Context) -> InterpolationResult<()> {
        self.log(Severity::Notice, template, context)
    }

    pub fn info(&self, template: &str, context: &Context) -> InterpolationResult<()> {
        self.log(Severity::Info, template, context)
    }

    pub fn debug(&self, template: &str, context: &Context) -> InterpolationResult<()> {
        self.log(Severity::Debug, template, context)
    }
}
