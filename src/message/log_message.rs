//! Log message holding a template and its processed text

use super::context::Context;
use super::interpolator::Interpolator;
use super::types::InterpolationResult;

/// A message interpolated once on construction
#[derive(Debug, Clone)]
pub struct LogMessage {
    interpolator: Interpolator,
    severity: Option<String>,
    template: String,
    context: Context,
    processed: String,
}

impl LogMessage {
    /// Build and interpolate a message with the default engine
    pub fn new(
        severity: Option<&str>,
        template: impl Into<String>,
        context: Context,
    ) -> InterpolationResult<Self> {
        Self::with_interpolator(&Interpolator::new(), severity, template, context)
    }

    pub fn with_interpolator(
        interpolator: &Interpolator,
        severity: Option<&str>,
        template: impl Into<String>,
        context: Context,
    ) -> InterpolationResult<Self> {
        let template = template.into();
        let processed = interpolator.interpolate(severity, &template, &context)?;

        Ok(Self {
            interpolator: *interpolator,
            severity: severity.map(str::to_string),
            template,
            context,
            processed,
        })
    }

    /// Replace template and context, interpolating again with the same engine
    pub fn set(
        &mut self,
        template: impl Into<String>,
        context: Context,
    ) -> InterpolationResult<&mut Self> {
        let template = template.into();
        self.processed =
            self.interpolator
                .interpolate(self.severity.as_deref(), &template, &context)?;
        self.template = template;
        self.context = context;
        Ok(self)
    }

    /// The interpolated text
    pub fn get(&self, escape: bool) -> String {
        if escape {
            Self::escape(&self.processed)
        } else {
            self.processed.clone()
        }
    }

    /// Lines are passed to sinks as-is
    pub fn escape(text: &str) -> String {
        text.to_string()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn severity(&self) -> Option<&str> {
        self.severity.as_deref()
    }

    pub fn interpolator(&self) -> &Interpolator {
        &self.interpolator
    }
}

impl std::fmt::Display for LogMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::types::{InterpolationError, OnUnresolved};

    #[test]
    fn test_message_is_interpolated_on_construction() {
        let context = Context::new().with("name", "World");
        let message = LogMessage::new(Some("info"), "Hello {name}", context).unwrap();

        assert_eq!(message.get(false), "info Hello World");
        assert_eq!(message.template(), "Hello {name}");
        assert_eq!(message.severity(), Some("info"));
        assert_eq!(message.to_string(), "info Hello World");
    }

    #[test]
    fn test_set_keeps_previous_text_on_failure() {
        let mut message =
            LogMessage::new(None, "count {n}", Context::new().with("n", 1)).unwrap();

        let result = message.set("{bad-name}", Context::new());
        assert!(matches!(result, Err(InterpolationError::InvalidPlaceholder(_))));
        assert_eq!(message.get(false), "count 1");

        message
            .set("count {n}", Context::new().with("n", 2))
            .unwrap();
        assert_eq!(message.get(true), "count 2");
    }

    #[test]
    fn test_set_reuses_the_original_policy() {
        let mut message = LogMessage::with_interpolator(
            &Interpolator::legacy(),
            Some("debug"),
            "{missing}",
            Context::new(),
        )
        .unwrap();
        assert_eq!(message.get(false), "");

        message.set("value={missing}", Context::new()).unwrap();
        assert_eq!(message.get(false), "value=");
        assert_eq!(message.interpolator().policy(), OnUnresolved::ReplaceEmpty);
    }
}
