//! Placeholder interpolation engine

use std::collections::HashMap;

use super::context::Context;
use super::resolver::resolve;
use super::scanner::scan;
use super::types::{InterpolationResult, OnUnresolved, Resolution, DEFAULT_MAX_DEPTH};

/// Resolves `{path}` placeholders in a template against a context.
///
/// The engine holds configuration only, so one instance can be shared freely
/// between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpolator {
    policy: OnUnresolved,
    max_depth: usize,
    severity_prefix: bool,
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpolator {
    /// Create an interpolator that leaves unresolved placeholders verbatim
    pub fn new() -> Self {
        Self {
            policy: OnUnresolved::LeaveVerbatim,
            max_depth: DEFAULT_MAX_DEPTH,
            severity_prefix: true,
        }
    }

    /// Historical behaviour: unresolved placeholders become empty, no severity prefix
    pub fn legacy() -> Self {
        Self::new()
            .with_policy(OnUnresolved::ReplaceEmpty)
            .with_severity_prefix(false)
    }

    pub fn with_policy(mut self, policy: OnUnresolved) -> Self {
        self.policy = policy;
        self
    }

    /// Limit the number of segments a placeholder path may have, at least one
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn with_severity_prefix(mut self, enabled: bool) -> Self {
        self.severity_prefix = enabled;
        self
    }

    pub fn policy(&self) -> OnUnresolved {
        self.policy
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn severity_prefix(&self) -> bool {
        self.severity_prefix
    }

    /// Interpolate a template, optionally prefixing a severity label.
    ///
    /// Any validation or stringification failure aborts the whole call.
    pub fn interpolate(
        &self,
        severity: Option<&str>,
        template: &str,
        context: &Context,
    ) -> InterpolationResult<String> {
        let body = self.render(template, context)?;

        match severity {
            Some(label) if self.severity_prefix => {
                let mut line = String::with_capacity(label.len() + 1 + body.len());
                line.push_str(label);
                line.push(' ');
                line.push_str(&body);
                Ok(line)
            }
            _ => Ok(body),
        }
    }

    /// Interpolate a template without any severity prefix
    pub fn render(&self, template: &str, context: &Context) -> InterpolationResult<String> {
        let validated = context.validate()?;

        let mut resolved: HashMap<&str, Resolution> = HashMap::new();
        let mut output = String::with_capacity(template.len());
        let mut last = 0;

        for placeholder in scan(template) {
            if !resolved.contains_key(placeholder.name) {
                let resolution = resolve(placeholder.name, &validated, self.max_depth)?;
                if !resolution.is_found() {
                    tracing::debug!(
                        placeholder = %placeholder.name,
                        policy = ?self.policy,
                        "Placeholder left unresolved"
                    );
                }
                resolved.insert(placeholder.name, resolution);
            }

            output.push_str(&template[last..placeholder.start]);
            match &resolved[placeholder.name] {
                Resolution::Found(text) => output.push_str(text),
                Resolution::NotFound => match self.policy {
                    OnUnresolved::LeaveVerbatim => output.push_str(placeholder.span(template)),
                    OnUnresolved::ReplaceEmpty => {}
                },
            }
            last = placeholder.end;
        }

        output.push_str(&template[last..]);
        Ok(output)
    }
}

/// Interpolate with the default engine
pub fn interpolate(
    severity: Option<&str>,
    template: &str,
    context: &Context,
) -> InterpolationResult<String> {
    Interpolator::new().interpolate(severity, template, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::types::InterpolationError;
    use crate::message::value::{Object, Stringable, Value};
    use serde_json::json;

    fn scalar_context() -> Context {
        Context::new()
            .with("string", "Hello")
            .with("number", 42)
            .with("boolean", true)
            .with("stringable", Value::display("Stringable"))
            .with(
                "stringableWithException",
                Value::object(Stringable::new("Broken", || {
                    Err("__toString() with exception".into())
                })),
            )
    }

    #[test]
    fn test_interpolate_scalars() {
        let result = Interpolator::new()
            .render(
                "Scalar values: {string} {number} {boolean} {stringable}",
                &scalar_context(),
            )
            .unwrap();

        assert_eq!(result, "Scalar values: Hello 42 true Stringable");
    }

    #[test]
    fn test_literal_braces_around_placeholders() {
        let result = interpolate(
            Some("info"),
            "{Scalar values: {string} {number} {boolean} {stringable}}",
            &scalar_context(),
        )
        .unwrap();

        assert_eq!(result, "info {Scalar values: Hello 42 true Stringable}");
    }

    #[test]
    fn test_severity_prefix() {
        let context = Context::new().with("pct", 91);
        let result = interpolate(Some("WARN"), "disk low: {pct}", &context).unwrap();
        assert_eq!(result, "WARN disk low: 91");

        let result = interpolate(None, "disk low: {pct}", &context).unwrap();
        assert_eq!(result, "disk low: 91");
    }

    #[test]
    fn test_severity_prefix_disabled() {
        let context = Context::new().with("pct", 91);
        let result = Interpolator::new()
            .with_severity_prefix(false)
            .interpolate(Some("WARN"), "disk low: {pct}", &context)
            .unwrap();
        assert_eq!(result, "disk low: 91");
    }

    #[test]
    fn test_unresolved_left_verbatim() {
        let context = Context::try_from(json!({"array": {"1": "one", "two": "second"}})).unwrap();
        let result = interpolate(
            None,
            "Array offset: {array.notExists} {array.4} {array.1} {missing.path}",
            &context,
        )
        .unwrap();

        assert_eq!(result, "Array offset: {array.notExists} {array.4} one {missing.path}");
    }

    #[test]
    fn test_legacy_replaces_with_empty() {
        let object = Object::new("Record")
            .public("subObject", Value::object(Object::new("Sub").public("p", "v")));
        let context = Context::new().with("object", Value::object(object));

        let result = Interpolator::legacy()
            .interpolate(
                Some("info"),
                "Sub object property: {object.notExistsProperty} {object.subObject.p.subsub}",
                &context,
            )
            .unwrap();

        assert_eq!(result, "Sub object property:  ");
    }

    #[test]
    fn test_visibility() {
        let record = Object::new("Record").public("name", "n").hidden("secret", "s");
        let context = Context::new().with("r", Value::object(record));

        let result = interpolate(None, "{r.name} {r.secret}", &context).unwrap();
        assert_eq!(result, "n {r.secret}");
    }

    #[test]
    fn test_sequence_indexing() {
        let context = Context::try_from(json!({"arr": ["one", "two"]})).unwrap();
        let result = interpolate(None, "{arr.0} {arr.1} {arr.5}", &context).unwrap();
        assert_eq!(result, "one two {arr.5}");
    }

    #[test]
    fn test_null_resolves_to_empty() {
        let context = Context::try_from(json!({"x": null})).unwrap();
        assert_eq!(interpolate(None, "v:{x}", &context).unwrap(), "v:");
    }

    #[test]
    fn test_invalid_name_aborts() {
        let context = Context::new().with("ok", 1);
        let result = interpolate(None, "{ok} {bad name!}", &context);
        assert!(matches!(
            result,
            Err(InterpolationError::InvalidPlaceholder(name)) if name == "bad name!"
        ));
    }

    #[test]
    fn test_stringification_failure_aborts() {
        let result = interpolate(
            Some("info"),
            "Scalar values: {string} {stringableWithException}",
            &scalar_context(),
        );
        assert!(matches!(
            result,
            Err(InterpolationError::Stringification { placeholder, .. })
                if placeholder == "stringableWithException"
        ));
    }

    #[test]
    fn test_invalid_exception_checked_eagerly() {
        let context = Context::new().with("exception", 42);
        let result = interpolate(None, "no placeholders here", &context);
        assert!(matches!(result, Err(InterpolationError::InvalidContext { .. })));
    }

    #[test]
    fn test_exception_placeholder_renders_message() {
        #[derive(Debug, thiserror::Error)]
        #[error("connection reset")]
        struct ConnectionError;

        let context = Context::new().with("exception", Value::error(ConnectionError));
        let result = interpolate(Some("error"), "failed: {exception}", &context).unwrap();
        assert_eq!(result, "error failed: connection reset");
    }

    #[test]
    fn test_repeated_placeholder_resolved_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let context = Context::new().with(
            "id",
            Value::object(Stringable::new("Counter", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok("ORD-123".to_string())
            })),
        );

        let result = interpolate(None, "{id} / {id} / {id}", &context).unwrap();
        assert_eq!(result, "ORD-123 / ORD-123 / ORD-123");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_depth_limit() {
        let context = Context::new().with("a", 1);
        let result = Interpolator::new()
            .with_max_depth(2)
            .interpolate(None, "{a.b.c}", &context);
        assert!(matches!(result, Err(InterpolationError::PathTooDeep { .. })));
    }

    #[test]
    fn test_zero_depth_is_raised_to_one() {
        let context = Context::new().with("a", 1);
        let interpolator = Interpolator::new().with_max_depth(0);

        assert_eq!(interpolator.max_depth(), 1);
        assert_eq!(interpolator.interpolate(None, "{a}", &context).unwrap(), "1");
        assert!(matches!(
            interpolator.interpolate(None, "{a.b}", &context),
            Err(InterpolationError::PathTooDeep { depth: 2, limit: 1, .. })
        ));
    }

    #[test]
    fn test_empty_placeholder_is_unresolved() {
        let context = Context::new().with("", "EMPTY");
        assert_eq!(interpolate(None, "x{}y", &context).unwrap(), "x{}y");
        assert_eq!(
            Interpolator::legacy().interpolate(None, "x{}y", &context).unwrap(),
            "xy"
        );
    }

    #[test]
    fn test_no_placeholders() {
        let context = Context::new();
        assert_eq!(interpolate(None, "", &context).unwrap(), "");
        assert_eq!(interpolate(None, "plain } text {", &context).unwrap(), "plain } text {");
    }
}
