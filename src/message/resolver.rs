//! Dotted-path resolution against a message context

use std::borrow::Cow;

use super::context::ValidatedContext;
use super::types::{InterpolationError, InterpolationResult, Resolution, PATH_SEPARATOR};
use super::value::Value;

/// Check a raw placeholder name against the allowed charset
pub fn validate_name(raw_name: &str) -> InterpolationResult<()> {
    if raw_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == PATH_SEPARATOR)
    {
        Ok(())
    } else {
        Err(InterpolationError::InvalidPlaceholder(raw_name.to_string()))
    }
}

/// Resolve a placeholder name to its string form.
///
/// The name is validated first, even when it would resolve. Containers and
/// objects without a string form resolve to `NotFound`.
pub fn resolve(
    raw_name: &str,
    context: &ValidatedContext<'_>,
    max_depth: usize,
) -> InterpolationResult<Resolution> {
    validate_name(raw_name)?;

    let depth = raw_name.split(PATH_SEPARATOR).count();
    if depth > max_depth {
        return Err(InterpolationError::PathTooDeep {
            placeholder: raw_name.to_string(),
            depth,
            limit: max_depth,
        });
    }

    if raw_name.split(PATH_SEPARATOR).any(str::is_empty) {
        return Ok(Resolution::NotFound);
    }

    let mut segments = raw_name.split(PATH_SEPARATOR);
    let root = match segments.next().and_then(|first| context.get(first)) {
        Some(value) => value,
        None => return Ok(Resolution::NotFound),
    };

    let mut current = Cow::Borrowed(root);
    for segment in segments {
        current = match descend(current, segment) {
            Some(child) => child,
            None => return Ok(Resolution::NotFound),
        };
    }

    stringify(raw_name, &current)
}

fn descend<'a>(value: Cow<'a, Value>, segment: &str) -> Option<Cow<'a, Value>> {
    match value {
        Cow::Borrowed(value) => value.child(segment),
        Cow::Owned(value) => value.child(segment).map(|child| Cow::Owned(child.into_owned())),
    }
}

/// Convert a terminal value to its string form
pub fn stringify(placeholder: &str, value: &Value) -> InterpolationResult<Resolution> {
    let text = match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::UInt(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Error(error) => error.to_string(),
        Value::Object(object) => match object.to_text() {
            Some(Ok(text)) => text,
            Some(Err(source)) => {
                return Err(InterpolationError::Stringification {
                    placeholder: placeholder.to_string(),
                    source,
                })
            }
            None => return Ok(Resolution::NotFound),
        },
        Value::Seq(_) | Value::Map(_) => return Ok(Resolution::NotFound),
    };

    Ok(Resolution::Found(text))
}
