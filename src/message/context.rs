//! Message context with reserved-key validation

use indexmap::IndexMap;

use super::types::{InterpolationError, InterpolationResult, EXCEPTION_KEY};
use super::value::Value;

/// Named values supplied alongside a template
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: IndexMap<String, Value>,
}

/// A context whose reserved keys have been checked
#[derive(Debug, Clone, Copy)]
pub struct ValidatedContext<'a> {
    context: &'a Context,
    exception: Option<&'a (dyn std::error::Error + Send + Sync)>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Check the reserved `exception` key.
    ///
    /// A `null` entry counts as absent; any other non-error value is rejected.
    pub fn validate(&self) -> InterpolationResult<ValidatedContext<'_>> {
        let exception = match self.values.get(EXCEPTION_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::Error(error)) => Some(error.as_ref()),
            Some(other) => {
                return Err(InterpolationError::InvalidContext {
                    given: other.type_name(),
                })
            }
        };

        Ok(ValidatedContext {
            context: self,
            exception,
        })
    }

    /// The error stored under the `exception` key, if any
    pub fn exception(
        &self,
    ) -> InterpolationResult<Option<&(dyn std::error::Error + Send + Sync)>> {
        self.validate().map(|validated| validated.exception())
    }
}

impl<'a> ValidatedContext<'a> {
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.context.values.get(key)
    }

    pub fn exception(&self) -> Option<&'a (dyn std::error::Error + Send + Sync)> {
        self.exception
    }

    pub fn context(&self) -> &'a Context {
        self.context
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl TryFrom<serde_json::Value> for Context {
    type Error = InterpolationError;

    /// JSON has no error values, so a non-null `exception` entry is rejected here
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let map = match value {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => return Ok(Context::new()),
            other => {
                return Err(InterpolationError::InvalidContextRoot(
                    Value::from(other).type_name(),
                ))
            }
        };

        let context: Context = map.into_iter().collect();
        context.validate()?;
        Ok(context)
    }
}
