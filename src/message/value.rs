//! Context value model and path segment lookup

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::types::BoxError;

/// A value stored in a message context
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Seq(Vec<Value>),
    Map(IndexMap<String, Value>),
    /// Record-like and/or stringifiable object
    Object(Arc<dyn ContextObject>),
    /// Error value, the only shape accepted under the `exception` key
    Error(Arc<dyn std::error::Error + Send + Sync>),
}

/// An object that can take part in placeholder resolution.
///
/// Only fields returned by [`ContextObject::field`] are reachable from a
/// template. Anything an implementation does not export stays invisible.
pub trait ContextObject: Send + Sync {
    /// Type name used in diagnostics
    fn type_name(&self) -> &str;

    /// Look up an exported field
    fn field(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Convert to text. `None` means the object has no string form.
    fn to_text(&self) -> Option<Result<String, BoxError>> {
        None
    }
}

/// Single-segment lookup used by the resolver to descend into a value
pub trait PathSegmentLookup {
    fn lookup(&self, segment: &str) -> Option<Cow<'_, Value>>;
}

impl PathSegmentLookup for IndexMap<String, Value> {
    fn lookup(&self, segment: &str) -> Option<Cow<'_, Value>> {
        self.get(segment).map(Cow::Borrowed)
    }
}

impl PathSegmentLookup for [Value] {
    fn lookup(&self, segment: &str) -> Option<Cow<'_, Value>> {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index: usize = segment.parse().ok()?;
        self.get(index).map(Cow::Borrowed)
    }
}

impl PathSegmentLookup for dyn ContextObject {
    fn lookup(&self, segment: &str) -> Option<Cow<'_, Value>> {
        self.field(segment).map(Cow::Owned)
    }
}

impl Value {
    /// Wrap an object implementing [`ContextObject`]
    pub fn object<T: ContextObject + 'static>(object: T) -> Self {
        Value::Object(Arc::new(object))
    }

    /// Wrap an error value
    pub fn error<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Value::Error(Arc::new(error))
    }

    /// Wrap anything with a `Display` impl as a stringifiable object
    pub fn display<T: fmt::Display + Send + Sync + 'static>(value: T) -> Self {
        Value::object(Stringable::from_display(value))
    }

    /// Debug type name, as reported in context errors
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) | Value::UInt(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::String(_) => "string".to_string(),
            Value::Seq(_) => "sequence".to_string(),
            Value::Map(_) => "map".to_string(),
            Value::Object(object) => object.type_name().to_string(),
            Value::Error(_) => "error".to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Descend by one path segment. Scalars and errors have no children.
    pub fn child(&self, segment: &str) -> Option<Cow<'_, Value>> {
        match self {
            Value::Map(map) => map.lookup(segment),
            Value::Seq(seq) => seq.as_slice().lookup(segment),
            Value::Object(object) => object.as_ref().lookup(segment),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::UInt(n) => f.debug_tuple("UInt").field(n).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Object(object) => write!(f, "Object({})", object.type_name()),
            Value::Error(error) => write!(f, "Error({})", error),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => UInt,
    u16 => UInt,
    u32 => UInt,
    u64 => UInt,
    f32 => Float,
    f64 => Float,
    String => String,
    &str => String,
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

type TextFn = dyn Fn() -> Result<String, BoxError> + Send + Sync;

/// A record with explicitly registered fields.
///
/// Public fields are reachable from templates, hidden fields are kept only
/// for the owner and never resolve.
#[derive(Clone)]
pub struct Object {
    type_name: String,
    public: IndexMap<String, Value>,
    hidden: IndexMap<String, Value>,
    text: Option<Arc<TextFn>>,
}

impl Object {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            public: IndexMap::new(),
            hidden: IndexMap::new(),
            text: None,
        }
    }

    /// Register a field visible to templates
    pub fn public(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.public.insert(name.into(), value.into());
        self
    }

    /// Register a field that templates cannot reach
    pub fn hidden(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.hidden.insert(name.into(), value.into());
        self
    }

    /// Give the object a string form
    pub fn with_text<F>(mut self, text: F) -> Self
    where
        F: Fn() -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.text = Some(Arc::new(text));
        self
    }

    pub fn hidden_field(&self, name: &str) -> Option<&Value> {
        self.hidden.get(name)
    }
}

impl ContextObject for Object {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.public.get(name).cloned()
    }

    fn to_text(&self) -> Option<Result<String, BoxError>> {
        self.text.as_ref().map(|text| text())
    }
}

/// An object whose only capability is a (possibly failing) string form
#[derive(Clone)]
pub struct Stringable {
    type_name: String,
    text: Arc<TextFn>,
}

impl Stringable {
    pub fn new<F>(type_name: impl Into<String>, text: F) -> Self
    where
        F: Fn() -> Result<String, BoxError> + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            text: Arc::new(text),
        }
    }

    pub fn from_display<T: fmt::Display + Send + Sync + 'static>(value: T) -> Self {
        Self::new(std::any::type_name::<T>(), move || Ok(value.to_string()))
    }
}

impl ContextObject for Stringable {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn to_text(&self) -> Option<Result<String, BoxError>> {
        Some((self.text)())
    }
}
