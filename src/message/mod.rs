//! Log message interpolation.
//!
//! This module provides:
//! - Placeholder scanning for `{path}` tokens
//! - A context value model with exported-field objects and error values
//! - Dotted-path resolution through maps, sequences and objects
//! - The interpolation engine with a configurable unresolved-placeholder policy
//!
//! # Example
//!
//! ```
//! use log_interpolate::message::{Context, Interpolator};
//! use serde_json::json;
//!
//! let context = Context::try_from(json!({
//!     "order": {"id": "ORD-123", "items": ["book", "pen"]}
//! }))?;
//!
//! let line = Interpolator::new().interpolate(
//!     Some("info"),
//!     "Order {order.id} contains {order.items.0} and {order.gift}",
//!     &context,
//! )?;
//!
//! assert_eq!(line, "info Order ORD-123 contains book and {order.gift}");
//! # Ok::<(), log_interpolate::message::InterpolationError>(())
//! ```

mod context;
mod interpolator;
mod log_message;
mod resolver;
mod scanner;
mod types;
mod value;

pub use context::{Context, ValidatedContext};
pub use interpolator::{interpolate, Interpolator};
pub use log_message::LogMessage;
pub use resolver::{resolve, stringify, validate_name};
pub use scanner::{has_placeholders, scan, Placeholder, Placeholders};
pub use types::{
    BoxError, InterpolationError, InterpolationResult, OnUnresolved, Resolution, CLOSE_TAG,
    DEFAULT_MAX_DEPTH, EXCEPTION_KEY, OPEN_TAG, PATH_SEPARATOR,
};
pub use value::{ContextObject, Object, PathSegmentLookup, Stringable, Value};
