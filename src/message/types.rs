//! Message types and error definitions

use thiserror::Error;

/// Opening placeholder tag
pub const OPEN_TAG: &str = "{";

/// Closing placeholder tag
pub const CLOSE_TAG: &str = "}";

/// Separator between path segments inside a placeholder name
pub const PATH_SEPARATOR: char = '.';

/// Reserved context key that must hold an error value
pub const EXCEPTION_KEY: &str = "exception";

/// Default ceiling on the number of segments in a placeholder path
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Boxed error carried by failing to-string conversions
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Interpolation error type
#[derive(Debug, Error)]
pub enum InterpolationError {
    #[error(
        "The context placeholder \"{0}\" contains unsupported symbols. \
         A-Z a-z 0-9 \"_\" and \".\" are allowed only"
    )]
    InvalidPlaceholder(String),

    #[error("The context's \"exception\" key must hold an error value. {given} was given")]
    InvalidContext { given: String },

    #[error("Context root must be an object, {0} was given")]
    InvalidContextRoot(String),

    #[error("Placeholder \"{placeholder}\" could not be converted to a string: {source}")]
    Stringification {
        placeholder: String,
        #[source]
        source: BoxError,
    },

    #[error("Placeholder \"{placeholder}\" has {depth} path segments, the limit is {limit}")]
    PathTooDeep {
        placeholder: String,
        depth: usize,
        limit: usize,
    },
}

/// Result type for interpolation operations
pub type InterpolationResult<T> = Result<T, InterpolationError>;

/// Outcome of resolving one placeholder path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Every segment resolved and the terminal value has a string form
    Found(String),
    /// Some segment was absent, or the terminal value has no string form
    NotFound,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// What to do with a placeholder that does not resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnUnresolved {
    /// Keep the placeholder text as written
    #[default]
    LeaveVerbatim,
    /// Substitute an empty string
    ReplaceEmpty,
}

impl std::str::FromStr for OnUnresolved {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "leave_verbatim" | "verbatim" => Ok(OnUnresolved::LeaveVerbatim),
            "replace_empty" | "empty" => Ok(OnUnresolved::ReplaceEmpty),
            other => Err(format!("unknown unresolved-placeholder policy: {}", other)),
        }
    }
}
