/// Convenience result type used across the crate.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Top-level error taxonomy.
///
/// Only malformed input is an error. A value that simply cannot be resolved for an element
/// (no format in scope, no duration, no anchor) is reported as `None` by the resolvers instead.
#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    /// Malformed rational time string or unknown frame-rate/timecode-format token.
    #[error("format error: {0}")]
    Format(String),

    /// Document tree that cannot be indexed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ResolveError {
    /// Build a [`ResolveError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`ResolveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ResolveError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ResolveError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
