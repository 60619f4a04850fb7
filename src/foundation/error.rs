/// Crate-wide result alias.
pub type ScrollpinResult<T> = Result<T, ScrollpinError>;

/// Error type for configuration, timeline and registry failures.
///
/// Runtime scroll handling never surfaces these; they are returned from constructors and
/// `validate()` calls so that misconfiguration is caught before a page is mounted.
#[derive(thiserror::Error, Debug)]
pub enum ScrollpinError {
    /// Invalid geometry or configuration value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid phase timeline (overlapping entries, out-of-range fractions).
    #[error("timeline error: {0}")]
    Timeline(String),

    /// Range registry or page lifecycle misuse.
    #[error("registry error: {0}")]
    Registry(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollpinError {
    /// Build a [`ScrollpinError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollpinError::Timeline`].
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`ScrollpinError::Registry`].
    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry(msg.into())
    }

    /// Build a [`ScrollpinError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
