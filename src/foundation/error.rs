/// Result alias used across the crate.
pub type IrResult<T> = Result<T, IrError>;

/// Top-level error taxonomy used by the pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum IrError {
    /// Invalid user-provided or composition data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed keyframes or sampling failures.
    #[error("animation error: {0}")]
    Animation(String),

    /// A pipeline invariant was broken.
    #[error("internal error: {0}")]
    Internal(String),

    /// A translation issue raised as an error in strict mode.
    #[error("translation issue {code}: {description}")]
    Issue {
        /// Stable `LTxxxx` code.
        code: &'static str,
        /// Human-readable detail.
        description: String,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, wrapped.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IrError {
    /// Build a [`IrError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`IrError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// A pipeline invariant was broken. Never raised for malformed input.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Build a [`IrError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
