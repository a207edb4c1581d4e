/// Convenience result type used across webtile.
pub type WebtileResult<T> = Result<T, WebtileError>;

/// Error taxonomy for construction and configuration.
///
/// Per-frame entry points never return errors; anomalies there are either folded into the next
/// frame's invalidation or are fatal.
#[derive(thiserror::Error, Debug)]
pub enum WebtileError {
    /// Inconsistent compositor configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WebtileError {
    /// Build a [`WebtileError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`WebtileError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
