/// Convenience result type used across jitterstripes.
pub type StripeResult<T> = Result<T, StripeError>;

/// Top-level error taxonomy used by the generator and its sinks.
#[derive(thiserror::Error, Debug)]
pub enum StripeError {
    /// Invalid run configuration (too few stripes or samples, degenerate extent).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised while drawing onto the canvas or feeding a sink.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while serializing or persisting an output artifact.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StripeError {
    /// Build a [`StripeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StripeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StripeError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
