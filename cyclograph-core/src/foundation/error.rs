/// Convenience result type used across Cyclograph.
pub type CyclographResult<T> = Result<T, CyclographError>;

/// Top-level error taxonomy used by the pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum CyclographError {
    /// Invalid user-provided or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The epicycle chain required a Fourier coefficient the analysis did not
    /// produce. Fatal: scene construction aborts.
    #[error("missing fourier coefficient for index {index}")]
    MissingCoefficient {
        /// The absent frequency index.
        index: i32,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CyclographError {
    /// Build a [`CyclographError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CyclographError::MissingCoefficient`] value.
    pub fn missing_coefficient(index: i32) -> Self {
        Self::MissingCoefficient { index }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
