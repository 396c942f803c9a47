//! Error types for exposure estimation.

use stockbeta_math::MathError;

/// Errors that can occur while computing factor exposures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Stock returns and factor table are not on the same dates.
    #[error("misaligned inputs: {0}")]
    Misaligned(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ModelError {
    /// Returns whether the error comes from degenerate data rather than a
    /// caller mistake.
    #[must_use]
    pub const fn is_degenerate_data(&self) -> bool {
        matches!(
            self,
            Self::Math(
                MathError::ZeroVariance(_)
                    | MathError::EmptyData
                    | MathError::InsufficientData { .. }
            )
        )
    }
}
