//! Factor beta.

use ndarray::Array1;

use crate::{
    MathError,
    moments::{is_negligible_variance, require_pair, sample_covariance, sample_variance},
};

/// Beta of `returns` with respect to `factor_returns`.
///
/// Computed as `Cov(returns, factor) / Var(factor)` with sample estimators in
/// both numerator and denominator, which is the ordinary least-squares slope
/// of `returns` regressed on `factor_returns`.
///
/// # Arguments
/// * `returns` - Asset (excess) returns
/// * `factor_returns` - Factor returns on the same dates
///
/// # Errors
/// Returns [`MathError::DimensionMismatch`] if the lengths differ,
/// [`MathError::EmptyData`] or [`MathError::InsufficientData`] for fewer than
/// two observations, and [`MathError::ZeroVariance`] if the factor is constant.
pub fn calculate_beta(
    returns: &Array1<f64>,
    factor_returns: &Array1<f64>,
) -> Result<f64, MathError> {
    require_pair(returns, factor_returns)?;

    let variance = sample_variance(factor_returns)?;
    if is_negligible_variance(factor_returns, variance) {
        return Err(MathError::ZeroVariance("factor returns"));
    }

    Ok(sample_covariance(returns, factor_returns)? / variance)
}
