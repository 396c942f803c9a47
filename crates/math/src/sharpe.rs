//! Sharpe ratio.

use ndarray::Array1;

use crate::{
    MathError,
    moments::{is_negligible_variance, mean, require_pair, sample_variance},
};

/// Per-period Sharpe ratio: `mean(r - rf) / std(r - rf)`.
///
/// The ratio is not annualized; see [`annualize_ratio`](crate::annualize_ratio).
///
/// # Arguments
/// * `returns` - Asset returns
/// * `risk_free_rate` - Risk-free rate on the same dates
///
/// # Errors
/// Returns [`MathError::DimensionMismatch`] if the lengths differ,
/// [`MathError::EmptyData`] or [`MathError::InsufficientData`] for fewer than
/// two observations, and [`MathError::ZeroVariance`] if the excess returns
/// are constant.
pub fn calculate_sharpe_ratio(
    returns: &Array1<f64>,
    risk_free_rate: &Array1<f64>,
) -> Result<f64, MathError> {
    require_pair(returns, risk_free_rate)?;

    let excess = returns - risk_free_rate;
    let variance = sample_variance(&excess)?;
    if is_negligible_variance(&excess, variance) {
        return Err(MathError::ZeroVariance("excess returns"));
    }

    Ok(mean(&excess)? / variance.sqrt())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn sharpe_with_zero_risk_free() {
        let r = array![0.01, 0.02, -0.01, 0.03];
        let rf = Array1::zeros(4);
        // mean 0.0125, sample std sqrt(0.000291666...)
        let expected = 0.0125 / (0.000_875_f64 / 3.0).sqrt();
        assert_relative_eq!(calculate_sharpe_ratio(&r, &rf).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn constant_risk_free_shifts_mean_only() {
        let r = array![0.01, 0.02, -0.01, 0.03];
        let rf = Array1::from_elem(4, 0.001);
        let expected = (0.0125 - 0.001) / (0.000_875_f64 / 3.0).sqrt();
        assert_relative_eq!(calculate_sharpe_ratio(&r, &rf).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn returns_equal_to_risk_free_is_zero_variance() {
        let rf = array![0.0001, 0.0002, 0.0001, 0.0003];
        let r = rf.clone();
        assert_eq!(calculate_sharpe_ratio(&r, &rf), Err(MathError::ZeroVariance("excess returns")));
    }

    #[test]
    fn sharpe_is_scale_free() {
        let r = array![0.01, 0.02, -0.01, 0.03];
        let rf = Array1::zeros(4);
        let base = calculate_sharpe_ratio(&r, &rf).unwrap();
        let tiny = calculate_sharpe_ratio(&(&r * 1e-10), &rf).unwrap();
        assert_relative_eq!(tiny, base, max_relative = 1e-10);
    }

    #[test]
    fn negative_excess_gives_negative_sharpe() {
        let r = array![-0.01, -0.02, 0.005, -0.015];
        let rf = Array1::zeros(4);
        assert!(calculate_sharpe_ratio(&r, &rf).unwrap() < 0.0);
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let err = calculate_sharpe_ratio(&array![0.01, 0.02, 0.03], &array![0.0, 0.0]).unwrap_err();
        assert_eq!(err, MathError::DimensionMismatch { expected: 3, actual: 2 });
    }
}
