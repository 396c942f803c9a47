//! Sample moments of return vectors.

use ndarray::Array1;

use crate::MathError;


/// Require at least two observations and return the count.
pub(crate) fn require_sample(data: &Array1<f64>) -> Result<usize, MathError> {
    match data.len() {
        0 => Err(MathError::EmptyData),
        1 => Err(MathError::InsufficientData { required: 2, actual: 1 }),
        n => Ok(n),
    }
}

/// Require two vectors of equal length with at least two observations.
pub(crate) fn require_pair(a: &Array1<f64>, b: &Array1<f64>) -> Result<usize, MathError> {
    if a.len() != b.len() {
        return Err(MathError::DimensionMismatch { expected: a.len(), actual: b.len() });
    }
    require_sample(a)
}

/// Arithmetic mean.
///
/// # Errors
/// Returns [`MathError::EmptyData`] for an empty vector.
pub fn mean(data: &Array1<f64>) -> Result<f64, MathError> {
    data.mean().ok_or(MathError::EmptyData)
}

/// Sample variance (n - 1 denominator).
///
/// # Errors
/// Returns an error for fewer than two observations.
pub fn sample_variance(data: &Array1<f64>) -> Result<f64, MathError> {
    sample_covariance(data, data)
}

/// Sample standard deviation (n - 1 denominator).
///
/// # Errors
/// Returns an error for fewer than two observations.
pub fn sample_std(data: &Array1<f64>) -> Result<f64, MathError> {
    sample_variance(data).map(f64::sqrt)
}

/// Whether `variance`, computed from `data`, is zero up to rounding.
///
/// A series is degenerate when every value equals the first, or when its
/// variance is within machine precision of its mean square. The threshold
/// scales with the data, so rescaling a series never changes the answer.
#[must_use]
pub fn is_negligible_variance(data: &Array1<f64>, variance: f64) -> bool {
    let Some(&first) = data.first() else {
        return true;
    };
    if data.iter().all(|&x| x == first) {
        return true;
    }
    let mean_square = data.mapv(|x| x * x).mean().unwrap_or(0.0);
    variance <= f64::EPSILON * mean_square
}

/// Sample covariance (n - 1 denominator).
///
/// # Errors
/// Returns an error if the lengths differ or there are fewer than two
/// observations.
pub fn sample_covariance(a: &Array1<f64>, b: &Array1<f64>) -> Result<f64, MathError> {
    let n = require_pair(a, b)?;
    let mean_a = mean(a)?;
    let mean_b = mean(b)?;

    let cross: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - mean_a) * (y - mean_b)).sum();
    Ok(cross / (n - 1) as f64)
}
