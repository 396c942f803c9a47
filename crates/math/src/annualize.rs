//! Annualization of per-period statistics.

/// Trading days per year.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annualize a mean per-period return by linear scaling.
#[must_use]
pub fn annualize_mean(mean: f64, periods_per_year: f64) -> f64 {
    mean * periods_per_year
}

/// Annualize a per-period volatility by the square-root-of-time rule.
#[must_use]
pub fn annualize_volatility(std: f64, periods_per_year: f64) -> f64 {
    std * periods_per_year.sqrt()
}

/// Annualize a per-period Sharpe ratio, assuming i.i.d. returns.
#[must_use]
pub fn annualize_ratio(ratio: f64, periods_per_year: f64) -> f64 {
    ratio * periods_per_year.sqrt()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn annualize_daily_mean() {
        assert_relative_eq!(annualize_mean(0.001, TRADING_DAYS_PER_YEAR), 0.252, epsilon = 1e-12);
    }

    #[rstest]
    #[case(0.01, 252.0, 0.01 * 252.0_f64.sqrt())]
    #[case(0.02, 12.0, 0.02 * 12.0_f64.sqrt())]
    #[case(0.0, 252.0, 0.0)]
    fn annualize_vol(#[case] std: f64, #[case] periods: f64, #[case] expected: f64) {
        assert_relative_eq!(annualize_volatility(std, periods), expected, epsilon = 1e-12);
    }

    #[test]
    fn ratio_and_volatility_scale_alike() {
        assert_eq!(annualize_ratio(0.1, 252.0), annualize_volatility(0.1, 252.0));
    }
}
