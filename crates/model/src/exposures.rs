//! Factor exposure statistics.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use stockbeta_math::{
    TRADING_DAYS_PER_YEAR, annualize_mean, annualize_ratio, annualize_volatility, calculate_beta,
    calculate_sharpe_ratio, mean, sample_std,
};
use stockbeta_primitives::{FactorColumn, FactorTable, ReturnSeries};
use tracing::debug;

use crate::ModelError;

/// Metric names, in report order.
pub const METRIC_NAMES: [&str; 6] =
    ["average_return", "volatility", "sharpe_ratio", "market_beta", "smb_beta", "hml_beta"];

/// Configuration for exposure estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureConfig {
    /// Observations per year used to annualize return, volatility and Sharpe.
    pub periods_per_year: f64,
}

impl ExposureConfig {
    /// Check the configuration.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidConfig`] if `periods_per_year` is not a
    /// positive finite number.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.periods_per_year.is_finite() && self.periods_per_year > 0.0) {
            return Err(ModelError::InvalidConfig(format!(
                "periods_per_year must be positive, got {}",
                self.periods_per_year
            )));
        }
        Ok(())
    }
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self { periods_per_year: TRADING_DAYS_PER_YEAR }
    }
}

/// Annualized performance and three-factor betas of a single stock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorExposures {
    average_return: f64,
    volatility: f64,
    sharpe_ratio: f64,
    market_beta: f64,
    smb_beta: f64,
    hml_beta: f64,
}

impl FactorExposures {
    /// Annualized mean return.
    #[must_use]
    pub const fn average_return(&self) -> f64 {
        self.average_return
    }

    /// Annualized volatility.
    #[must_use]
    pub const fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Annualized Sharpe ratio.
    #[must_use]
    pub const fn sharpe_ratio(&self) -> f64 {
        self.sharpe_ratio
    }

    /// Beta of excess returns on `Mkt-RF`.
    #[must_use]
    pub const fn market_beta(&self) -> f64 {
        self.market_beta
    }

    /// Beta of excess returns on `SMB`.
    #[must_use]
    pub const fn smb_beta(&self) -> f64 {
        self.smb_beta
    }

    /// Beta of excess returns on `HML`.
    #[must_use]
    pub const fn hml_beta(&self) -> f64 {
        self.hml_beta
    }

    /// Look a metric up by name (see [`METRIC_NAMES`]).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Iterate over `(name, value)` pairs in [`METRIC_NAMES`] order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        let values = [
            self.average_return,
            self.volatility,
            self.sharpe_ratio,
            self.market_beta,
            self.smb_beta,
            self.hml_beta,
        ];
        METRIC_NAMES.into_iter().zip(values)
    }
}

/// Computes [`FactorExposures`] from aligned stock and factor returns.
#[derive(Debug, Clone, Default)]
pub struct ExposureCalculator {
    config: ExposureConfig,
}

impl ExposureCalculator {
    /// Create a calculator with default configuration (252 trading days).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with custom configuration.
    #[must_use]
    pub const fn with_config(config: ExposureConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ExposureConfig {
        &self.config
    }

    /// Compute exposures for a stock against a factor table on the same dates.
    ///
    /// The inputs must already be aligned; this does not join on date.
    ///
    /// # Errors
    /// Returns [`ModelError::Misaligned`] if the date indices differ, and
    /// [`ModelError::Math`] for empty or degenerate series.
    pub fn calculate(
        &self,
        stock_returns: &ReturnSeries,
        factors: &FactorTable,
    ) -> Result<FactorExposures, ModelError> {
        check_aligned(stock_returns, factors)?;
        self.compute(
            stock_returns.values(),
            factors.column(FactorColumn::MktRf),
            factors.column(FactorColumn::Smb),
            factors.column(FactorColumn::Hml),
            factors.column(FactorColumn::Rf),
        )
    }

    /// Compute exposures from raw, already aligned arrays.
    ///
    /// # Errors
    /// Returns [`ModelError::Math`] for mismatched lengths, fewer than two
    /// observations, or zero-variance factor/excess series.
    pub fn compute(
        &self,
        stock_returns: &Array1<f64>,
        mkt_rf: &Array1<f64>,
        smb: &Array1<f64>,
        hml: &Array1<f64>,
        rf: &Array1<f64>,
    ) -> Result<FactorExposures, ModelError> {
        self.config.validate()?;
        let periods = self.config.periods_per_year;
        debug!(observations = stock_returns.len(), periods, "computing factor exposures");

        let sharpe = calculate_sharpe_ratio(stock_returns, rf)?;
        let excess = stock_returns - rf;

        Ok(FactorExposures {
            average_return: annualize_mean(mean(stock_returns)?, periods),
            volatility: annualize_volatility(sample_std(stock_returns)?, periods),
            sharpe_ratio: annualize_ratio(sharpe, periods),
            market_beta: calculate_beta(&excess, mkt_rf)?,
            smb_beta: calculate_beta(&excess, smb)?,
            hml_beta: calculate_beta(&excess, hml)?,
        })
    }
}

/// Compute exposures with the default configuration.
///
/// # Errors
/// See [`ExposureCalculator::calculate`].
pub fn calculate_factor_exposures(
    stock_returns: &ReturnSeries,
    factors: &FactorTable,
) -> Result<FactorExposures, ModelError> {
    ExposureCalculator::new().calculate(stock_returns, factors)
}

fn check_aligned(stock_returns: &ReturnSeries, factors: &FactorTable) -> Result<(), ModelError> {
    if stock_returns.len() != factors.len() {
        return Err(ModelError::Misaligned(format!(
            "{} stock dates vs {} factor dates",
            stock_returns.len(),
            factors.len()
        )));
    }

    let mismatch = stock_returns.dates().iter().zip(factors.dates()).find(|(s, f)| s != f);
    if let Some((stock, factor)) = mismatch {
        return Err(ModelError::Misaligned(format!(
            "stock date {stock} paired with factor date {factor}"
        )));
    }

    Ok(())
}
