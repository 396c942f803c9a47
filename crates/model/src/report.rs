//! Plain-text rendering of exposure results.

use std::fmt;

use serde::Serialize;
use stockbeta_primitives::{DateRange, Symbol};

use crate::FactorExposures;

/// Exposure results together with the context they were computed in.
#[derive(Debug, Clone, Serialize)]
pub struct ExposureReport {
    /// Stock symbol.
    pub symbol: Symbol,
    /// First and last aligned date.
    pub range: DateRange,
    /// Number of aligned daily observations.
    pub observations: usize,
    /// Where the factor data came from.
    pub source: String,
    /// Computed statistics.
    pub exposures: FactorExposures,
}

impl fmt::Display for ExposureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.exposures;
        writeln!(f, "Factor Analysis Report for {}", self.symbol)?;
        writeln!(f, "{}", "=".repeat(40))?;
        writeln!(f, "Period: {} ({} observations)", self.range, self.observations)?;
        writeln!(f, "Factor data: {}", self.source)?;
        writeln!(f, "Average Annual Return: {}", percent(e.average_return()))?;
        writeln!(f, "Annual Volatility: {}", percent(e.volatility()))?;
        writeln!(f, "Sharpe Ratio: {:.2}", e.sharpe_ratio())?;
        writeln!(f)?;
        writeln!(f, "Factor Exposures:")?;
        writeln!(f, "Market Beta: {:.3}", e.market_beta())?;
        writeln!(f, "Size Factor (SMB) Beta: {:.3}", e.smb_beta())?;
        write!(f, "Value Factor (HML) Beta: {:.3}", e.hml_beta())
    }
}

/// Decimal fraction as a percentage with two decimals and thousands separators.
fn percent(value: f64) -> String {
    let formatted = format!("{:.2}", value * 100.0);
    let (sign, digits) = formatted.strip_prefix('-').map_or(("", formatted.as_str()), |d| ("-", d));
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part}%")
}
