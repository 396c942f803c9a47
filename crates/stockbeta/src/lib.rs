//! # stockbeta
//!
//! Fama-French three-factor exposures for a single stock: market, size and
//! value betas, Sharpe ratio, annualized return and volatility.
//!
//! This crate re-exports the stockbeta workspace crates behind feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Dates, symbols, series and the factor table
//! - `traits`: Price and factor source abstractions
//! - `math`: Sample statistics, beta and Sharpe ratio
//! - `model`: Exposure calculation and reporting
//! - `data`: Yahoo Finance, Kenneth French and archive sources, date alignment
//! - `cli`: The `stockbeta` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use stockbeta::{data, model};
//!
//! let factors = data::load_archived()?;
//! let aligned = data::align(&stock_returns, &factors)?;
//! let exposures = model::calculate_factor_exposures(aligned.returns(), aligned.factors())?;
//! println!("market beta {:.3}", exposures.market_beta());
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use stockbeta_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use stockbeta_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use stockbeta_math as math;
#[cfg(feature = "model")]
#[doc(inline)]
pub use stockbeta_model as model;
#[cfg(feature = "data")]
#[doc(inline)]
pub use stockbeta_data as data;

// Used only by the `stockbeta` binary.
#[cfg(feature = "cli")]
use clap as _;
#[cfg(feature = "cli")]
use serde_json as _;
#[cfg(feature = "cli")]
use tokio as _;
#[cfg(feature = "cli")]
use tracing as _;
#[cfg(feature = "cli")]
use tracing_subscriber as _;
