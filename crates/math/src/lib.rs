#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockbeta-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod moments;
pub use moments::{
    is_negligible_variance, mean, sample_covariance, sample_std, sample_variance,
};

mod beta;
pub use beta::calculate_beta;

mod sharpe;
pub use sharpe::calculate_sharpe_ratio;

mod annualize;
pub use annualize::{TRADING_DAYS_PER_YEAR, annualize_mean, annualize_ratio, annualize_volatility};

mod error;
pub use error::MathError;
