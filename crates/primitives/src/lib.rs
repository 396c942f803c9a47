#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockbeta-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod asset;
pub use asset::Symbol;

mod range;
pub use range::DateRange;

mod series;
pub use series::{PriceSeries, ReturnSeries, SeriesError};

mod factor;
pub use factor::{FactorColumn, FactorTable};

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
