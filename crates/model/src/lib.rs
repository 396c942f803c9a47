#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockbeta-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod exposures;
pub use exposures::{
    ExposureCalculator, ExposureConfig, FactorExposures, METRIC_NAMES, calculate_factor_exposures,
};

mod report;
pub use report::ExposureReport;

mod error;
pub use error::ModelError;

/// Re-export commonly used types.
pub mod prelude {
    pub use super::{
        ExposureCalculator, ExposureConfig, ExposureReport, FactorExposures, ModelError,
        calculate_factor_exposures,
    };
}
