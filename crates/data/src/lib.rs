#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockbeta-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod frame;
pub use frame::write_archive;

mod archive;
pub use archive::{ArchivedFactors, BUNDLED_SOURCE_NAME, load_archived};

mod french;
pub use french::{FRENCH_DAILY_URL, FrenchFactorSource, parse_french_daily};

mod yahoo;
pub use yahoo::YahooPriceSource;

mod fallback;
pub use fallback::{FactorOrigin, FallbackFactorSource};

mod align;
pub use align::{AlignedReturns, align};

mod error;
pub use error::DataError;
