//! Archived factor snapshots.

use std::path::Path;

use stockbeta_primitives::{DateRange, FactorTable};
use stockbeta_traits::{FactorSource, SourceError};
use tracing::{debug, warn};

use crate::{DataError, frame::read_factor_csv};

const BUNDLED: &str = include_str!("../data/ff3_daily_2021.csv");

/// Source name of the table returned by [`load_archived`].
pub const BUNDLED_SOURCE_NAME: &str = "synthetic 2021 sample (not published data)";

/// Load the sample compiled into the crate.
///
/// The table is **synthetic**. It holds the 252 NYSE trading days of 2021,
/// but its values were generated, not copied from the Kenneth French data
/// library: Mkt-RF is drawn with realistic daily moments, SMB and HML are
/// orthogonal to it, and RF is zero. Betas computed against it are only good
/// for exercising the pipeline. Use [`ArchivedFactors::from_path`] with a
/// table exported from a live download for real analysis.
///
/// # Errors
/// Only fails if the bundled file is corrupt.
pub fn load_archived() -> Result<FactorTable, DataError> {
    read_factor_csv(BUNDLED.as_bytes().to_vec(), 1.0)
}

/// A factor table read once from an archive and served from memory.
#[derive(Debug, Clone)]
pub struct ArchivedFactors {
    table: FactorTable,
    name: String,
    synthetic: bool,
}

impl ArchivedFactors {
    /// The synthetic sample compiled into the crate, named
    /// [`BUNDLED_SOURCE_NAME`].
    ///
    /// Its values are generated, not published factor returns; see
    /// [`load_archived`]. Every fetch from it logs a warning.
    ///
    /// # Errors
    /// See [`load_archived`].
    pub fn bundled() -> Result<Self, DataError> {
        let table = load_archived()?;
        debug!(rows = table.len(), "loaded bundled factor archive");
        Ok(Self { table, name: BUNDLED_SOURCE_NAME.to_string(), synthetic: true })
    }

    /// An archive file on disk, in the format written by
    /// [`write_archive`](crate::write_archive).
    ///
    /// # Errors
    /// Returns `DataError::Io` if the file cannot be read, or a parse error if
    /// its layout is wrong.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let table = read_factor_csv(std::fs::read(path)?, 1.0)?;
        debug!(rows = table.len(), path = %path.display(), "loaded factor archive");
        Ok(Self { table, name: format!("archive {}", path.display()), synthetic: false })
    }

    /// The full table.
    #[must_use]
    pub const fn table(&self) -> &FactorTable {
        &self.table
    }

    /// True for the generated sample from [`bundled`](Self::bundled).
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.synthetic
    }
}

impl FactorSource for ArchivedFactors {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, range: DateRange) -> Result<FactorTable, SourceError> {
        let table = self.table.filter_range(range);
        if table.is_empty() {
            let available =
                self.table.span().map_or_else(|| "nothing".to_string(), |s| s.to_string());
            return Err(SourceError::NoData(format!(
                "{} covers {available}, not {range}",
                self.name
            )));
        }
        if self.synthetic {
            warn!(
                source = %self.name,
                rows = table.len(),
                "serving synthetic factor data, betas do not reflect published factors"
            );
        }
        Ok(table)
    }
}
