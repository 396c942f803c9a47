//! Primary-with-fallback factor source.

use stockbeta_primitives::{DateRange, FactorTable};
use stockbeta_traits::{FactorSource, SourceError};
use tracing::warn;

/// Which source answered a [`FallbackFactorSource`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorOrigin {
    /// The primary source.
    Primary,
    /// The fallback, after the primary failed recoverably.
    Fallback,
}

/// Tries `primary` and answers from `fallback` when it fails recoverably.
///
/// Non-recoverable primary errors are returned as-is; the fallback is not
/// consulted.
#[derive(Debug, Clone)]
pub struct FallbackFactorSource<P, F> {
    primary: P,
    fallback: F,
    name: String,
}

impl<P: FactorSource, F: FactorSource> FallbackFactorSource<P, F> {
    /// Combine two sources.
    pub fn new(primary: P, fallback: F) -> Self {
        let name = format!("{}, falling back to {}", primary.name(), fallback.name());
        Self { primary, fallback, name }
    }

    /// The primary source.
    pub const fn primary(&self) -> &P {
        &self.primary
    }

    /// The fallback source.
    pub const fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Name of the source that produced data of the given origin.
    pub fn source_name(&self, origin: FactorOrigin) -> &str {
        match origin {
            FactorOrigin::Primary => self.primary.name(),
            FactorOrigin::Fallback => self.fallback.name(),
        }
    }

    /// Fetch factors and report which source provided them.
    ///
    /// # Errors
    /// Returns the primary's error if it is not recoverable, otherwise the
    /// fallback's error if the fallback fails too.
    pub async fn fetch_with_origin(
        &self,
        range: DateRange,
    ) -> Result<(FactorTable, FactorOrigin), SourceError> {
        match self.primary.fetch(range).await {
            Ok(table) => Ok((table, FactorOrigin::Primary)),
            Err(err) if err.is_recoverable() => {
                warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %err,
                    "factor download failed, using fallback"
                );
                let table = self.fallback.fetch(range).await?;
                Ok((table, FactorOrigin::Fallback))
            }
            Err(err) => Err(err),
        }
    }
}

impl<P: FactorSource, F: FactorSource> FactorSource for FallbackFactorSource<P, F> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, range: DateRange) -> Result<FactorTable, SourceError> {
        self.fetch_with_origin(range).await.map(|(table, _)| table)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ndarray::array;
    use stockbeta_primitives::Date;

    use super::*;

    enum Outcome {
        Table(f64),
        Network,
        Io,
    }

    struct FakeSource {
        name: &'static str,
        outcome: Outcome,
        calls: AtomicUsize,
    }

    impl FakeSource {
        const fn new(name: &'static str, outcome: Outcome) -> Self {
            Self { name, outcome, calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl FactorSource for FakeSource {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch(&self, range: DateRange) -> Result<FactorTable, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::Table(mkt) => Ok(FactorTable::new(
                    vec![range.start()],
                    array![mkt],
                    array![0.0],
                    array![0.0],
                    array![0.0],
                )?),
                Outcome::Network => Err(SourceError::Network("connection refused".to_string())),
                Outcome::Io => Err(SourceError::Io(std::io::Error::other("disk"))),
            }
        }
    }

    fn range() -> DateRange {
        let day = Date::from_ymd_opt(2021, 1, 4).unwrap();
        DateRange::new(day, day).unwrap()
    }

    #[tokio::test]
    async fn primary_success_skips_fallback() {
        let source = FallbackFactorSource::new(
            FakeSource::new("live", Outcome::Table(0.01)),
            FakeSource::new("archive", Outcome::Table(0.02)),
        );
        let (table, origin) = source.fetch_with_origin(range()).await.unwrap();

        assert_eq!(origin, FactorOrigin::Primary);
        assert_eq!(table.column(stockbeta_primitives::FactorColumn::MktRf)[0], 0.01);
        assert_eq!(source.fallback().calls(), 0);
        assert_eq!(source.source_name(origin), "live");
    }

    #[tokio::test]
    async fn recoverable_failure_uses_fallback() {
        let source = FallbackFactorSource::new(
            FakeSource::new("live", Outcome::Network),
            FakeSource::new("archive", Outcome::Table(0.02)),
        );
        let (table, origin) = source.fetch_with_origin(range()).await.unwrap();

        assert_eq!(origin, FactorOrigin::Fallback);
        assert_eq!(table.column(stockbeta_primitives::FactorColumn::MktRf)[0], 0.02);
        assert_eq!(source.primary().calls(), 1);
        assert_eq!(source.source_name(origin), "archive");
    }

    #[tokio::test]
    async fn unrecoverable_failure_is_returned() {
        let source = FallbackFactorSource::new(
            FakeSource::new("live", Outcome::Io),
            FakeSource::new("archive", Outcome::Table(0.02)),
        );
        let err = source.fetch(range()).await.unwrap_err();

        assert!(matches!(err, SourceError::Io(_)));
        assert_eq!(source.fallback().calls(), 0);
    }

    #[tokio::test]
    async fn both_failing_returns_fallback_error() {
        let source = FallbackFactorSource::new(
            FakeSource::new("live", Outcome::Network),
            FakeSource::new("archive", Outcome::Io),
        );
        let err = source.fetch(range()).await.unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
        assert_eq!(source.name(), "live, falling back to archive");
    }
}
