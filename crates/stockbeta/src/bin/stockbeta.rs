//! Fama-French three-factor report for a single stock.
//!
//! Usage: `stockbeta --ticker AAPL [--start 2021-01-01] [--end 2021-12-31]`
//!
//! Factors come from the Kenneth French data library, falling back to the
//! bundled synthetic sample (or `--archive`) when the download fails. Prices come from
//! Yahoo Finance. Logs go to stderr; the report goes to stdout.

use std::{fs::File, path::PathBuf};

use clap::{Parser, ValueEnum};
use stockbeta::{
    data::{
        ArchivedFactors, FallbackFactorSource, FrenchFactorSource, YahooPriceSource, align,
        write_archive,
    },
    model::{ExposureReport, calculate_factor_exposures},
    primitives::{Date, DateRange, FactorTable, PriceSeries, Symbol},
    traits::{FactorSource, PriceSource},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Plain-text report
    Text,
    /// JSON object
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "stockbeta")]
#[command(about = "Fama-French three-factor exposures for a stock", long_about = None)]
#[command(version)]
struct Args {
    /// Stock symbol, e.g. AAPL
    #[arg(long)]
    ticker: String,

    /// First date of the analysis (YYYY-MM-DD)
    #[arg(long, default_value = "2021-01-01")]
    start: Date,

    /// Last date of the analysis (YYYY-MM-DD), inclusive
    #[arg(long, default_value = "2021-12-31")]
    end: Date,

    /// Use the archive without trying to download factors
    #[arg(long)]
    offline: bool,

    /// Factor archive to use instead of the bundled synthetic sample
    #[arg(long, env = "STOCKBETA_ARCHIVE")]
    archive: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the factor table used to this path, in archive format
    #[arg(long, value_name = "PATH")]
    export_factors: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    match run(&args).await {
        Ok(report) => match args.format {
            OutputFormat::Text => println!("{report}"),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        },
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run(args: &Args) -> Result<ExposureReport, Box<dyn std::error::Error>> {
    let range = DateRange::new(args.start, args.end)?;
    let symbol = Symbol::new(args.ticker.as_str());
    if symbol.is_empty() {
        return Err("ticker must not be empty".into());
    }

    let archive = match &args.archive {
        Some(path) => ArchivedFactors::from_path(path)?,
        None => ArchivedFactors::bundled()?,
    };

    let (factors, source) = if args.offline {
        info!(source = archive.name(), "offline, skipping factor download");
        (archive.fetch(range).await?, archive.name().to_string())
    } else {
        let factor_source = FallbackFactorSource::new(FrenchFactorSource::new()?, archive);
        let (table, origin) = factor_source.fetch_with_origin(range).await?;
        (table, factor_source.source_name(origin).to_string())
    };

    if let Some(path) = &args.export_factors {
        write_archive(&factors, File::create(path)?)?;
        info!(path = %path.display(), rows = factors.len(), "exported factor table");
    }

    let prices = YahooPriceSource::new()?.fetch(&symbol, range).await?;
    build_report(symbol, &prices, &factors, source)
}

/// Returns, alignment and statistics for already fetched inputs.
fn build_report(
    symbol: Symbol,
    prices: &PriceSeries,
    factors: &FactorTable,
    source: String,
) -> Result<ExposureReport, Box<dyn std::error::Error>> {
    let returns = prices.pct_change()?;
    let aligned = align(&returns, factors)?;
    let exposures = calculate_factor_exposures(aligned.returns(), aligned.factors())?;
    let range = aligned.span().ok_or("no aligned observations")?;

    info!(%symbol, observations = aligned.len(), %range, "computed factor exposures");
    Ok(ExposureReport { symbol, range, observations: aligned.len(), source, exposures })
}
