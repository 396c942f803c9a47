//! Kenneth French data library source.

use std::{
    io::{Cursor, Read},
    time::Duration,
};

use stockbeta_primitives::{DateRange, FactorTable};
use stockbeta_traits::{FactorSource, SourceError};
use tracing::{debug, info};

use crate::{
    DataError,
    frame::{ARCHIVE_HEADER, PERCENT, read_factor_csv},
};

/// Daily three-factor file in the Kenneth French data library.
pub const FRENCH_DAILY_URL: &str = "https://mba.tuck.dartmouth.edu/pages/faculty/ken.french/ftp/F-F_Research_Data_Factors_daily_CSV.zip";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const DAILY_HEADER: [&str; 5] = ["", "Mkt-RF", "SMB", "HML", "RF"];

/// Downloads the daily Fama-French three factors.
#[derive(Debug, Clone)]
pub struct FrenchFactorSource {
    client: reqwest::Client,
    url: String,
}

impl FrenchFactorSource {
    /// Source reading from [`FRENCH_DAILY_URL`].
    ///
    /// # Errors
    /// Returns `SourceError::Network` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, SourceError> {
        Self::with_url(FRENCH_DAILY_URL)
    }

    /// Source reading a zip in the same layout from another location.
    ///
    /// # Errors
    /// Returns `SourceError::Network` if the HTTP client cannot be built.
    pub fn with_url(url: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;
        Ok(Self { client, url: url.into() })
    }

    /// Location the zip is downloaded from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn download(&self) -> Result<Vec<u8>, SourceError> {
        let network = |e: reqwest::Error| SourceError::Network(format!("{}: {e}", self.url));
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(network)?
            .error_for_status()
            .map_err(network)?;
        let bytes = response.bytes().await.map_err(network)?;
        debug!(bytes = bytes.len(), "downloaded factor zip");
        Ok(bytes.to_vec())
    }
}

impl FactorSource for FrenchFactorSource {
    fn name(&self) -> &str {
        "Kenneth French data library"
    }

    async fn fetch(&self, range: DateRange) -> Result<FactorTable, SourceError> {
        info!(url = %self.url, %range, "fetching Fama-French daily factors");
        let zipped = self.download().await?;
        let text = unzip_single(&zipped)?;
        let table = parse_french_daily(&text)?.filter_range(range);
        if table.is_empty() {
            return Err(SourceError::NoData(format!("no factor rows in {range}")));
        }
        Ok(table)
    }
}

/// Contents of the single file inside a data library zip.
fn unzip_single(bytes: &[u8]) -> Result<String, DataError> {
    let malformed = |e: zip::result::ZipError| DataError::Malformed(format!("zip: {e}"));
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(malformed)?;
    if archive.is_empty() {
        return Err(DataError::Malformed("zip archive is empty".to_string()));
    }
    let mut file = archive.by_index(0).map_err(malformed)?;
    let mut raw = Vec::new();
    file.read_to_end(&mut raw)?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Parse the daily block of a data library factor file.
///
/// The file opens with a free-text preamble, then a `,Mkt-RF,SMB,HML,RF`
/// header and one `YYYYMMDD` row per trading day with values in percent. The
/// block ends at the first blank or non-daily line (annual blocks, copyright).
/// Values are returned decimal-scaled.
///
/// # Errors
/// Returns `DataError::Malformed` if the header is missing, the block is
/// empty, or a row does not have five fields.
pub fn parse_french_daily(text: &str) -> Result<FactorTable, DataError> {
    let mut lines = text.lines().map(str::trim);
    lines.by_ref().find(|line| split_fields(line) == DAILY_HEADER).ok_or_else(|| {
        DataError::Malformed("daily header ,Mkt-RF,SMB,HML,RF not found".to_string())
    })?;

    let mut csv = format!("{ARCHIVE_HEADER}\n");
    let mut rows = 0usize;
    for line in lines {
        let fields = split_fields(line);
        let is_daily = fields[0].len() == 8 && fields[0].bytes().all(|b| b.is_ascii_digit());
        if !is_daily {
            break;
        }
        if fields.len() != DAILY_HEADER.len() {
            return Err(DataError::Malformed(format!(
                "expected {} fields, got {}: {line}",
                DAILY_HEADER.len(),
                fields.len()
            )));
        }
        csv.push_str(&fields.join(","));
        csv.push('\n');
        rows += 1;
    }

    if rows == 0 {
        return Err(DataError::Malformed("daily block is empty".to_string()));
    }
    debug!(rows, "parsed daily factor block");
    read_factor_csv(csv.into_bytes(), PERCENT)
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use approx::assert_relative_eq;
    use stockbeta_primitives::{Date, FactorColumn};

    use super::*;

    const SAMPLE: &str = "This file was created by CMPT_ME_BEME_RETS_DAILY using the 202112 CRSP database.\r\n\
The 1-month TBill return is from Ibbotson and Associates Inc.\r\n\
\r\n\
,Mkt-RF,SMB,HML,RF\r\n\
20210104,   -1.41,    0.15,    0.67,   0.000\r\n\
20210105,    0.86,    1.22,    0.47,   0.000\r\n\
20210106,    0.79,    2.04,    4.00,   0.000\r\n\
20210107,    1.76,   -0.61,   -0.56,   0.000\r\n\
20210108,    0.50,   -1.17,   -1.45,   0.000\r\n\
\r\n\
Copyright 2022 Kenneth R. French\r\n";

    fn date(d: u32) -> Date {
        Date::from_ymd_opt(2021, 1, d).unwrap()
    }

    #[test]
    fn parses_daily_block() {
        let table = parse_french_daily(SAMPLE).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.dates()[0], date(4));
        assert_eq!(table.dates()[4], date(8));
        assert_relative_eq!(table.column(FactorColumn::MktRf)[0], -0.0141, epsilon = 1e-12);
        assert_relative_eq!(table.column(FactorColumn::Hml)[2], 0.04, epsilon = 1e-12);
        assert_relative_eq!(table.column(FactorColumn::Smb)[4], -0.0117, epsilon = 1e-12);
    }

    #[test]
    fn stops_at_annual_block() {
        let text = ",Mkt-RF,SMB,HML,RF\n\
                    20210104,-1.41,0.15,0.67,0.000\n\
                    \n\
                    Annual Factors: January-December\n\
                    ,Mkt-RF,SMB,HML,RF\n\
                    2021,23.56,-3.89,25.48,0.04\n";
        let table = parse_french_daily(text).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_header_is_malformed() {
        let err = parse_french_daily("20210104,-1.41,0.15,0.67,0.000\n").unwrap_err();
        assert!(matches!(err, DataError::Malformed(_)));
    }

    #[test]
    fn empty_block_is_malformed() {
        let err = parse_french_daily(",Mkt-RF,SMB,HML,RF\n\nCopyright\n").unwrap_err();
        assert!(matches!(err, DataError::Malformed(_)));
    }

    #[test]
    fn short_row_is_malformed() {
        let err = parse_french_daily(",Mkt-RF,SMB,HML,RF\n20210104,-1.41,0.15\n").unwrap_err();
        assert!(matches!(err, DataError::Malformed(_)));
    }

    #[test]
    fn reads_zip_payload() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("F-F_Research_Data_Factors_daily.CSV", options).unwrap();
            writer.write_all(SAMPLE.as_bytes()).unwrap();
            writer.finish().unwrap();
        }

        let text = unzip_single(buffer.get_ref()).unwrap();
        assert_eq!(parse_french_daily(&text).unwrap().len(), 5);
    }

    #[test]
    fn garbage_zip_is_malformed() {
        let err = unzip_single(b"not a zip").unwrap_err();
        assert!(matches!(err, DataError::Malformed(_)));
        assert!(SourceError::from(err).is_recoverable());
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let source = FrenchFactorSource::with_url("http://127.0.0.1:9/factors.zip").unwrap();
        let range = DateRange::new(date(4), date(8)).unwrap();
        let err = source.fetch(range).await.unwrap_err();
        assert!(matches!(err, SourceError::Network(_)));
    }
}
