//! CSV layout of three-factor tables.
//!
//! Both the bundled archive and the daily block of the French data library
//! file are read as `date,Mkt-RF,SMB,HML,RF` with `YYYYMMDD` dates. They
//! differ only in scale: the archive stores decimals, the library percents.

use std::io::{Cursor, Write};

use chrono::Datelike;
use ndarray::Array1;
use polars::prelude::*;
use stockbeta_primitives::{Date, FactorColumn, FactorTable};

use crate::DataError;

pub(crate) const DATE_COLUMN: &str = "date";

/// Scale applied to values stored as percents.
pub(crate) const PERCENT: f64 = 0.01;

/// Header line of the archive format.
pub(crate) const ARCHIVE_HEADER: &str = "date,Mkt-RF,SMB,HML,RF";

/// Parse a `YYYYMMDD` integer date.
pub(crate) fn parse_yyyymmdd(value: i64) -> Result<Date, DataError> {
    let invalid = || DataError::Malformed(format!("invalid YYYYMMDD date: {value}"));
    if !(10_000_101..=99_991_231).contains(&value) {
        return Err(invalid());
    }
    let year = i32::try_from(value / 10_000).map_err(|_| invalid())?;
    let month = u32::try_from(value / 100 % 100).map_err(|_| invalid())?;
    let day = u32::try_from(value % 100).map_err(|_| invalid())?;
    Date::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

pub(crate) fn to_yyyymmdd(date: Date) -> i64 {
    i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day())
}

pub(crate) fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, DataError> {
    df.column(name).map_err(|_| DataError::MissingColumn(name.to_string()))
}

/// Read a numeric column as `f64`, multiplied by `scale`. Nulls are rejected.
pub(crate) fn float_values(
    df: &DataFrame,
    name: &str,
    scale: f64,
) -> Result<Array1<f64>, DataError> {
    let values = column(df, name)?.cast(&DataType::Float64)?;
    values
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.map(|v| v * scale).ok_or_else(|| {
                DataError::Malformed(format!("missing or non-numeric {name} value in row {row}"))
            })
        })
        .collect()
}

/// Parse a factor CSV held in memory.
pub(crate) fn read_factor_csv(bytes: Vec<u8>, scale: f64) -> Result<FactorTable, DataError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    for name in std::iter::once(DATE_COLUMN).chain(FactorColumn::ALL.map(|c| c.name())) {
        column(&df, name)?;
    }
    if df.height() == 0 {
        return Err(DataError::Malformed("factor file has no rows".to_string()));
    }

    let df = df.lazy().sort([DATE_COLUMN], SortMultipleOptions::default()).collect()?;

    let raw_dates = column(&df, DATE_COLUMN)?.cast(&DataType::Int64)?;
    let dates = raw_dates
        .i64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.ok_or_else(|| DataError::Malformed(format!("missing or non-numeric date in row {row}")))
                .and_then(parse_yyyymmdd)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FactorTable::new(
        dates,
        float_values(&df, FactorColumn::MktRf.name(), scale)?,
        float_values(&df, FactorColumn::Smb.name(), scale)?,
        float_values(&df, FactorColumn::Hml.name(), scale)?,
        float_values(&df, FactorColumn::Rf.name(), scale)?,
    )?)
}

/// Write `table` in the archive format (`date,Mkt-RF,SMB,HML,RF`, `YYYYMMDD`
/// dates, decimal values).
///
/// # Errors
/// Returns `DataError::Polars` if the frame cannot be built or written.
pub fn write_archive<W: Write>(table: &FactorTable, writer: W) -> Result<(), DataError> {
    let dates: Vec<i64> = table.dates().iter().copied().map(to_yyyymmdd).collect();

    let mut columns = Vec::with_capacity(1 + FactorColumn::ALL.len());
    columns.push(Column::new(DATE_COLUMN.into(), dates));
    for factor in FactorColumn::ALL {
        columns.push(Column::new(factor.name().into(), table.column(factor).to_vec()));
    }
    let mut df = DataFrame::new(columns)?;

    CsvWriter::new(writer).include_header(true).with_float_precision(Some(6)).finish(&mut df)?;
    Ok(())
}
