use chrono::NaiveDate;

use super::model::{columns, Cell, Gender, RawRow, RawTable, SaleRecord, SalesDataset};
use crate::error::{DataError, Result};

/// Accepted in addition to the configured format (Parquet dates arrive as ISO).
const ISO_DATE: &str = "%Y-%m-%d";

/// Assign column types to the raw table and build the dataset.
///
/// * `Date` is parsed with `date_format`, falling back to ISO.
/// * `Invoice ID` is rendered as text whatever its source type.
/// * `Gender` must be exactly `Male` or `Female`.
/// * `Unit price` must be numeric and `Quantity` integral.
///
/// The raw table is left untouched, so normalizing it again yields an
/// identical dataset.
pub fn normalize(table: &RawTable, date_format: &str) -> Result<SalesDataset> {
    table.require_columns(&columns::REQUIRED)?;

    let records = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_no, row)| normalize_row(row_no, row, date_format))
        .collect::<Result<Vec<_>>>()?;

    let dataset = SalesDataset::from_records(records);
    log::info!(
        "Normalized {} records ({} cities, {} genders)",
        dataset.len(),
        dataset.cities.len(),
        dataset.genders.len()
    );
    Ok(dataset)
}

fn normalize_row(row_no: usize, row: &RawRow, date_format: &str) -> Result<SaleRecord> {
    let invoice_id = text(row_no, row, columns::INVOICE_ID)?;

    let raw_date = text(row_no, row, columns::DATE)?;
    let date = parse_date(&raw_date, date_format).ok_or_else(|| {
        bad_value(row_no, columns::DATE, &raw_date, &format!("expected {date_format}"))
    })?;

    // A missing city is kept as an empty string; it matches no filter value.
    let city = cell(row_no, row, columns::CITY)?
        .as_text()
        .unwrap_or_default();

    let raw_gender = text(row_no, row, columns::GENDER)?;
    let gender: Gender = raw_gender
        .parse()
        .map_err(|_| bad_value(row_no, columns::GENDER, &raw_gender, "expected Male or Female"))?;

    let product_line = text(row_no, row, columns::PRODUCT_LINE)?;

    let price_cell = cell(row_no, row, columns::UNIT_PRICE)?;
    let unit_price = price_cell
        .as_f64()
        .ok_or_else(|| bad_value(row_no, columns::UNIT_PRICE, price_cell, "not a number"))?;

    let qty_cell = cell(row_no, row, columns::QUANTITY)?;
    let quantity = qty_cell
        .as_i64()
        .ok_or_else(|| bad_value(row_no, columns::QUANTITY, qty_cell, "not an integer"))?;

    Ok(SaleRecord {
        invoice_id,
        date,
        city,
        gender,
        product_line,
        unit_price,
        quantity,
    })
}

/// Parse with the configured format first, then ISO.
pub fn parse_date(s: &str, date_format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, date_format)
        .or_else(|_| NaiveDate::parse_from_str(s, ISO_DATE))
        .ok()
}

fn cell<'a>(row_no: usize, row: &'a RawRow, column: &str) -> Result<&'a Cell> {
    row.get(column)
        .ok_or_else(|| DataError::schema(format!("row {row_no}: column '{column}' is missing")))
}

fn text(row_no: usize, row: &RawRow, column: &str) -> Result<String> {
    cell(row_no, row, column)?
        .as_text()
        .ok_or_else(|| DataError::schema(format!("row {row_no}: column '{column}' is empty")))
}

fn bad_value(row_no: usize, column: &str, value: impl std::fmt::Display, why: &str) -> DataError {
    DataError::schema(format!("row {row_no}, column '{column}': '{value}' ({why})"))
}
