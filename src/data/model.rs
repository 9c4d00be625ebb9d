use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{DataError, Result};

// ---------------------------------------------------------------------------
// Column names of the sales file
// ---------------------------------------------------------------------------

pub mod columns {
    pub const INVOICE_ID: &str = "Invoice ID";
    pub const DATE: &str = "Date";
    pub const CITY: &str = "City";
    pub const GENDER: &str = "Gender";
    pub const PRODUCT_LINE: &str = "Product line";
    pub const UNIT_PRICE: &str = "Unit price";
    pub const QUANTITY: &str = "Quantity";

    /// Every column the normalizer reads. Other columns are carried but unused.
    pub const REQUIRED: [&str; 7] = [
        INVOICE_ID,
        DATE,
        CITY,
        GENDER,
        PRODUCT_LINE,
        UNIT_PRICE,
        QUANTITY,
    ];
}

// ---------------------------------------------------------------------------
// Cell – a single untyped value as read from the source file
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, before the normalizer assigns column types.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::String(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Null => write!(f, "<null>"),
        }
    }
}

impl Cell {
    /// A CSV field: empty means null, anything else stays text until the
    /// normalizer decides the column type.
    pub fn from_text(s: &str) -> Self {
        if s.is_empty() {
            Cell::Null
        } else {
            Cell::String(s.to_string())
        }
    }

    /// Numeric view of the cell; text is parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Integer(i) => Some(*i as f64),
            Cell::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Integer view of the cell; floats are accepted only when integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Integer(i) => Some(*i),
            Cell::String(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .or_else(|| Cell::Float(s.trim().parse().ok()?).as_i64()),
            Cell::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            _ => None,
        }
    }

    /// Text view of the cell; `None` for nulls.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

// ---------------------------------------------------------------------------
// RawTable – the loader's output
// ---------------------------------------------------------------------------

/// One source row: column name → cell.
pub type RawRow = BTreeMap<String, Cell>;

/// The file contents as read, in row order, with no column typing applied.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names in file order.
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fail with a schema error naming the first missing column.
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        for name in required {
            if !self.columns.iter().any(|c| c == name) {
                return Err(DataError::schema(format!(
                    "required column '{name}' is absent (found: {})",
                    self.columns.join(", ")
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Female" => Ok(Gender::Female),
            "Male" => Ok(Gender::Male),
            other => Err(DataError::schema(format!("unknown gender '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// SaleRecord – one normalized line of an invoice
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub invoice_id: String,
    pub date: NaiveDate,
    pub city: String,
    pub gender: Gender,
    pub product_line: String,
    pub unit_price: f64,
    pub quantity: i64,
}

impl SaleRecord {
    /// Line total. Always derived from price and quantity, never stored.
    pub fn total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete normalized table
// ---------------------------------------------------------------------------

/// The read-only dataset shared by every filter event.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    pub records: Vec<SaleRecord>,
    /// Distinct cities in first-appearance order (city dropdown options).
    pub cities: Vec<String>,
    /// Distinct genders in first-appearance order (gender dropdown options).
    pub genders: Vec<Gender>,
}

impl SalesDataset {
    /// Build the dropdown option lists from the records.
    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        let mut cities: Vec<String> = Vec::new();
        let mut genders: Vec<Gender> = Vec::new();

        for rec in &records {
            if !rec.city.is_empty() && !cities.contains(&rec.city) {
                cities.push(rec.city.clone());
            }
            if !genders.contains(&rec.gender) {
                genders.push(rec.gender);
            }
        }
        SalesDataset {
            records,
            cities,
            genders,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(invoice: &str, city: &str, gender: Gender) -> SaleRecord {
        SaleRecord {
            invoice_id: invoice.to_string(),
            date: NaiveDate::from_ymd_opt(2019, 1, 5).unwrap(),
            city: city.to_string(),
            gender,
            product_line: "Health and beauty".to_string(),
            unit_price: 12.5,
            quantity: 4,
        }
    }

    #[test]
    fn total_is_price_times_quantity() {
        let mut rec = record("1", "Yangon", Gender::Female);
        assert_eq!(rec.total(), 50.0);
        rec.quantity = 2;
        assert_eq!(rec.total(), 25.0);
    }

    #[test]
    fn option_lists_keep_first_appearance_order() {
        let ds = SalesDataset::from_records(vec![
            record("1", "Yangon", Gender::Male),
            record("2", "Mandalay", Gender::Female),
            record("3", "Yangon", Gender::Female),
            record("4", "Naypyitaw", Gender::Male),
        ]);
        assert_eq!(ds.cities, vec!["Yangon", "Mandalay", "Naypyitaw"]);
        assert_eq!(ds.genders, vec![Gender::Male, Gender::Female]);
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn text_cells_coerce_on_demand() {
        assert_eq!(Cell::from_text(""), Cell::Null);
        assert_eq!(Cell::from_text("007").as_text().as_deref(), Some("007"));
        assert_eq!(Cell::from_text("74.69").as_f64(), Some(74.69));
        assert_eq!(Cell::from_text("7").as_i64(), Some(7));
        assert_eq!(Cell::from_text("7.0").as_i64(), Some(7));
        assert_eq!(Cell::from_text("7.5").as_i64(), None);
        assert_eq!(Cell::from_text("abc").as_f64(), None);
        assert_eq!(Cell::Float(3.0).as_i64(), Some(3));
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let table = RawTable::new(vec!["Invoice ID".into(), "Date".into()], Vec::new());
        let err = table.require_columns(&columns::REQUIRED).unwrap_err();
        assert!(matches!(err, DataError::Schema(msg) if msg.contains("City")));
    }

    #[test]
    fn gender_parsing_is_exact() {
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("female".parse::<Gender>().is_err());
    }
}
