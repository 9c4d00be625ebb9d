use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Days, NaiveDate};
use parquet::arrow::ArrowWriter;

const CITIES: [(&str, &str); 3] = [("A", "Yangon"), ("B", "Mandalay"), ("C", "Naypyitaw")];
const GENDERS: [&str; 2] = ["Female", "Male"];
const PRODUCT_LINES: [&str; 6] = [
    "Electronic accessories",
    "Fashion accessories",
    "Food and beverages",
    "Health and beauty",
    "Home and lifestyle",
    "Sports and travel",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

struct SaleLine {
    invoice_id: String,
    branch: &'static str,
    city: &'static str,
    gender: &'static str,
    product_line: &'static str,
    unit_price: f64,
    quantity: i64,
    date: NaiveDate,
}

fn generate(rng: &mut SimpleRng, invoices: usize) -> Vec<SaleLine> {
    // All dates inside one calendar year so week numbers do not collide.
    let first_day = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default();
    let mut lines = Vec::new();

    for _ in 0..invoices {
        let invoice_id = format!(
            "{:03}-{:02}-{:04}",
            rng.below(1000),
            rng.below(100),
            rng.below(10000)
        );
        let (branch, city) = CITIES[rng.below(CITIES.len())];
        let gender = GENDERS[rng.below(GENDERS.len())];
        let date = first_day + Days::new(rng.below(90) as u64);

        // Roughly one invoice in five has a second line.
        let n_lines = if rng.next_f64() < 0.2 { 2 } else { 1 };
        for _ in 0..n_lines {
            let unit_price = (1000.0 + rng.next_f64() * 9000.0).round() / 100.0;
            lines.push(SaleLine {
                invoice_id: invoice_id.clone(),
                branch,
                city,
                gender,
                product_line: PRODUCT_LINES[rng.below(PRODUCT_LINES.len())],
                unit_price,
                quantity: 1 + rng.below(10) as i64,
                date,
            });
        }
    }
    lines
}

fn write_csv(path: &str, lines: &[SaleLine]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record([
        "Invoice ID",
        "Branch",
        "City",
        "Gender",
        "Product line",
        "Unit price",
        "Quantity",
        "Date",
    ])?;
    for line in lines {
        writer.write_record([
            line.invoice_id.clone(),
            line.branch.to_string(),
            line.city.to_string(),
            line.gender.to_string(),
            line.product_line.to_string(),
            format!("{:.2}", line.unit_price),
            line.quantity.to_string(),
            line.date.format("%d/%m/%Y").to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, lines: &[SaleLine]) -> Result<()> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();

    let schema = Arc::new(Schema::new(vec![
        Field::new("Invoice ID", DataType::Utf8, false),
        Field::new("Branch", DataType::Utf8, false),
        Field::new("City", DataType::Utf8, false),
        Field::new("Gender", DataType::Utf8, false),
        Field::new("Product line", DataType::Utf8, false),
        Field::new("Unit price", DataType::Float64, false),
        Field::new("Quantity", DataType::Int64, false),
        Field::new("Date", DataType::Date32, false),
    ]));

    let strings = |f: fn(&SaleLine) -> &str| {
        StringArray::from(lines.iter().map(f).collect::<Vec<_>>())
    };

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(strings(|l| l.invoice_id.as_str())),
            Arc::new(strings(|l| l.branch)),
            Arc::new(strings(|l| l.city)),
            Arc::new(strings(|l| l.gender)),
            Arc::new(strings(|l| l.product_line)),
            Arc::new(Float64Array::from(
                lines.iter().map(|l| l.unit_price).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                lines.iter().map(|l| l.quantity).collect::<Vec<_>>(),
            )),
            Arc::new(Date32Array::from(
                lines
                    .iter()
                    .map(|l| (l.date - epoch).num_days() as i32)
                    .collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let lines = generate(&mut rng, 400);

    write_csv("sample_sales.csv", &lines)?;
    write_parquet("sample_sales.parquet", &lines)?;

    println!(
        "Wrote {} sale lines to sample_sales.csv and sample_sales.parquet",
        lines.len()
    );
    Ok(())
}
