/// Data layer: core types, loading, normalization, filtering, aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (untyped cells)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  type columns → SalesDataset (read-only from here on)
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  city / gender equality → SalesView (borrowed records)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  totals, counts, per-line sums, weekly sums, histogram
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
