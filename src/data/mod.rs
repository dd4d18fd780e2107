/// Data layer: core types, loading, filtering and view derivation.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (trimmed columns)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year == ∧ region == ∧ score > → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ presentation  │  prefix → TableView, drop nulls → ChartView
///   └──────────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod presentation;
