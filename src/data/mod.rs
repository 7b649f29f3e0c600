/// Data layer: raw records, loading, and numeric inference.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (text fields)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  coverage test per column → NumericColumns
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod classify;
