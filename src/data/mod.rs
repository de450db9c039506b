/// Data layer: core types, loading, statistics, chart data and filtering.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .json / .parquet bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode by extension → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  named columns of CellValue, equal length
///   └──────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌──────────┐  ┌──────────┐  ┌──────────┐
///   │ summary   │  │  charts   │  │  filter   │  describe / chart data / range rows
///   └──────────┘  └──────────┘  └──────────┘
/// ```

pub mod charts;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
