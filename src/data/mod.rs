/// Data layer: table type, loading, and sample fixtures.
///
/// Architecture:
/// ```text
///  .parquet / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  decode file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table   │  Arrow schema + record batches
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ display  │  head / full → divider-bounded text
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod sample;
