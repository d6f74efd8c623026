/// Data layer: core types, loading, and chart selection.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ResultsTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ResultsTable  │  Vec<MeasurementRow>, distinct types / algorithms
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  filter, group by threshold, project → Chart
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod select;
