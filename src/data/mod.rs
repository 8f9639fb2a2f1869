/// Data layer: record store, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → RecordStore
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RecordStore │  Vec<Record>, distinct makes
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  search text + selected make → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  group counts, range stats, segment → DashboardView
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
