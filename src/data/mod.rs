/// Data layer: table model, loading, caching, filtering and aggregation.
///
/// Architecture:
/// ```text
///   admissions .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + normalise → StudentTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  one Arc<StudentTable> per path (mtime-checked)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year / term selection → filtered view
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  sums, means, per-year / per-term groups
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
