/// Data layer: launch records, loading, and the two chart computations.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet (file or URL)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → LaunchDataset (fail fast)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, site / booster index, read-only
///   └───────────────┘
///        │                         │
///        ▼                         ▼
///   ┌───────────┐            ┌──────────┐
///   │ aggregate  │ site →    │  filter   │ site + payload range →
///   └───────────┘ OutcomeChart └──────────┘ CorrelationChart
/// ```

pub mod aggregate;
pub mod chart;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
