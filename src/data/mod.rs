/// Data layer: core types, loading, partition lifecycle, and
/// pseudo-experiment orchestration.
///
/// Architecture:
/// ```text
///  input_dir/ (train/*, test/*)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse parquet / line files / settings JSON
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ DatasetManager  │  Option<TrainSet>, Option<TestSet>
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  pseudo   │  bootstrap + systematics → synthetic test set
///   └──────────┘
/// ```
pub mod loader;
pub mod manager;
pub mod model;
pub mod pseudo;
pub mod systematics;

#[cfg(test)]
pub(crate) mod fixtures;
