//! Partition store and pseudo-experiment orchestration for a Higgs
//! physics-classification challenge dataset.
//!
//! The crate owns the lifecycle of one input directory's train/test
//! partitions: loading them from the fixed on-disk layout (parquet feature
//! tables, newline-separated label/weight vectors, JSON settings), caching
//! them in memory, and invalidating the train side on demand.  On top of the
//! cached test partition it orchestrates synthetic "pseudo-experiment" test
//! sets: a bootstrap resampling step followed by parametrized systematic
//! shifts, both delegated to an injected [`Systematics`] collaborator.
//!
//! ```no_run
//! use higgs_datasets::{DatasetManager, PseudoParams, generate_pseudo_experiment};
//! # fn run(systematics: &impl higgs_datasets::Systematics) -> higgs_datasets::Result<()> {
//! let mut manager = DatasetManager::new("public_data/input_data");
//! manager.load_test()?;
//!
//! let observed = generate_pseudo_experiment(
//!     &manager,
//!     &PseudoParams { mu: 2.0, seed: 7, ..PseudoParams::default() },
//!     systematics,
//! )?;
//! # let _ = observed;
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod provision;

pub use data::manager::DatasetManager;
pub use data::model::{FeatureTable, MetadataValue, Process, Settings, TestSet, TrainSet};
pub use data::pseudo::{generate_pseudo_experiment, PseudoParams};
pub use data::systematics::{Systematics, TrainSystParams};
pub use error::{DataError, Result};
pub use provision::{public_dataset, ArchiveProvisioner, PreExtracted};
