use std::path::{Path, PathBuf};

use crate::error::{DataError, Result};

use super::loader;
use super::model::{TestSet, TrainSet};
use super::systematics::{Systematics, TrainSystParams};

// ---------------------------------------------------------------------------
// Dataset manager
// ---------------------------------------------------------------------------

/// Single point of truth for the currently loaded train/test partitions of
/// one input directory.  All disk access is mediated here.
///
/// Both partitions start absent.  The train partition can be reloaded and
/// deleted freely; the test partition can only be (re)loaded — it is the
/// base for repeated pseudo-experiment sampling and stays resident.
///
/// Not synchronized: mutating operations require external serialization when
/// shared across threads.
pub struct DatasetManager {
    input_dir: PathBuf,
    train: Option<TrainSet>,
    test: Option<TestSet>,
    ground_truth_mus: Option<Vec<f64>>,
}

impl DatasetManager {
    /// Manager for the dataset tree rooted at `input_dir`; nothing is read
    /// until the first explicit load.
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            train: None,
            test: None,
            ground_truth_mus: None,
        }
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Load the train partition from disk, replacing any previously loaded
    /// one.  The test-side settings file is read as well, solely to cache the
    /// ground-truth mixture coefficients.
    ///
    /// On failure the manager keeps the partition it had before the call —
    /// a half-read partition is never installed.
    pub fn load_train(&mut self) -> Result<()> {
        log::info!("loading train partition from {}", self.input_dir.display());

        let train = loader::load_train(&self.input_dir)?;
        let mus = loader::load_ground_truth_mus(&self.input_dir)?;

        log::info!(
            "train partition loaded: {} events, {} features",
            train.data.num_rows(),
            train.data.num_columns()
        );

        self.train = Some(train);
        self.ground_truth_mus = Some(mus);
        Ok(())
    }

    /// Load the test partition (all four category tables), replacing any
    /// previously loaded one.  Same atomicity as [`load_train`]: a failed
    /// load leaves the previous partition untouched.
    ///
    /// [`load_train`]: DatasetManager::load_train
    pub fn load_test(&mut self) -> Result<()> {
        log::info!("loading test partition from {}", self.input_dir.display());

        let test = loader::load_test(&self.input_dir)?;

        log::info!(
            "test partition loaded: {} events across {} categories",
            test.values().map(|t| t.num_rows()).sum::<usize>(),
            test.len()
        );

        self.test = Some(test);
        Ok(())
    }

    /// The currently loaded train partition, if any.  Never touches disk.
    pub fn train_set(&self) -> Option<&TrainSet> {
        self.train.as_ref()
    }

    /// The currently loaded test partition, if any.  Never touches disk.
    pub fn test_set(&self) -> Option<&TestSet> {
        self.test.as_ref()
    }

    /// Ground-truth mixture coefficients cached by the last successful
    /// [`load_train`](DatasetManager::load_train).
    pub fn ground_truth_mus(&self) -> Option<&[f64]> {
        self.ground_truth_mus.as_deref()
    }

    /// Release the train partition to reclaim memory.  Idempotent; the test
    /// partition and the cached ground-truth coefficients are unaffected.
    pub fn delete_train(&mut self) {
        self.train = None;
    }

    /// Train partition with systematic variations applied.
    ///
    /// If the train partition is absent it is loaded first — the one "read"
    /// here with an implicit side effect (exactly one load if absent, zero
    /// if already present).  The stored partition remains the unperturbed
    /// baseline; the shifted copy is returned to the caller.
    pub fn systematics_train_set<S: Systematics>(
        &mut self,
        params: &TrainSystParams,
        systematics: &S,
    ) -> Result<TrainSet> {
        if self.train.is_none() {
            self.load_train()?;
        }
        let train = self.train.as_ref().ok_or(DataError::PreconditionViolation(
            "train partition absent after load",
        ))?;
        systematics.apply_train_systematics(train, params)
    }
}
