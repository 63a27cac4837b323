use crate::error::Result;

use super::model::{TestSet, TrainSet};

// ---------------------------------------------------------------------------
// Systematics collaborator contract
// ---------------------------------------------------------------------------

/// The statistical collaborator performing bootstrap resampling and
/// systematic shifts.  The numerical transforms live outside this crate;
/// only their contract is fixed here:
///
/// * Both steps accept and return the same per-category/tabular shape they
///   were given and never mutate their input.
/// * [`bootstrap`](Systematics::bootstrap) is the only point where sampling
///   randomness enters, and its outcome is fully determined by `seed` for
///   fixed input data — same seed + same input ⇒ identical resampled rows.
///
/// Injecting the collaborator keeps the lifecycle code testable against a
/// deterministic stub.
pub trait Systematics {
    /// Resample the test set, scaling the signal by `mu` and the named
    /// backgrounds by their optional overrides (`None` means no override).
    fn bootstrap(
        &self,
        test_set: &TestSet,
        mu: f64,
        ttbar_scale: Option<f64>,
        diboson_scale: Option<f64>,
        bkg_scale: Option<f64>,
        seed: u64,
    ) -> Result<TestSet>;

    /// Apply tau-energy-scale, jet-energy-scale and soft-MET shifts to a
    /// test-shaped set.
    fn apply_systematics(&self, test_set: TestSet, tes: f64, jes: f64, soft_met: f64)
        -> Result<TestSet>;

    /// Apply shifts and scale overrides to a train-shaped set.
    fn apply_train_systematics(
        &self,
        train_set: &TrainSet,
        params: &TrainSystParams,
    ) -> Result<TrainSet>;
}

/// Shift parameters for the train-side systematics entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainSystParams {
    /// Tau energy scale.
    pub tes: f64,
    /// Jet energy scale.
    pub jes: f64,
    /// Soft missing-energy term.
    pub soft_met: f64,
    pub ttbar_scale: Option<f64>,
    pub diboson_scale: Option<f64>,
    pub bkg_scale: Option<f64>,
}

impl Default for TrainSystParams {
    fn default() -> Self {
        Self {
            tes: 1.0,
            jes: 1.0,
            soft_met: 0.0,
            ttbar_scale: None,
            diboson_scale: None,
            bkg_scale: None,
        }
    }
}
