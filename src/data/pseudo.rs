use crate::error::{DataError, Result};

use super::manager::DatasetManager;
use super::model::TestSet;
use super::systematics::Systematics;

// ---------------------------------------------------------------------------
// Pseudo-experiment orchestration
// ---------------------------------------------------------------------------

/// Full parameter tuple for one pseudo-experiment, with the challenge
/// defaults (`mu = 1`, nominal energy scales, no background overrides,
/// `seed = 42`).
#[derive(Debug, Clone, PartialEq)]
pub struct PseudoParams {
    /// Signal strength multiplier.
    pub mu: f64,
    /// Tau energy scale.
    pub tes: f64,
    /// Jet energy scale.
    pub jes: f64,
    /// Soft missing-energy term.
    pub soft_met: f64,
    pub ttbar_scale: Option<f64>,
    pub diboson_scale: Option<f64>,
    pub bkg_scale: Option<f64>,
    /// Bootstrap seed; fully determines the resampling outcome for fixed
    /// input data.
    pub seed: u64,
}

impl Default for PseudoParams {
    fn default() -> Self {
        Self {
            mu: 1.0,
            tes: 1.0,
            jes: 1.0,
            soft_met: 0.0,
            ttbar_scale: None,
            diboson_scale: None,
            bkg_scale: None,
            seed: 42,
        }
    }
}

/// Generate one synthetic test set simulating a single experimental
/// observation: bootstrap-resample the loaded test partition, then apply the
/// systematic shifts, both through the injected collaborator.
///
/// The test partition must already be loaded — there is no implicit load
/// here, since repeated calls with different seeds must reuse the same base
/// data without re-reading disk.  The stored partition is never mutated, so
/// calls are independent and may use different parameter tuples against the
/// same cached base data.  Collaborator errors propagate unchanged.
pub fn generate_pseudo_experiment<S: Systematics>(
    manager: &DatasetManager,
    params: &PseudoParams,
    systematics: &S,
) -> Result<TestSet> {
    let test_set = manager.test_set().ok_or(DataError::PreconditionViolation(
        "test partition must be loaded before generating pseudo-experiments",
    ))?;

    log::debug!(
        "generating pseudo-experiment: mu={} tes={} jes={} soft_met={} seed={}",
        params.mu,
        params.tes,
        params.jes,
        params.soft_met,
        params.seed
    );

    let resampled = systematics.bootstrap(
        test_set,
        params.mu,
        params.ttbar_scale,
        params.diboson_scale,
        params.bkg_scale,
        params.seed,
    )?;

    systematics.apply_systematics(resampled, params.tes, params.jes, params.soft_met)
}
