use kea_coeffs::{CoefficientStore, StoreConfig};
use kea_core::{
    check_finite, check_location_range, check_magnitude_range, DistributionParams, ErrorInfo,
    KeaError, MagnitudeWarning, Scenario,
};
use serde::{Deserialize, Serialize};

use crate::formulas::predict;

/// Distribution parameters for one scenario plus any non-fatal warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamsPrediction {
    /// One entry per evaluated coefficient row.
    pub params: Vec<DistributionParams>,
    /// Recommended-range warnings raised while validating the scenario.
    pub warnings: Vec<MagnitudeWarning>,
}

/// The fault displacement model: an immutable coefficient store plus the
/// prediction entry points.
#[derive(Debug, Clone)]
pub struct FaultDisplacementModel {
    store: CoefficientStore,
}

impl FaultDisplacementModel {
    /// Wraps an already loaded coefficient store.
    pub fn new(store: CoefficientStore) -> Self {
        Self { store }
    }

    /// Loads every coefficient table described by `config`.
    pub fn load(config: &StoreConfig) -> Result<Self, KeaError> {
        CoefficientStore::load(config).map(Self::new)
    }

    /// Underlying coefficient store.
    pub fn store(&self) -> &CoefficientStore {
        &self.store
    }

    /// Predicts distribution parameters for a single scenario.
    ///
    /// Rejects non-finite inputs and locations outside [0, 1]; a magnitude
    /// outside the style's recommended range only adds a warning.
    pub fn predict_params(&self, scenario: &Scenario) -> Result<ParamsPrediction, KeaError> {
        check_finite(scenario.magnitude, "magnitude")?;
        check_location_range(scenario.location)?;
        let warnings = check_magnitude_range(scenario.magnitude, scenario.style)
            .into_iter()
            .collect();
        let params = self.evaluate(scenario)?;
        Ok(ParamsPrediction { params, warnings })
    }

    /// Predicts parameters for several independent scenarios.
    ///
    /// Results are returned per scenario, in input order, so draws from
    /// different scenarios are never mixed.
    pub fn predict_params_batch(
        &self,
        scenarios: &[Scenario],
    ) -> Result<Vec<ParamsPrediction>, KeaError> {
        if scenarios.is_empty() {
            return Err(KeaError::Input(ErrorInfo::new(
                "empty-batch",
                "at least one scenario is required",
            )));
        }
        tracing::warn!(
            scenarios = scenarios.len(),
            "running multiple scenarios; track your magnitude/location pairs"
        );
        scenarios
            .iter()
            .map(|scenario| self.predict_params(scenario))
            .collect()
    }

    /// Evaluates the formulas without the boundary checks.
    ///
    /// Callers validate once and then sweep many locations of the same
    /// scenario through here.
    pub(crate) fn evaluate(
        &self,
        scenario: &Scenario,
    ) -> Result<Vec<DistributionParams>, KeaError> {
        let rows = self.store.rows(scenario.style, scenario.selection)?;
        Ok(rows
            .iter()
            .map(|row| predict(row, scenario.magnitude, scenario.location))
            .collect())
    }

    /// Validates the parts of a scenario shared by every location of a sweep.
    ///
    /// The calculators discard the returned warning; `check_magnitude_range`
    /// has already logged it.
    pub(crate) fn check_scenario_magnitude(
        &self,
        scenario: &Scenario,
    ) -> Result<Option<MagnitudeWarning>, KeaError> {
        check_finite(scenario.magnitude, "magnitude")?;
        Ok(check_magnitude_range(scenario.magnitude, scenario.style))
    }
}
