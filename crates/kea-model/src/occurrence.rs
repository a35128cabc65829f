//! Percentile rank of observed displacements (probability of occurrence).

use kea_core::{
    check_displacements, check_location_range, check_paired_lengths, CoefficientSelection,
    KeaError, Scenario, Style,
};

use crate::predictor::FaultDisplacementModel;
use crate::transform::{box_cox, non_exceedance};

/// Percentile rank of each observed (location, displacement) pair.
///
/// Uses the unfolded model: observed profiles are expected to be arranged
/// with their peak at location <= 0.5, so folding would count the
/// asymmetry twice. Magnitude warnings go to `tracing` only.
pub fn prob_occur(
    model: &FaultDisplacementModel,
    magnitude: f64,
    locations: &[f64],
    style: Style,
    displacements: &[f64],
    selection: CoefficientSelection,
) -> Result<Vec<f64>, KeaError> {
    check_paired_lengths(locations, displacements)?;
    let point = selection.require_point()?;
    check_displacements(displacements)?;
    for &location in locations {
        check_location_range(location)?;
    }
    let base = Scenario::new(magnitude, 0.0, style, point.into());
    model.check_scenario_magnitude(&base)?;
    tracing::debug!(magnitude, %style, pairs = locations.len(), "percentile rank");

    let mut ranks = Vec::with_capacity(locations.len());
    for (&location, &displ) in locations.iter().zip(displacements) {
        for params in model.evaluate(&base.at(location))? {
            let y = box_cox(displ, params.bc_param);
            ranks.push(non_exceedance(y, params.mean, params.stdv_total)?);
        }
    }
    Ok(ranks)
}
