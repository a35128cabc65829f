//! Conditional probability of exceedance for trial displacements.

use kea_core::{check_displacements, check_location_range, KeaError, ModelId, Scenario, Style};
use serde::{Deserialize, Serialize};

use crate::predictor::FaultDisplacementModel;
use crate::transform::{box_cox, exceedance};

/// Output switches for the exceedance calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceedanceOptions {
    /// Fold the site with its complement.
    pub folded: bool,
    /// Return the exploded table of intermediates.
    pub debug: bool,
}

impl Default for ExceedanceOptions {
    fn default() -> Self {
        Self {
            folded: true,
            debug: false,
        }
    }
}

/// One (coefficient row, trial displacement) entry of a full-posterior result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExceedanceRow {
    /// Coefficient row identifier.
    pub model_id: ModelId,
    /// Trial displacement in meters.
    pub displ_meters: f64,
    /// Folded probability, when folding was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probex_folded: Option<f64>,
    /// Site probability, when folding was disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probex_site: Option<f64>,
}

/// Every intermediate for one (coefficient row, trial displacement) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExceedanceDebugRow {
    /// Earthquake moment magnitude.
    pub magnitude: f64,
    /// Normalized site location.
    pub location: f64,
    /// Style of faulting.
    pub style: Style,
    /// Coefficient row identifier.
    pub model_id: ModelId,
    /// Box-Cox transformation parameter.
    pub bc_param: f64,
    /// Mean in transformed units at the site.
    pub mean_site: f64,
    /// Total standard deviation in transformed units at the site.
    pub stdv_site: f64,
    /// Mean in transformed units at the complementary location.
    pub mean_complement: f64,
    /// Total standard deviation in transformed units at the complementary location.
    pub stdv_complement: f64,
    /// Trial displacement in meters.
    pub displ_meters: f64,
    /// Trial displacement in transformed units.
    pub transformed_displ: f64,
    /// Probability of exceedance at the site.
    pub probex_site: f64,
    /// Probability of exceedance at the complementary location.
    pub probex_complement: f64,
    /// Mean of the site and complement probabilities.
    pub probex_folded: f64,
}

/// Result of an exceedance calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceedanceOutput {
    /// One probability per trial displacement (point estimates).
    Curve(Vec<f64>),
    /// One entry per coefficient row and trial displacement (full posterior).
    Table(Vec<ExceedanceRow>),
    /// Every intermediate quantity.
    Debug(Vec<ExceedanceDebugRow>),
}

/// Probability that each trial displacement is exceeded for one scenario.
///
/// Out-of-range magnitudes are logged through `tracing` and not returned.
pub fn prob_exceed(
    model: &FaultDisplacementModel,
    scenario: &Scenario,
    displacements: &[f64],
    opts: &ExceedanceOptions,
) -> Result<ExceedanceOutput, KeaError> {
    check_location_range(scenario.location)?;
    check_displacements(displacements)?;
    model.check_scenario_magnitude(scenario)?;
    tracing::debug!(
        magnitude = scenario.magnitude,
        location = scenario.location,
        style = %scenario.style,
        trials = displacements.len(),
        "probability of exceedance"
    );

    let site = model.evaluate(scenario)?;
    let complement = model.evaluate(&scenario.complement())?;
    let mut rows = Vec::with_capacity(site.len() * displacements.len());
    for (at_site, at_complement) in site.iter().zip(complement.iter()) {
        let lambda = at_site.bc_param;
        for &displ in displacements {
            let y = box_cox(displ, lambda);
            let probex_site = exceedance(y, at_site.mean, at_site.stdv_total)?;
            let probex_complement = exceedance(y, at_complement.mean, at_complement.stdv_total)?;
            rows.push(ExceedanceDebugRow {
                magnitude: scenario.magnitude,
                location: scenario.location,
                style: scenario.style,
                model_id: at_site.model_id,
                bc_param: lambda,
                mean_site: at_site.mean,
                stdv_site: at_site.stdv_total,
                mean_complement: at_complement.mean,
                stdv_complement: at_complement.stdv_total,
                displ_meters: displ,
                transformed_displ: y,
                probex_site,
                probex_complement,
                probex_folded: (probex_site + probex_complement) / 2.0,
            });
        }
    }

    if opts.debug {
        return Ok(ExceedanceOutput::Debug(rows));
    }
    if scenario.selection.point().is_none() {
        let table = rows
            .iter()
            .map(|row| ExceedanceRow {
                model_id: row.model_id,
                displ_meters: row.displ_meters,
                probex_folded: opts.folded.then_some(row.probex_folded),
                probex_site: (!opts.folded).then_some(row.probex_site),
            })
            .collect();
        return Ok(ExceedanceOutput::Table(table));
    }
    let curve = rows
        .iter()
        .map(|row| {
            if opts.folded {
                row.probex_folded
            } else {
                row.probex_site
            }
        })
        .collect();
    Ok(ExceedanceOutput::Curve(curve))
}
