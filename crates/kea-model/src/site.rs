//! Deterministic displacement at a site (folded over the rupture complement).

use kea_core::{check_location_range, AleatoryLevel, ErrorInfo, KeaError, ModelId, Scenario, Style};
use serde::{Deserialize, Serialize};

use crate::predictor::FaultDisplacementModel;
use crate::transform::{to_meters, transformed_displacement};

/// Output switches for the site calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOptions {
    /// Report the folded displacement instead of the site displacement.
    pub folded: bool,
    /// Return every intermediate quantity instead of the displacements.
    pub debug: bool,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            folded: true,
            debug: false,
        }
    }
}

/// Every intermediate of a site calculation for one coefficient row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDebugRow {
    /// Earthquake moment magnitude.
    pub magnitude: f64,
    /// Normalized site location.
    pub location: f64,
    /// Style of faulting.
    pub style: Style,
    /// Requested percentile (`-1` for the mean).
    pub percentile: f64,
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
    /// Transformed displacement at the site.
    #[serde(rename = "Y_site")]
    pub y_site: f64,
    /// Transformed displacement at the complementary location.
    #[serde(rename = "Y_complement")]
    pub y_complement: f64,
    /// Average of the site and complement transformed displacements.
    #[serde(rename = "Y_folded")]
    pub y_folded: f64,
    /// Site displacement in meters.
    pub displ_site_meters: f64,
    /// Complementary-location displacement in meters.
    pub displ_complement_meters: f64,
    /// Folded displacement in meters.
    pub displ_folded_meters: f64,
}

/// Result of a single-scenario site calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteOutput {
    /// Displacement in meters, one per coefficient row.
    Displacements(Vec<f64>),
    /// Labelled intermediates, one row per coefficient row.
    Debug(Vec<SiteDebugRow>),
}

impl SiteOutput {
    /// Displacements regardless of the output mode.
    pub fn displacements(&self, folded: bool) -> Vec<f64> {
        match self {
            SiteOutput::Displacements(values) => values.clone(),
            SiteOutput::Debug(rows) => pick_displacements(rows, folded),
        }
    }
}

fn pick_displacements(rows: &[SiteDebugRow], folded: bool) -> Vec<f64> {
    rows.iter()
        .map(|row| {
            if folded {
                row.displ_folded_meters
            } else {
                row.displ_site_meters
            }
        })
        .collect()
}

/// Predicted displacement in meters for one scenario.
///
/// A magnitude outside the calibration range is only logged through
/// `tracing`; [`FaultDisplacementModel::predict_params`] returns it.
pub fn displ_site(
    model: &FaultDisplacementModel,
    scenario: &Scenario,
    level: AleatoryLevel,
    opts: &SiteOptions,
) -> Result<SiteOutput, KeaError> {
    check_location_range(scenario.location)?;
    model.check_scenario_magnitude(scenario)?;
    tracing::debug!(
        magnitude = scenario.magnitude,
        location = scenario.location,
        style = %scenario.style,
        %level,
        "displacement at site"
    );
    let rows = site_rows(model, scenario, level)?;
    if opts.debug {
        return Ok(SiteOutput::Debug(rows));
    }
    Ok(SiteOutput::Displacements(pick_displacements(&rows, opts.folded)))
}

/// Predicted displacements for several independent scenarios.
///
/// Debug output is unavailable here: intermediate tables of different
/// scenarios would not line up. An empty batch is an input error. Magnitude
/// warnings are logged per scenario, as in [`displ_site`].
pub fn displ_site_batch(
    model: &FaultDisplacementModel,
    scenarios: &[Scenario],
    level: AleatoryLevel,
    opts: &SiteOptions,
) -> Result<Vec<Vec<f64>>, KeaError> {
    if scenarios.is_empty() {
        return Err(KeaError::Input(ErrorInfo::new(
            "empty-batch",
            "at least one scenario is required",
        )));
    }
    if opts.debug {
        return Err(KeaError::Mode(
            ErrorInfo::new(
                "debug-with-batch",
                "debug is not available when running multiple scenarios because the intermediate arrays are mismatched",
            )
            .with_context("scenarios", scenarios.len().to_string())
            .with_hint("try again with only one scenario"),
        ));
    }
    tracing::warn!(
        scenarios = scenarios.len(),
        "running multiple scenarios; track your magnitude/location pairs"
    );
    scenarios
        .iter()
        .map(|scenario| -> Result<Vec<f64>, KeaError> {
            let output = displ_site(model, scenario, level, opts)?;
            Ok(output.displacements(opts.folded))
        })
        .collect()
}

/// Folded site computation for an already validated scenario.
pub(crate) fn site_rows(
    model: &FaultDisplacementModel,
    scenario: &Scenario,
    level: AleatoryLevel,
) -> Result<Vec<SiteDebugRow>, KeaError> {
    let site = model.evaluate(scenario)?;
    let complement = model.evaluate(&scenario.complement())?;

    site.iter()
        .zip(complement.iter())
        .map(|(at_site, at_complement)| -> Result<SiteDebugRow, KeaError> {
            let lambda = at_site.bc_param;
            let y_site =
                transformed_displacement(lambda, at_site.mean, at_site.stdv_total, level)?;
            let y_complement = transformed_displacement(
                lambda,
                at_complement.mean,
                at_complement.stdv_total,
                level,
            )?;
            let y_folded = (y_site + y_complement) / 2.0;
            Ok(SiteDebugRow {
                magnitude: scenario.magnitude,
                location: scenario.location,
                style: scenario.style,
                percentile: level.as_percentile(),
                model_id: at_site.model_id,
                bc_param: lambda,
                mean_site: at_site.mean,
                stdv_site: at_site.stdv_total,
                mean_complement: at_complement.mean,
                stdv_complement: at_complement.stdv_total,
                y_site,
                y_complement,
                y_folded,
                displ_site_meters: to_meters(y_site, lambda),
                displ_complement_meters: to_meters(y_complement, lambda),
                displ_folded_meters: to_meters(y_folded, lambda),
            })
        })
        .collect()
}
