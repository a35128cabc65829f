//! Displacement profile along the rupture for one magnitude/style scenario.

use kea_core::{AleatoryLevel, CoefficientSelection, ErrorInfo, KeaError, Scenario, Style};
use serde::{Deserialize, Serialize};

use crate::predictor::FaultDisplacementModel;
use crate::site::site_rows;

/// Default spacing of the profile grid.
pub const DEFAULT_LOCATION_STEP: f64 = 0.05;

/// Largest number of intervals a profile grid may have.
pub const MAX_PROFILE_INTERVALS: usize = 100_000;

const GRID_SNAP: f64 = 1e-9;

/// Inputs of a profile calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileRequest {
    /// Earthquake moment magnitude.
    pub magnitude: f64,
    /// Style of faulting.
    pub style: Style,
    /// Aleatory level of every profile point.
    pub level: AleatoryLevel,
    /// Point-estimate coefficients; `full` is rejected.
    pub selection: CoefficientSelection,
    /// Fold each location with its complement.
    pub folded: bool,
    /// Spacing of the location grid, in (0, 1].
    pub location_step: f64,
}

impl ProfileRequest {
    /// Request with the default selection, folding and step.
    pub fn new(magnitude: f64, style: Style, level: AleatoryLevel) -> Self {
        Self {
            magnitude,
            style,
            level,
            selection: CoefficientSelection::default(),
            folded: true,
            location_step: DEFAULT_LOCATION_STEP,
        }
    }
}

/// Paired profile locations and displacements in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Normalized locations, increasing from 0 to 1.
    pub locations: Vec<f64>,
    /// Displacement at each location.
    pub displacements: Vec<f64>,
}

/// Evenly spaced locations from 0 to 1.
///
/// When `step` divides 1 the last point is exactly 1.0; otherwise the grid
/// stops at the last multiple of `step` below 1. Steps finer than
/// `1 / MAX_PROFILE_INTERVALS` are rejected.
pub fn location_grid(step: f64) -> Result<Vec<f64>, KeaError> {
    if !step.is_finite() || step <= 0.0 || step > 1.0 {
        return Err(invalid_step(step, "location step must lie within (0, 1]"));
    }
    let intervals = 1.0 / step;
    if !intervals.is_finite() || intervals > MAX_PROFILE_INTERVALS as f64 + GRID_SNAP {
        return Err(invalid_step(
            step,
            format!("location step must be at least 1/{MAX_PROFILE_INTERVALS}"),
        ));
    }
    let whole = intervals.round();
    let count = if (intervals - whole).abs() <= GRID_SNAP * whole.max(1.0) {
        whole as usize
    } else {
        intervals.floor() as usize
    };
    let mut grid: Vec<f64> = (0..=count).map(|i| i as f64 * step).collect();
    if let Some(last) = grid.last_mut() {
        if (*last - 1.0).abs() <= GRID_SNAP {
            *last = 1.0;
        }
    }
    Ok(grid)
}

fn invalid_step(step: f64, message: impl Into<String>) -> KeaError {
    KeaError::Validation(
        ErrorInfo::new("invalid-location-step", message)
            .with_context("location_step", step.to_string()),
    )
}

/// Site displacement at every grid location for one scenario.
///
/// The magnitude is checked once per profile; an out-of-range value is
/// logged through `tracing` and the profile is still computed.
pub fn displ_profile(
    model: &FaultDisplacementModel,
    request: &ProfileRequest,
) -> Result<Profile, KeaError> {
    let point = request.selection.require_point()?;
    let locations = location_grid(request.location_step)?;
    let base = Scenario::new(request.magnitude, 0.0, request.style, point.into());
    model.check_scenario_magnitude(&base)?;
    tracing::debug!(
        magnitude = request.magnitude,
        style = %request.style,
        points = locations.len(),
        "displacement profile"
    );

    let mut displacements = Vec::with_capacity(locations.len());
    for &location in &locations {
        let rows = site_rows(model, &base.at(location), request.level)?;
        // Point estimates evaluate exactly one coefficient row.
        if let Some(row) = rows.first() {
            displacements.push(if request.folded {
                row.displ_folded_meters
            } else {
                row.displ_site_meters
            });
        }
    }
    Ok(Profile {
        locations,
        displacements,
    })
}
