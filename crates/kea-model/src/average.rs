//! Average displacement: area under the mean displacement profile.

use kea_core::{CoefficientSelection, KeaError, Scenario, Style};

use crate::predictor::FaultDisplacementModel;
use crate::transform::analytic_mean;

/// Number of intervals of the fixed integration grid (step 0.01).
pub const AVERAGE_GRID_INTERVALS: usize = 100;

/// Average displacement in meters for one magnitude/style scenario.
///
/// The mean displacement at each location uses only the within-event
/// standard deviation; between-event variability is excluded. A magnitude
/// outside the calibration range is logged through `tracing` only.
pub fn displ_avg(
    model: &FaultDisplacementModel,
    magnitude: f64,
    style: Style,
    selection: CoefficientSelection,
) -> Result<f64, KeaError> {
    let point = selection.require_point()?;
    let base = Scenario::new(magnitude, 0.0, style, point.into());
    model.check_scenario_magnitude(&base)?;
    tracing::debug!(magnitude, %style, %point, "average displacement");

    let mut locations = Vec::with_capacity(AVERAGE_GRID_INTERVALS + 1);
    let mut means = Vec::with_capacity(AVERAGE_GRID_INTERVALS + 1);
    for i in 0..=AVERAGE_GRID_INTERVALS {
        let location = i as f64 / AVERAGE_GRID_INTERVALS as f64;
        for params in model.evaluate(&base.at(location))? {
            locations.push(location);
            means.push(analytic_mean(params.bc_param, params.mean, params.stdv_within));
        }
    }
    Ok(trapezoid(&locations, &means))
}

fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::trapezoid;

    #[test]
    fn trapezoid_is_exact_for_linear_profiles() {
        let x: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        assert!((trapezoid(&x, &y) - 2.0).abs() < 1e-12);
    }
}
