use kea_coeffs::{CoefficientRow, StdvCoefficients};
use kea_core::DistributionParams;

/// Magnitude at which the mode scaling changes slope.
pub const MAG_BREAK: f64 = 7.0;
/// Smoothing width of the softplus hinges.
pub const DELTA: f64 = 0.1;

/// `DELTA * ln(1 + exp(x / DELTA))`, evaluated without overflowing for large `x`.
fn smooth_hinge(x: f64) -> f64 {
    x.max(0.0) + DELTA * (-(x.abs() / DELTA)).exp().ln_1p()
}

/// Magnitude scaling of the mode in transformed units.
pub fn mode(row: &CoefficientRow, magnitude: f64) -> f64 {
    let dm = magnitude - MAG_BREAK;
    row.c1 + row.c2 * dm + (row.c3 - row.c2) * smooth_hinge(dm)
}

/// Location of the Beta-shaped peak along the rupture.
pub fn peak_location(row: &CoefficientRow) -> f64 {
    row.alpha / (row.alpha + row.beta)
}

/// Mean prediction in transformed units.
///
/// The Beta-shaped bump is shifted so the mode prediction sits at the peak.
pub fn mean(row: &CoefficientRow, magnitude: f64, location: f64) -> f64 {
    let peak = peak_location(row);
    let offset = row.gamma * peak.powf(row.alpha) * (1.0 - peak).powf(row.beta);
    let bump = row.gamma * location.powf(row.alpha) * (1.0 - location).powf(row.beta);
    mode(row, magnitude) - offset + bump
}

/// Within-event standard deviation in transformed units.
pub fn stdv_within(row: &CoefficientRow, location: f64) -> f64 {
    match row.stdv {
        StdvCoefficients::StrikeSlip { s1, s2, .. } | StdvCoefficients::Reverse { s1, s2, .. } => {
            s1 + s2 * (location - peak_location(row)).powi(2)
        }
        StdvCoefficients::Normal { sigma, .. } => sigma,
    }
}

/// Between-event standard deviation in transformed units.
pub fn stdv_between(row: &CoefficientRow, magnitude: f64) -> f64 {
    match row.stdv {
        StdvCoefficients::StrikeSlip { s_m1, s_m2, s_m3, .. } => {
            s_m1 + s_m2 * (magnitude - s_m3) - s_m2 * smooth_hinge(magnitude - s_m3)
        }
        StdvCoefficients::Reverse { s_m, .. } => s_m,
        StdvCoefficients::Normal { s_m1, s_m2, s_m3, .. } => {
            s_m1 - s_m2 / (1.0 + (-s_m3 * (magnitude - MAG_BREAK)).exp())
        }
    }
}

/// Distribution parameters for a single coefficient row.
pub fn predict(row: &CoefficientRow, magnitude: f64, location: f64) -> DistributionParams {
    let within = stdv_within(row, location);
    let between = stdv_between(row, magnitude);
    DistributionParams {
        model_id: row.model_id,
        bc_param: row.lambda,
        mean: mean(row, magnitude, location),
        stdv_total: (within.powi(2) + between.powi(2)).sqrt(),
        stdv_within: within,
        stdv_between: between,
    }
}
