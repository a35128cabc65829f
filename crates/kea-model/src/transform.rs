use kea_core::{AleatoryLevel, ErrorInfo, KeaError};
use statrs::distribution::{ContinuousCDF, Normal};

/// Displacements below this value (meters) are reported as zero.
pub const MIN_DISPLACEMENT: f64 = 0.001;

/// Box-Cox forward transform `(x^λ - 1) / λ`. `lambda` must be non-zero.
pub fn box_cox(x: f64, lambda: f64) -> f64 {
    (x.powf(lambda) - 1.0) / lambda
}

/// Inverse Box-Cox transform `(λ·y + 1)^(1/λ)`.
///
/// Transformed values outside the image of the positive reals map to the
/// corresponding boundary: zero for `λ > 0`, infinity for `λ < 0`.
pub fn inverse_box_cox(y: f64, lambda: f64) -> f64 {
    let base = lambda * y + 1.0;
    if base <= 0.0 {
        return if lambda > 0.0 { 0.0 } else { f64::INFINITY };
    }
    base.powf(lambda.recip())
}

/// Back-transforms to meters and applies the 1 mm resolution floor.
pub fn to_meters(y: f64, lambda: f64) -> f64 {
    let meters = inverse_box_cox(y, lambda);
    if meters < MIN_DISPLACEMENT {
        0.0
    } else {
        meters
    }
}

/// Back-transformed mean displacement in meters (second-order delta method).
pub fn analytic_mean(lambda: f64, mean: f64, stdv: f64) -> f64 {
    let base = lambda * mean + 1.0;
    if base <= 0.0 {
        return inverse_box_cox(mean, lambda);
    }
    base.powf(lambda.recip()) * (1.0 + stdv.powi(2) * (1.0 - lambda) / (2.0 * base.powi(2)))
}

/// Normal distribution in transformed units.
pub fn normal(mean: f64, stdv: f64) -> Result<Normal, KeaError> {
    Normal::new(mean, stdv).map_err(|err| {
        KeaError::Validation(
            ErrorInfo::new(
                "invalid-distribution",
                "transformed distribution requires a finite mean and positive standard deviation",
            )
            .with_context("mean", mean.to_string())
            .with_context("stdv", stdv.to_string())
            .with_hint(err.to_string()),
        )
    })
}

/// Displacement in transformed units at the requested aleatory level.
///
/// For [`AleatoryLevel::Mean`] the analytic mean is computed in meters and
/// re-transformed, so back-transforming the result recovers the mean rather
/// than the median.
pub fn transformed_displacement(
    lambda: f64,
    mean: f64,
    stdv: f64,
    level: AleatoryLevel,
) -> Result<f64, KeaError> {
    match level {
        AleatoryLevel::Mean => Ok(box_cox(analytic_mean(lambda, mean, stdv), lambda)),
        AleatoryLevel::Quantile(q) => Ok(normal(mean, stdv)?.inverse_cdf(q)),
    }
}

/// Probability that the transformed displacement exceeds `y`.
pub fn exceedance(y: f64, mean: f64, stdv: f64) -> Result<f64, KeaError> {
    Ok(normal(mean, stdv)?.sf(y))
}

/// Probability that the transformed displacement does not exceed `y`.
pub fn non_exceedance(y: f64, mean: f64, stdv: f64) -> Result<f64, KeaError> {
    Ok(normal(mean, stdv)?.cdf(y))
}
