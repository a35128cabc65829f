//! Boundary checks applied before any model evaluation.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, KeaError};
use crate::types::Style;

/// Non-fatal notice that a magnitude lies outside the calibration range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeWarning {
    /// Magnitude that triggered the warning.
    pub magnitude: f64,
    /// Style whose range was checked.
    pub style: Style,
    /// Inclusive recommended range.
    pub range: (f64, f64),
}

impl Display for MagnitudeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "magnitude {} is not within the recommended range for {} faulting, which is [{}, {}]",
            self.magnitude, self.style, self.range.0, self.range.1
        )
    }
}

/// Rejects NaN and infinite values for the named argument.
pub fn check_finite(value: f64, name: &str) -> Result<(), KeaError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(KeaError::Input(
            ErrorInfo::new("non-finite-input", format!("{name} must be a finite number"))
                .with_context(name, value.to_string()),
        ))
    }
}

/// Checks that a location lies within [0, 1].
pub fn check_location_range(location: f64) -> Result<(), KeaError> {
    check_finite(location, "location")?;
    if (0.0..=1.0).contains(&location) {
        Ok(())
    } else {
        Err(KeaError::Validation(
            ErrorInfo::new(
                "location-out-of-range",
                "one or more location values are not within the range [0, 1]",
            )
            .with_context("location", location.to_string()),
        ))
    }
}

/// Checks the magnitude against the style's calibration range.
///
/// Never fails; out-of-range magnitudes are reported through the returned
/// warning and a `tracing` event.
pub fn check_magnitude_range(magnitude: f64, style: Style) -> Option<MagnitudeWarning> {
    let range = style.recommended_magnitude_range();
    if magnitude >= range.0 && magnitude <= range.1 {
        return None;
    }
    let warning = MagnitudeWarning {
        magnitude,
        style,
        range,
    };
    tracing::warn!(%warning, "magnitude outside recommended range");
    Some(warning)
}

/// Checks that paired location/displacement arrays have equal length.
pub fn check_paired_lengths(locations: &[f64], displacements: &[f64]) -> Result<(), KeaError> {
    if locations.len() == displacements.len() {
        return Ok(());
    }
    Err(KeaError::Validation(
        ErrorInfo::new(
            "shape-mismatch",
            format!(
                "the location and displacement arrays are not the same length: location array is ({},) and displacement array is ({},)",
                locations.len(),
                displacements.len()
            ),
        )
        .with_context("locations", locations.len().to_string())
        .with_context("displacements", displacements.len().to_string()),
    ))
}

/// Checks trial or observed displacements: non-empty, finite, non-negative.
pub fn check_displacements(displacements: &[f64]) -> Result<(), KeaError> {
    if displacements.is_empty() {
        return Err(KeaError::input(
            "empty-displacements",
            "at least one displacement value is required",
        ));
    }
    for (idx, value) in displacements.iter().enumerate() {
        check_finite(*value, "displacement")?;
        if *value < 0.0 {
            return Err(KeaError::Validation(
                ErrorInfo::new("negative-displacement", "displacements must be non-negative")
                    .with_context("index", idx.to_string())
                    .with_context("displacement", value.to_string()),
            ));
        }
    }
    Ok(())
}
