#![deny(missing_docs)]
#![doc = "Core types, error taxonomy and boundary validation for the KEA fault displacement model."]

pub mod errors;
mod types;
pub mod validate;

pub use errors::{ErrorInfo, KeaError};
pub use types::{
    AleatoryLevel, CoefficientSelection, DistributionParams, ModelId, PointEstimate, Scenario,
    Style, TableKind,
};
pub use validate::{
    check_displacements, check_finite, check_location_range, check_magnitude_range,
    check_paired_lengths, MagnitudeWarning,
};
