#![deny(missing_docs)]
#![doc = "Parameter prediction, Box-Cox transforms and the displacement, exceedance and percentile-rank calculators of the KEA fault displacement model."]

/// Average displacement over the rupture.
pub mod average;
/// Probability of exceedance.
pub mod exceedance;
/// Closed-form regression formulas per style of faulting.
pub mod formulas;
/// Percentile rank of observed displacements.
pub mod occurrence;
/// Entry point binding the formulas to a coefficient store.
pub mod predictor;
/// Displacement profiles.
pub mod profile;
/// Site displacement and folding.
pub mod site;
/// Box-Cox transform and normal-distribution helpers.
pub mod transform;

pub use average::displ_avg;
pub use exceedance::{
    prob_exceed, ExceedanceDebugRow, ExceedanceOptions, ExceedanceOutput, ExceedanceRow,
};
pub use occurrence::prob_occur;
pub use predictor::{FaultDisplacementModel, ParamsPrediction};
pub use profile::{
    displ_profile, location_grid, Profile, ProfileRequest, DEFAULT_LOCATION_STEP,
    MAX_PROFILE_INTERVALS,
};
pub use site::{displ_site, displ_site_batch, SiteDebugRow, SiteOptions, SiteOutput};
