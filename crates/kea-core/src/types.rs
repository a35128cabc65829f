use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, KeaError};

/// Style of faulting; selects the regression variant and coefficient tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    /// Strike-slip faulting.
    StrikeSlip,
    /// Reverse faulting.
    Reverse,
    /// Normal faulting.
    Normal,
}

impl Style {
    /// All supported styles in canonical order.
    pub const ALL: [Style; 3] = [Style::StrikeSlip, Style::Reverse, Style::Normal];

    /// Canonical lower-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::StrikeSlip => "strike-slip",
            Style::Reverse => "reverse",
            Style::Normal => "normal",
        }
    }

    /// Magnitude range the regression was calibrated for, inclusive.
    pub fn recommended_magnitude_range(&self) -> (f64, f64) {
        match self {
            Style::StrikeSlip => (6.0, 8.0),
            Style::Reverse => (5.0, 8.0),
            Style::Normal => (6.0, 8.0),
        }
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = KeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strike-slip" => Ok(Style::StrikeSlip),
            "reverse" => Ok(Style::Reverse),
            "normal" => Ok(Style::Normal),
            other => Err(KeaError::Validation(
                ErrorInfo::new(
                    "invalid-style",
                    format!(
                        "'{other}' is an invalid 'style'; only 'strike-slip', 'reverse', or 'normal' is allowed."
                    ),
                )
                .with_context("style", other),
            )),
        }
    }
}

/// Representative coefficient row used for point-estimate evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointEstimate {
    /// Posterior mean of each coefficient.
    Mean,
    /// Posterior median of each coefficient.
    Median,
}

impl PointEstimate {
    /// Row tag used in the point-estimate tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            PointEstimate::Mean => "mean",
            PointEstimate::Median => "median",
        }
    }
}

impl Display for PointEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which coefficient rows a calculation evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CoefficientSelection {
    /// Single posterior-mean row.
    Mean,
    /// Single posterior-median row.
    #[default]
    Median,
    /// Every posterior draw.
    Full,
}

impl CoefficientSelection {
    /// Canonical lower-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoefficientSelection::Mean => "mean",
            CoefficientSelection::Median => "median",
            CoefficientSelection::Full => "full",
        }
    }

    /// Returns the point estimate, or `None` for the full posterior.
    pub fn point(&self) -> Option<PointEstimate> {
        match self {
            CoefficientSelection::Mean => Some(PointEstimate::Mean),
            CoefficientSelection::Median => Some(PointEstimate::Median),
            CoefficientSelection::Full => None,
        }
    }

    /// Narrows the selection for calculators that only accept point estimates.
    pub fn require_point(&self) -> Result<PointEstimate, KeaError> {
        self.point().ok_or_else(|| {
            KeaError::Validation(
                ErrorInfo::new(
                    "invalid-coefficient-type",
                    "'full' is an invalid 'coefficient_type' here; only 'mean' or 'median' is allowed.",
                )
                .with_context("coefficient_type", self.as_str()),
            )
        })
    }
}

impl From<PointEstimate> for CoefficientSelection {
    fn from(value: PointEstimate) -> Self {
        match value {
            PointEstimate::Mean => CoefficientSelection::Mean,
            PointEstimate::Median => CoefficientSelection::Median,
        }
    }
}

impl Display for CoefficientSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoefficientSelection {
    type Err = KeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(CoefficientSelection::Mean),
            "median" => Ok(CoefficientSelection::Median),
            "full" => Ok(CoefficientSelection::Full),
            other => Err(KeaError::Validation(
                ErrorInfo::new(
                    "invalid-coefficient-type",
                    format!(
                        "'{other}' is an invalid 'coefficient_type'; only 'mean', 'median', or 'full' is allowed."
                    ),
                )
                .with_context("coefficient_type", other),
            )),
        }
    }
}

/// Kind of coefficient table held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Labelled point-estimate rows (`mean`, `median`).
    Point,
    /// One row per posterior draw.
    Full,
}

impl Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Point => f.write_str("point"),
            TableKind::Full => f.write_str("full"),
        }
    }
}

/// Identifier of a coefficient row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelId {
    /// Posterior draw index.
    Draw(u32),
    /// Point-estimate tag.
    Point(PointEstimate),
}

impl Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelId::Draw(idx) => write!(f, "{idx}"),
            ModelId::Point(tag) => Display::fmt(tag, f),
        }
    }
}

impl FromStr for ModelId {
    type Err = KeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "mean" => Ok(ModelId::Point(PointEstimate::Mean)),
            "median" => Ok(ModelId::Point(PointEstimate::Median)),
            _ => trimmed.parse::<u32>().map(ModelId::Draw).map_err(|_| {
                KeaError::Serde(
                    ErrorInfo::new(
                        "invalid-model-id",
                        "row identifier must be a draw index, 'mean' or 'median'",
                    )
                    .with_context("model_id", trimmed),
                )
            }),
        }
    }
}

/// Aleatory level at which a displacement is requested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AleatoryLevel {
    /// Back-transformed analytic mean (percentile sentinel `-1`).
    Mean,
    /// Quantile strictly inside (0, 1).
    Quantile(f64),
}

impl AleatoryLevel {
    /// Percentile value used to request the mean instead of a quantile.
    pub const MEAN_SENTINEL: f64 = -1.0;

    /// Interprets a raw percentile argument.
    pub fn from_percentile(percentile: f64) -> Result<Self, KeaError> {
        if !percentile.is_finite() {
            return Err(KeaError::input(
                "non-finite-percentile",
                "percentile must be a finite number",
            ));
        }
        if percentile == Self::MEAN_SENTINEL {
            return Ok(AleatoryLevel::Mean);
        }
        if percentile > 0.0 && percentile < 1.0 {
            Ok(AleatoryLevel::Quantile(percentile))
        } else {
            Err(KeaError::Validation(
                ErrorInfo::new(
                    "percentile-out-of-range",
                    "percentile must lie strictly within (0, 1), or be -1 for the mean",
                )
                .with_context("percentile", percentile.to_string()),
            ))
        }
    }

    /// Raw percentile representation (`-1` for the mean).
    pub fn as_percentile(&self) -> f64 {
        match self {
            AleatoryLevel::Mean => Self::MEAN_SENTINEL,
            AleatoryLevel::Quantile(q) => *q,
        }
    }
}

impl Display for AleatoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AleatoryLevel::Mean => f.write_str("mean"),
            AleatoryLevel::Quantile(q) => write!(f, "{q}"),
        }
    }
}

/// Single analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Earthquake moment magnitude.
    pub magnitude: f64,
    /// Normalized location along rupture length, range [0, 1].
    pub location: f64,
    /// Style of faulting.
    pub style: Style,
    /// Coefficient rows to evaluate.
    pub selection: CoefficientSelection,
}

impl Scenario {
    /// Creates a scenario evaluated with the given coefficient selection.
    pub fn new(
        magnitude: f64,
        location: f64,
        style: Style,
        selection: CoefficientSelection,
    ) -> Self {
        Self {
            magnitude,
            location,
            style,
            selection,
        }
    }

    /// Same scenario at the mirrored location `1 - location`.
    pub fn complement(&self) -> Self {
        Self {
            location: 1.0 - self.location,
            ..*self
        }
    }

    /// Same scenario at a different location.
    pub fn at(&self, location: f64) -> Self {
        Self { location, ..*self }
    }
}

/// Box-Cox normal distribution parameters for one coefficient row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {
    /// Coefficient row the parameters were computed from.
    pub model_id: ModelId,
    /// Box-Cox transformation parameter (lambda).
    pub bc_param: f64,
    /// Mean displacement in transformed units (unfolded).
    pub mean: f64,
    /// Total standard deviation in transformed units.
    pub stdv_total: f64,
    /// Within-event (location) standard deviation in transformed units.
    pub stdv_within: f64,
    /// Between-event (mode) standard deviation in transformed units.
    pub stdv_between: f64,
}
