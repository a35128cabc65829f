use kea_core::{ErrorInfo, KeaError, ModelId, Style};
use serde::{Deserialize, Serialize};

/// Standard deviation coefficients, one variant per style of faulting.
///
/// Field names are canonical: the strike-slip `s_s*` and reverse `s_r*`
/// columns both land in `s1`/`s2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "kebab-case")]
pub enum StdvCoefficients {
    /// Bilinear between-event model, quadratic within-event model.
    StrikeSlip {
        /// `s_m,s1`: level of the between-event hinge.
        s_m1: f64,
        /// `s_m,s2`: slope below the hinge.
        s_m2: f64,
        /// `s_m,s3`: hinge magnitude.
        s_m3: f64,
        /// Within-event level at the Beta mode.
        s1: f64,
        /// Within-event curvature.
        s2: f64,
    },
    /// Constant between-event model, quadratic within-event model.
    Reverse {
        /// `s_m,r`: between-event standard deviation.
        s_m: f64,
        /// Within-event level at the Beta mode.
        s1: f64,
        /// Within-event curvature.
        s2: f64,
    },
    /// Sigmoid between-event model, constant within-event model.
    Normal {
        /// `s_m,n1`: upper asymptote of the sigmoid.
        s_m1: f64,
        /// `s_m,n2`: sigmoid drop.
        s_m2: f64,
        /// `s_m,n3`: sigmoid steepness.
        s_m3: f64,
        /// Within-event standard deviation.
        sigma: f64,
    },
}

impl StdvCoefficients {
    /// Style this coefficient schema belongs to.
    pub fn style(&self) -> Style {
        match self {
            StdvCoefficients::StrikeSlip { .. } => Style::StrikeSlip,
            StdvCoefficients::Reverse { .. } => Style::Reverse,
            StdvCoefficients::Normal { .. } => Style::Normal,
        }
    }

    fn values(&self) -> Vec<f64> {
        match *self {
            StdvCoefficients::StrikeSlip {
                s_m1,
                s_m2,
                s_m3,
                s1,
                s2,
            } => vec![s_m1, s_m2, s_m3, s1, s2],
            StdvCoefficients::Reverse { s_m, s1, s2 } => vec![s_m, s1, s2],
            StdvCoefficients::Normal {
                s_m1,
                s_m2,
                s_m3,
                sigma,
            } => vec![s_m1, s_m2, s_m3, sigma],
        }
    }
}

/// One row of regression coefficients (a posterior draw or a point estimate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientRow {
    /// Row identifier.
    pub model_id: ModelId,
    /// Mode intercept at the magnitude break.
    pub c1: f64,
    /// Mode slope below the magnitude break.
    pub c2: f64,
    /// Mode slope above the magnitude break.
    pub c3: f64,
    /// Beta shape parameter controlling the rise from location 0.
    pub alpha: f64,
    /// Beta shape parameter controlling the fall towards location 1.
    pub beta: f64,
    /// Amplitude of the along-rupture bump.
    pub gamma: f64,
    /// Box-Cox transformation parameter.
    pub lambda: f64,
    /// Style specific standard deviation coefficients.
    pub stdv: StdvCoefficients,
}

impl CoefficientRow {
    /// Style the row was fitted for.
    pub fn style(&self) -> Style {
        self.stdv.style()
    }

    /// Rejects non-finite coefficients and a zero transformation parameter.
    ///
    /// The reciprocal Box-Cox transform has no branch for `lambda == 0`.
    pub fn validate(&self) -> Result<(), KeaError> {
        let common = [
            ("c1", self.c1),
            ("c2", self.c2),
            ("c3", self.c3),
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
            ("lambda", self.lambda),
        ];
        for (name, value) in common {
            if !value.is_finite() {
                return Err(KeaError::Serde(
                    row_error(
                        "non-finite-coefficient",
                        "coefficient is not a finite number",
                        self.model_id,
                    )
                    .with_context("column", name),
                ));
            }
        }
        if self.stdv.values().iter().any(|value| !value.is_finite()) {
            return Err(KeaError::Serde(row_error(
                "non-finite-coefficient",
                "standard deviation coefficient is not a finite number",
                self.model_id,
            )));
        }
        if self.lambda == 0.0 {
            return Err(KeaError::Validation(row_error(
                "zero-transform-parameter",
                "Box-Cox parameter lambda must be non-zero",
                self.model_id,
            )));
        }
        Ok(())
    }
}

fn row_error(code: &str, message: &str, model_id: ModelId) -> ErrorInfo {
    ErrorInfo::new(code, message).with_context("model_id", model_id.to_string())
}

