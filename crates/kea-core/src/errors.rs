//! Error families raised while loading coefficients and evaluating the model.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong, carried by every [`KeaError`] family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable code callers match on, such as `location-out-of-range`.
    pub code: String,
    /// Sentence printed to the user.
    pub message: String,
    /// Offending values keyed by name: a magnitude, a CSV column, a file path.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested next step, e.g. which flag to change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records the value that failed a check.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a suggested next step.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the fault displacement model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum KeaError {
    /// Argument of the wrong kind (non-finite number, empty input).
    #[error("input error: {0}")]
    Input(ErrorInfo),
    /// Range and consistency violations detected before evaluation.
    #[error("validation error: {0}")]
    Validation(ErrorInfo),
    /// Mutually exclusive evaluation modes were requested together.
    #[error("mode error: {0}")]
    Mode(ErrorInfo),
    /// Coefficient files or tables that could not be found.
    #[error("resource error: {0}")]
    Resource(ErrorInfo),
    /// Malformed CSV, YAML or JSON payloads.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        let mut pairs = self.context.iter();
        if let Some((key, value)) = pairs.next() {
            write!(f, " [{key}={value}")?;
            for (key, value) in pairs {
                write!(f, ", {key}={value}")?;
            }
            f.write_str("]")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl KeaError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            KeaError::Input(info)
            | KeaError::Validation(info)
            | KeaError::Mode(info)
            | KeaError::Resource(info)
            | KeaError::Serde(info) => info,
        }
    }

    /// Whether the error stems from caller supplied arguments.
    ///
    /// Front ends report these and carry on; every other family is fatal.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, KeaError::Input(_) | KeaError::Validation(_))
    }

    pub(crate) fn input(code: &str, message: impl Into<String>) -> Self {
        KeaError::Input(ErrorInfo::new(code, message))
    }
}
