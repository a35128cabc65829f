use std::fs;
use std::path::{Path, PathBuf};

use kea_core::{ErrorInfo, KeaError, Style, TableKind};
use serde::{Deserialize, Serialize};

fn config_error(code: &str, err: impl ToString) -> KeaError {
    KeaError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// File names for one table kind, keyed by style of faulting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StyleFiles {
    /// Strike-slip table file name.
    pub strike_slip: String,
    /// Reverse table file name.
    pub reverse: String,
    /// Normal table file name.
    pub normal: String,
}

impl StyleFiles {
    fn with_pattern(prefix: &str) -> Self {
        Self {
            strike_slip: format!("{prefix}_SS_powtr.csv"),
            reverse: format!("{prefix}_REV_powtr.csv"),
            normal: format!("{prefix}_NM_powtr.csv"),
        }
    }

    /// File name for the given style.
    pub fn get(&self, style: Style) -> &str {
        match style {
            Style::StrikeSlip => &self.strike_slip,
            Style::Reverse => &self.reverse,
            Style::Normal => &self.normal,
        }
    }
}

/// Names of the six coefficient files relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableLayout {
    /// Full posterior tables, one row per draw.
    #[serde(default = "default_full_files")]
    pub full: StyleFiles,
    /// Point-estimate tables holding the `mean` and `median` rows.
    #[serde(default = "default_point_files")]
    pub point: StyleFiles,
}

fn default_full_files() -> StyleFiles {
    StyleFiles::with_pattern("coefficients_posterior")
}

fn default_point_files() -> StyleFiles {
    StyleFiles::with_pattern("coefficients_mean")
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            full: default_full_files(),
            point: default_point_files(),
        }
    }
}

impl TableLayout {
    /// File name for a (style, kind) pair.
    pub fn file_name(&self, style: Style, kind: TableKind) -> &str {
        match kind {
            TableKind::Full => self.full.get(style),
            TableKind::Point => self.point.get(style),
        }
    }
}

/// Where the coefficient store reads its tables from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory holding the coefficient CSV files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// File naming scheme.
    #[serde(default)]
    pub layout: TableLayout,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            layout: TableLayout::default(),
        }
    }
}

impl StoreConfig {
    /// Configuration reading the default file names from `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Loads a YAML configuration file.
    pub fn from_yaml_path(path: &Path) -> Result<Self, KeaError> {
        let bytes = fs::read(path).map_err(|err| {
            KeaError::Resource(
                ErrorInfo::new("config-missing", "configuration file could not be read")
                    .with_context("path", path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        Self::from_yaml_slice(&bytes)
    }

    /// Parses a YAML configuration payload.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, KeaError> {
        serde_yaml::from_slice(data).map_err(|err| config_error("config-yaml", err))
    }

    /// Absolute or data-dir relative path of a table file.
    pub fn table_path(&self, style: Style, kind: TableKind) -> PathBuf {
        self.data_dir.join(self.layout.file_name(style, kind))
    }
}
