use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use kea_core::{ErrorInfo, KeaError, ModelId, PointEstimate, Style, TableKind};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::row::{CoefficientRow, StdvCoefficients};

const MEAN_COLUMNS: [&str; 7] = ["c1", "c2", "c3", "alpha", "beta", "gamma", "lambda"];

// Within-event columns are named per style in the published tables; either
// alias is accepted and normalized to `s1`/`s2`.
const STRIKE_SLIP_STDV: [&[&str]; 5] = [
    &["s_m,s1"],
    &["s_m,s2"],
    &["s_m,s3"],
    &["s_s1", "s_r1"],
    &["s_s2", "s_r2"],
];
const REVERSE_STDV: [&[&str]; 3] = [&["s_m,r"], &["s_r1", "s_s1"], &["s_r2", "s_s2"]];
const NORMAL_STDV: [&[&str]; 4] = [&["s_m,n1"], &["s_m,n2"], &["s_m,n3"], &["sigma"]];

fn table_error(code: &str, message: impl Into<String>, style: Style, kind: TableKind) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("style", style.as_str())
        .with_context("kind", kind.to_string())
}

fn wrap_csv(err: csv::Error, style: Style, kind: TableKind) -> KeaError {
    KeaError::Serde(
        table_error("coefficient-csv", "malformed coefficient table", style, kind)
            .with_hint(err.to_string()),
    )
}

/// Ordered, immutable coefficient rows for one (style, kind) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTable {
    style: Style,
    kind: TableKind,
    rows: Vec<CoefficientRow>,
    digest: Option<String>,
}

impl CoefficientTable {
    /// Builds a table from in-memory rows, enforcing the table invariants.
    ///
    /// Every row must match `style`; full tables hold at least one row and
    /// only draw identifiers; point tables only hold `mean`/`median` rows.
    pub fn new(style: Style, kind: TableKind, rows: Vec<CoefficientRow>) -> Result<Self, KeaError> {
        if rows.is_empty() {
            return Err(KeaError::Resource(table_error(
                "empty-coefficient-table",
                "coefficient table has no rows",
                style,
                kind,
            )));
        }
        for row in &rows {
            row.validate()?;
            if row.style() != style {
                return Err(KeaError::Serde(
                    table_error(
                        "style-mismatch",
                        "coefficient row schema does not match the table style",
                        style,
                        kind,
                    )
                    .with_context("row_style", row.style().as_str()),
                ));
            }
            let kind_matches = matches!(
                (kind, row.model_id),
                (TableKind::Full, ModelId::Draw(_)) | (TableKind::Point, ModelId::Point(_))
            );
            if !kind_matches {
                return Err(KeaError::Serde(
                    table_error(
                        "row-kind-mismatch",
                        "row identifier does not fit the table kind",
                        style,
                        kind,
                    )
                    .with_context("model_id", row.model_id.to_string()),
                ));
            }
        }
        Ok(Self {
            style,
            kind,
            rows,
            digest: None,
        })
    }

    /// Parses a CSV payload: first column is the row identifier, one column
    /// per named coefficient.
    pub fn from_csv_bytes(bytes: &[u8], style: Style, kind: TableKind) -> Result<Self, KeaError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);
        let headers = reader
            .headers()
            .map_err(|err| wrap_csv(err, style, kind))?
            .clone();
        let columns = ColumnIndex::new(&headers, style, kind)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| wrap_csv(err, style, kind))?;
            rows.push(columns.row(&record)?);
        }
        let mut table = Self::new(style, kind, rows)?;
        table.digest = Some(format!("{:x}", Sha256::digest(bytes)));
        Ok(table)
    }

    /// Style of faulting the table was fitted for.
    pub fn style(&self) -> Style {
        self.style
    }

    /// Point-estimate or full-posterior table.
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// All rows in file order.
    pub fn rows(&self) -> &[CoefficientRow] {
        &self.rows
    }

    /// Number of rows (posterior draws for full tables).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// SHA-256 of the CSV payload, when the table was parsed from one.
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Returns the row tagged with the requested point estimate.
    pub fn point_row(&self, estimate: PointEstimate) -> Result<&CoefficientRow, KeaError> {
        self.rows
            .iter()
            .find(|row| row.model_id == ModelId::Point(estimate))
            .ok_or_else(|| {
                KeaError::Resource(
                    table_error(
                        "point-row-missing",
                        "point-estimate row not present in table",
                        self.style,
                        self.kind,
                    )
                    .with_context("model_id", estimate.as_str()),
                )
            })
    }
}

/// Loads a coefficient table from disk.
pub fn load_table(
    path: &Path,
    style: Style,
    kind: TableKind,
) -> Result<CoefficientTable, KeaError> {
    let bytes = fs::read(path).map_err(|err| {
        let (code, message) = if err.kind() == ErrorKind::NotFound {
            ("coefficient-file-missing", "not found")
        } else {
            ("coefficient-file-unreadable", "could not be read")
        };
        KeaError::Resource(
            table_error(code, format!("file {} {message}", path.display()), style, kind)
                .with_context("path", path.display().to_string())
                .with_hint(err.to_string()),
        )
    })?;
    let table = CoefficientTable::from_csv_bytes(&bytes, style, kind).map_err(|err| match err {
        KeaError::Serde(info) => {
            KeaError::Serde(info.with_context("path", path.display().to_string()))
        }
        other => other,
    })?;
    tracing::debug!(
        path = %path.display(),
        %style,
        %kind,
        rows = table.len(),
        "loaded coefficient table"
    );
    Ok(table)
}

struct ColumnIndex {
    style: Style,
    kind: TableKind,
    positions: BTreeMap<String, usize>,
}

impl ColumnIndex {
    fn new(headers: &StringRecord, style: Style, kind: TableKind) -> Result<Self, KeaError> {
        let positions = headers
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, name)| (name.to_string(), idx))
            .collect();
        let index = Self {
            style,
            kind,
            positions,
        };
        for name in MEAN_COLUMNS {
            index.position(&[name])?;
        }
        for aliases in index.stdv_columns() {
            index.position(aliases)?;
        }
        Ok(index)
    }

    fn stdv_columns(&self) -> &'static [&'static [&'static str]] {
        match self.style {
            Style::StrikeSlip => &STRIKE_SLIP_STDV,
            Style::Reverse => &REVERSE_STDV,
            Style::Normal => &NORMAL_STDV,
        }
    }

    fn position(&self, aliases: &[&str]) -> Result<usize, KeaError> {
        aliases
            .iter()
            .find_map(|name| self.positions.get(*name).copied())
            .ok_or_else(|| {
                KeaError::Serde(
                    table_error(
                        "coefficient-column-missing",
                        "required coefficient column not found",
                        self.style,
                        self.kind,
                    )
                    .with_context("column", aliases.join(" | ")),
                )
            })
    }

    fn value(&self, record: &StringRecord, aliases: &[&str]) -> Result<f64, KeaError> {
        let idx = self.position(aliases)?;
        let raw = record.get(idx).unwrap_or_default();
        raw.parse::<f64>().map_err(|_| {
            KeaError::Serde(
                table_error(
                    "coefficient-not-numeric",
                    "coefficient cell is not a number",
                    self.style,
                    self.kind,
                )
                .with_context("column", aliases[0])
                .with_context("value", raw),
            )
        })
    }

    fn row(&self, record: &StringRecord) -> Result<CoefficientRow, KeaError> {
        let model_id: ModelId = record.get(0).unwrap_or_default().parse()?;
        let stdv = match self.style {
            Style::StrikeSlip => {
                let [m1, m2, m3, w1, w2] = STRIKE_SLIP_STDV;
                StdvCoefficients::StrikeSlip {
                    s_m1: self.value(record, m1)?,
                    s_m2: self.value(record, m2)?,
                    s_m3: self.value(record, m3)?,
                    s1: self.value(record, w1)?,
                    s2: self.value(record, w2)?,
                }
            }
            Style::Reverse => {
                let [m, w1, w2] = REVERSE_STDV;
                StdvCoefficients::Reverse {
                    s_m: self.value(record, m)?,
                    s1: self.value(record, w1)?,
                    s2: self.value(record, w2)?,
                }
            }
            Style::Normal => {
                let [m1, m2, m3, sigma] = NORMAL_STDV;
                StdvCoefficients::Normal {
                    s_m1: self.value(record, m1)?,
                    s_m2: self.value(record, m2)?,
                    s_m3: self.value(record, m3)?,
                    sigma: self.value(record, sigma)?,
                }
            }
        };
        Ok(CoefficientRow {
            model_id,
            c1: self.value(record, &["c1"])?,
            c2: self.value(record, &["c2"])?,
            c3: self.value(record, &["c3"])?,
            alpha: self.value(record, &["alpha"])?,
            beta: self.value(record, &["beta"])?,
            gamma: self.value(record, &["gamma"])?,
            lambda: self.value(record, &["lambda"])?,
            stdv,
        })
    }
}
