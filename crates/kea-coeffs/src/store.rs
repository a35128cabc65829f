use std::collections::BTreeMap;
use std::slice;

use kea_core::{CoefficientSelection, ErrorInfo, KeaError, Style, TableKind};

use crate::config::StoreConfig;
use crate::row::CoefficientRow;
use crate::table::{load_table, CoefficientTable};

/// Immutable handle over every coefficient table, loaded once at startup.
///
/// Calculators borrow the store; nothing mutates it after construction, so
/// a single instance can be shared freely across callers.
#[derive(Debug, Clone, Default)]
pub struct CoefficientStore {
    tables: BTreeMap<(Style, TableKind), CoefficientTable>,
}

impl CoefficientStore {
    /// Loads the full and point tables for every style.
    pub fn load(config: &StoreConfig) -> Result<Self, KeaError> {
        let mut tables = BTreeMap::new();
        for style in Style::ALL {
            for kind in [TableKind::Full, TableKind::Point] {
                let table = load_table(&config.table_path(style, kind), style, kind)?;
                tables.insert((style, kind), table);
            }
        }
        tracing::debug!(
            data_dir = %config.data_dir.display(),
            tables = tables.len(),
            "coefficient store ready"
        );
        Ok(Self { tables })
    }

    /// Builds a store from in-memory tables; later tables replace earlier
    /// ones with the same (style, kind).
    pub fn from_tables(tables: impl IntoIterator<Item = CoefficientTable>) -> Self {
        let tables = tables
            .into_iter()
            .map(|table| ((table.style(), table.kind()), table))
            .collect();
        Self { tables }
    }

    /// Returns the table for a (style, kind) pair.
    pub fn table(&self, style: Style, kind: TableKind) -> Result<&CoefficientTable, KeaError> {
        self.tables.get(&(style, kind)).ok_or_else(|| {
            KeaError::Resource(
                ErrorInfo::new("coefficient-table-missing", "coefficient table not loaded")
                    .with_context("style", style.as_str())
                    .with_context("kind", kind.to_string()),
            )
        })
    }

    /// Rows evaluated for a selection: the tagged point row, or every draw.
    pub fn rows(
        &self,
        style: Style,
        selection: CoefficientSelection,
    ) -> Result<&[CoefficientRow], KeaError> {
        match selection.point() {
            Some(estimate) => {
                let row = self.table(style, TableKind::Point)?.point_row(estimate)?;
                Ok(slice::from_ref(row))
            }
            None => Ok(self.table(style, TableKind::Full)?.rows()),
        }
    }

    /// Content digests of the loaded tables keyed by `style/kind`.
    pub fn digests(&self) -> BTreeMap<String, String> {
        self.tables
            .iter()
            .filter_map(|((style, kind), table)| {
                table
                    .digest()
                    .map(|digest| (format!("{style}/{kind}"), digest.to_string()))
            })
            .collect()
    }
}
