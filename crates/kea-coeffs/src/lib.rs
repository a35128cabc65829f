#![deny(missing_docs)]
#![doc = "Read-only coefficient tables for the KEA fault displacement model: CSV loading, per-style schema normalization and the shared store handle."]

/// Store configuration and file layout.
pub mod config;
/// Coefficient row schema.
pub mod row;
/// Shared immutable store handle.
pub mod store;
/// Table parsing and invariants.
pub mod table;

pub use config::{StoreConfig, StyleFiles, TableLayout};
pub use row::{CoefficientRow, StdvCoefficients};
pub use store::CoefficientStore;
pub use table::{load_table, CoefficientTable};
