pub mod displ_avg;
pub mod displ_profile;
pub mod displ_site;
pub mod params;
pub mod prob_exceed;
pub mod prob_occur;

use std::error::Error;
use std::io;

use kea_core::{CoefficientSelection, KeaError, Style};
use serde::Serialize;

pub(crate) fn parse_style(raw: &str) -> Result<Style, KeaError> {
    raw.parse()
}

pub(crate) fn parse_selection(raw: &str) -> Result<CoefficientSelection, KeaError> {
    raw.parse()
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes one CSV record per row to stdout, header taken from the field names.
pub(crate) fn print_csv<T: Serialize>(rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_writer(io::stdout().lock());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// `[a b c]` with fixed decimals.
pub(crate) fn format_fixed(values: &[f64], decimals: usize) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.decimals$}")).collect();
    format!("[{}]", parts.join(" "))
}

/// `[a b c]` in scientific notation.
pub(crate) fn format_scientific(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.4e}")).collect();
    format!("[{}]", parts.join(" "))
}
