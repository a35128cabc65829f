use std::error::Error;

use clap::Args;
use kea_model::{prob_occur, FaultDisplacementModel};
use serde_json::json;

use super::{format_fixed, parse_selection, parse_style, print_json};

#[derive(Args, Debug)]
pub struct ProbOccurArgs {
    /// Earthquake moment magnitude.
    #[arg(short, long)]
    pub magnitude: f64,
    /// Normalized locations of the observations, range [0, 1].
    #[arg(short, long, num_args = 1.., required = true, allow_negative_numbers = true)]
    pub location: Vec<f64>,
    /// Style of faulting: strike-slip, reverse or normal (case-insensitive).
    #[arg(short, long)]
    pub style: String,
    /// Observed displacements in meters, paired with the locations.
    #[arg(short, long, num_args = 1.., required = true, allow_negative_numbers = true)]
    pub displacement: Vec<f64>,
    /// Point-estimate coefficients: mean or median.
    #[arg(long = "coefficient-type", visible_alias = "ct", default_value = "median")]
    pub coefficient_type: String,
}

pub fn run(
    args: &ProbOccurArgs,
    model: &FaultDisplacementModel,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let style = parse_style(&args.style)?;
    let selection = parse_selection(&args.coefficient_type)?;
    let ranks = prob_occur(
        model,
        args.magnitude,
        &args.location,
        style,
        &args.displacement,
        selection,
    )?;
    if as_json {
        return print_json(&json!({
            "locations": args.location,
            "displacements": args.displacement,
            "percentiles": ranks,
        }));
    }
    println!("     Percentiles for observed displacements:");
    println!("     {}", format_fixed(&ranks, 3));
    Ok(())
}
