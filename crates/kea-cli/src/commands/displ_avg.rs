use std::error::Error;

use clap::Args;
use kea_model::{displ_avg, FaultDisplacementModel};
use serde_json::json;

use super::{parse_selection, parse_style, print_json};

#[derive(Args, Debug)]
pub struct DisplAvgArgs {
    /// Earthquake moment magnitude.
    #[arg(short, long)]
    pub magnitude: f64,
    /// Style of faulting: strike-slip, reverse or normal (case-insensitive).
    #[arg(short, long)]
    pub style: String,
    /// Point-estimate coefficients: mean or median.
    #[arg(long = "coefficient-type", visible_alias = "ct", default_value = "median")]
    pub coefficient_type: String,
}

pub fn run(
    args: &DisplAvgArgs,
    model: &FaultDisplacementModel,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let style = parse_style(&args.style)?;
    let selection = parse_selection(&args.coefficient_type)?;
    let average = displ_avg(model, args.magnitude, style, selection)?;
    if as_json {
        return print_json(&json!({
            "magnitude": args.magnitude,
            "style": style,
            "coefficient_type": selection,
            "displ_avg_meters": average,
        }));
    }
    println!(
        "     Average displacement for magnitude {}, {} faulting:",
        args.magnitude, style
    );
    println!("     {average:.3} meters");
    Ok(())
}
