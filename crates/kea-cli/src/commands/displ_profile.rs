use std::error::Error;

use clap::Args;
use kea_core::AleatoryLevel;
use kea_model::{displ_profile, FaultDisplacementModel, ProfileRequest, DEFAULT_LOCATION_STEP};

use super::{format_fixed, parse_selection, parse_style, print_json};

#[derive(Args, Debug)]
pub struct DisplProfileArgs {
    /// Earthquake moment magnitude.
    #[arg(short, long)]
    pub magnitude: f64,
    /// Style of faulting: strike-slip, reverse or normal (case-insensitive).
    #[arg(short, long)]
    pub style: String,
    /// Aleatory quantile value; use -1 for the mean.
    #[arg(short, long, allow_negative_numbers = true)]
    pub percentile: f64,
    /// Point-estimate coefficients: mean or median.
    #[arg(long = "coefficient-type", visible_alias = "ct", default_value = "median")]
    pub coefficient_type: String,
    /// Report unfolded displacements.
    #[arg(long)]
    pub unfolded: bool,
    /// Profile location step interval.
    #[arg(
        long = "location-step",
        visible_alias = "ls",
        default_value_t = DEFAULT_LOCATION_STEP,
        allow_negative_numbers = true
    )]
    pub location_step: f64,
}

pub fn run(
    args: &DisplProfileArgs,
    model: &FaultDisplacementModel,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let request = ProfileRequest {
        magnitude: args.magnitude,
        style: parse_style(&args.style)?,
        level: AleatoryLevel::from_percentile(args.percentile)?,
        selection: parse_selection(&args.coefficient_type)?,
        folded: !args.unfolded,
        location_step: args.location_step,
    };
    let profile = displ_profile(model, &request)?;
    if json {
        return print_json(&profile);
    }
    println!(
        "     Displacements for magnitude {}, percentile {}, {} faulting:",
        args.magnitude, args.percentile, request.style
    );
    println!("     {} meters", format_fixed(&profile.displacements, 3));
    println!("     Locations:");
    println!("     {}", format_fixed(&profile.locations, 2));
    Ok(())
}
