use std::error::Error;

use clap::Args;
use kea_core::Scenario;
use kea_model::{prob_exceed, ExceedanceOptions, ExceedanceOutput, FaultDisplacementModel};

use super::{
    format_fixed, format_scientific, parse_selection, parse_style, print_csv, print_json,
};

#[derive(Args, Debug)]
pub struct ProbExceedArgs {
    /// Earthquake moment magnitude.
    #[arg(short, long)]
    pub magnitude: f64,
    /// Normalized location along rupture length, range [0, 1].
    #[arg(short, long, allow_negative_numbers = true)]
    pub location: f64,
    /// Style of faulting: strike-slip, reverse or normal (case-insensitive).
    #[arg(short, long)]
    pub style: String,
    /// Trial displacements in meters.
    #[arg(short, long, num_args = 1.., required = true, allow_negative_numbers = true)]
    pub displacement: Vec<f64>,
    /// Coefficients to evaluate: mean, median or full.
    #[arg(long = "coefficient-type", visible_alias = "ct", default_value = "median")]
    pub coefficient_type: String,
    /// Report the unfolded site probabilities.
    #[arg(long)]
    pub unfolded: bool,
    /// Print every intermediate quantity as CSV.
    #[arg(long)]
    pub debug: bool,
}

pub fn run(
    args: &ProbExceedArgs,
    model: &FaultDisplacementModel,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let style = parse_style(&args.style)?;
    let selection = parse_selection(&args.coefficient_type)?;
    let scenario = Scenario::new(args.magnitude, args.location, style, selection);
    let opts = ExceedanceOptions {
        folded: !args.unfolded,
        debug: args.debug,
    };
    let output = prob_exceed(model, &scenario, &args.displacement, &opts)?;
    if json {
        return print_json(&output);
    }
    match output {
        ExceedanceOutput::Debug(rows) => print_csv(&rows),
        ExceedanceOutput::Table(rows) => print_csv(&rows),
        ExceedanceOutput::Curve(curve) => {
            println!(
                "     Probability of exceedance for magnitude {}, location {}, {} faulting:",
                args.magnitude, args.location, style
            );
            println!("     {}", format_scientific(&curve));
            println!("     Displacement (meters):");
            println!("     {}", format_fixed(&args.displacement, 3));
            Ok(())
        }
    }
}
