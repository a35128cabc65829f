use std::error::Error;

use clap::Args;
use kea_core::{AleatoryLevel, Scenario};
use kea_model::{displ_site, FaultDisplacementModel, SiteOptions, SiteOutput};

use super::{format_fixed, parse_selection, parse_style, print_csv, print_json};

#[derive(Args, Debug)]
pub struct DisplSiteArgs {
    /// Earthquake moment magnitude.
    #[arg(short, long)]
    pub magnitude: f64,
    /// Normalized location along rupture length, range [0, 1].
    #[arg(short, long, allow_negative_numbers = true)]
    pub location: f64,
    /// Style of faulting: strike-slip, reverse or normal (case-insensitive).
    #[arg(short, long)]
    pub style: String,
    /// Aleatory quantile value; use -1 for the mean.
    #[arg(short, long, allow_negative_numbers = true)]
    pub percentile: f64,
    /// Coefficients to evaluate: mean, median or full.
    #[arg(long = "coefficient-type", visible_alias = "ct", default_value = "median")]
    pub coefficient_type: String,
    /// Report the unfolded site displacement.
    #[arg(long)]
    pub unfolded: bool,
    /// Print every intermediate quantity as CSV.
    #[arg(long)]
    pub debug: bool,
}

pub fn run(
    args: &DisplSiteArgs,
    model: &FaultDisplacementModel,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let style = parse_style(&args.style)?;
    let selection = parse_selection(&args.coefficient_type)?;
    let level = AleatoryLevel::from_percentile(args.percentile)?;
    let scenario = Scenario::new(args.magnitude, args.location, style, selection);
    let opts = SiteOptions {
        folded: !args.unfolded,
        debug: args.debug,
    };
    let output = displ_site(model, &scenario, level, &opts)?;
    if json {
        return print_json(&output);
    }
    match output {
        SiteOutput::Debug(rows) => print_csv(&rows),
        SiteOutput::Displacements(values) => {
            println!(
                "     Displacement for magnitude {}, location {}, percentile {}, {} faulting:",
                args.magnitude, args.location, args.percentile, style
            );
            println!("     {} meters", format_fixed(&values, 3));
            Ok(())
        }
    }
}
