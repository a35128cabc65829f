use std::error::Error;

use clap::Args;
use kea_core::{DistributionParams, Scenario};
use kea_model::FaultDisplacementModel;

use super::{format_fixed, parse_selection, parse_style, print_json};

#[derive(Args, Debug)]
pub struct ParamsArgs {
    /// Earthquake moment magnitude.
    #[arg(short, long)]
    pub magnitude: f64,
    /// Normalized location along rupture length, range [0, 1].
    #[arg(short, long, allow_negative_numbers = true)]
    pub location: f64,
    /// Style of faulting: strike-slip, reverse or normal (case-insensitive).
    #[arg(short, long)]
    pub style: String,
    /// Coefficients to evaluate: mean, median or full.
    #[arg(long = "coefficient-type", visible_alias = "ct", default_value = "median")]
    pub coefficient_type: String,
}

pub fn run(
    args: &ParamsArgs,
    model: &FaultDisplacementModel,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let style = parse_style(&args.style)?;
    let selection = parse_selection(&args.coefficient_type)?;
    let scenario = Scenario::new(args.magnitude, args.location, style, selection);
    let prediction = model.predict_params(&scenario)?;
    if json {
        return print_json(&prediction);
    }

    println!(
        "     Parameters for magnitude {}, location {}, {} faulting:",
        args.magnitude, args.location, style
    );
    let ids: Vec<String> = prediction.params.iter().map(|p| p.model_id.to_string()).collect();
    println!("     model_id: [{}]", ids.join(" "));
    let columns: [(&str, fn(&DistributionParams) -> f64); 5] = [
        ("bc_param", |p| p.bc_param),
        ("mean", |p| p.mean),
        ("stdv_total", |p| p.stdv_total),
        ("stdv_within", |p| p.stdv_within),
        ("stdv_between", |p| p.stdv_between),
    ];
    for (name, column) in columns {
        let values: Vec<f64> = prediction.params.iter().map(column).collect();
        println!("     {name}: {}", format_fixed(&values, 6));
    }
    Ok(())
}
