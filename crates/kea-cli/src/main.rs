use std::error::Error;
use std::path::PathBuf;

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use commands::{
    displ_avg::{self, DisplAvgArgs},
    displ_profile::{self, DisplProfileArgs},
    displ_site::{self, DisplSiteArgs},
    params::{self, ParamsArgs},
    prob_exceed::{self, ProbExceedArgs},
    prob_occur::{self, ProbOccurArgs},
};
use kea_coeffs::StoreConfig;
use kea_core::KeaError;
use kea_model::FaultDisplacementModel;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "kea", version, about = "KEA fault displacement model CLI")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug)]
struct GlobalArgs {
    /// Directory holding the coefficient CSV files.
    #[arg(long, global = true, env = "KEA_DATA_DIR")]
    data_dir: Option<PathBuf>,
    /// YAML store configuration (data directory and file names).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Emit results as JSON.
    #[arg(long, global = true)]
    json: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict the transformed-distribution parameters for one scenario.
    Params(ParamsArgs),
    /// Displacement in meters at a site.
    DisplSite(DisplSiteArgs),
    /// Displacement profile along the rupture.
    DisplProfile(DisplProfileArgs),
    /// Average displacement over the rupture.
    DisplAvg(DisplAvgArgs),
    /// Probability of exceedance for trial displacements.
    ProbExceed(ProbExceedArgs),
    /// Percentile rank of observed location/displacement pairs.
    ProbOccur(ProbOccurArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let config = store_config(&cli.global)?;
    let model = FaultDisplacementModel::load(&config)?;
    let json = cli.global.json;
    let outcome = match &cli.command {
        Command::Params(args) => params::run(args, &model, json),
        Command::DisplSite(args) => displ_site::run(args, &model, json),
        Command::DisplProfile(args) => displ_profile::run(args, &model, json),
        Command::DisplAvg(args) => displ_avg::run(args, &model, json),
        Command::ProbExceed(args) => prob_exceed::run(args, &model, json),
        Command::ProbOccur(args) => prob_occur::run(args, &model, json),
    };
    outcome.or_else(report_user_error)
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn store_config(global: &GlobalArgs) -> Result<StoreConfig, KeaError> {
    let mut config = match &global.config {
        Some(path) => StoreConfig::from_yaml_path(path)?,
        None => StoreConfig::default(),
    };
    if let Some(dir) = &global.data_dir {
        config.data_dir = dir.clone();
    }
    tracing::debug!(data_dir = %config.data_dir.display(), "coefficient store");
    Ok(config)
}

/// Prints argument errors and exits cleanly; anything else stays fatal.
fn report_user_error(err: Box<dyn Error>) -> Result<(), Box<dyn Error>> {
    let message = err
        .downcast_ref::<KeaError>()
        .filter(|kea| kea.is_user_facing())
        .map(|kea| kea.info().to_string());
    match message {
        Some(message) => {
            println!("{message}");
            Ok(())
        }
        None => Err(err),
    }
}
