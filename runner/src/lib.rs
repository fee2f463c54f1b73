//! Headless CLI for the sailboat engine: batch simulation runs and
//! foil-table export. Pure I/O adapter; no physics lives here.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use engine::{builtins, Boat, EnvConfig, Environment, Manager, SimOptions};

#[derive(Debug, Parser)]
#[command(name = "sailsim", about = "Headless sailboat dynamics runner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the simulation for a fixed number of steps with a constant command.
    Run(RunArgs),
    /// Write the builtin foil tables as CSV files.
    GenFoils(GenFoilsArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Boat configuration JSON (builtin dinghy when omitted).
    #[arg(long)]
    pub boat_config: Option<PathBuf>,
    /// Environment configuration JSON (builtin breeze when omitted).
    #[arg(long)]
    pub env_config: Option<PathBuf>,
    /// Directory holding the <foil>.csv tables the boat config names.
    #[arg(long, default_value = "foils")]
    pub foils_dir: PathBuf,
    #[arg(long, default_value_t = 600)]
    pub steps: u32,
    /// Fixed timestep, seconds.
    #[arg(long, default_value_t = 0.1)]
    pub time_step: f32,
    /// RNG seed for a reproducible wind sequence.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Constant sail command, degrees relative to heading.
    #[arg(long, default_value_t = -30.0, allow_negative_numbers = true)]
    pub sail: f32,
    /// Constant rudder command, degrees relative to heading.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rudder: f32,
    /// Initial heading, degrees.
    #[arg(long, default_value_t = 90.0)]
    pub heading: f32,
    /// JSON-lines state log path.
    #[arg(long)]
    pub state_log: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct GenFoilsArgs {
    /// Output directory for sail.csv, rudder.csv and keel.csv.
    #[arg(long, default_value = "foils")]
    pub out: PathBuf,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run(args) => run_simulation(args),
        Command::GenFoils(args) => generate_foils(args),
    }
}

fn run_simulation(args: RunArgs) -> Result<()> {
    let boat = match &args.boat_config {
        Some(path) => Boat::from_config_file(path, &args.foils_dir)
            .with_context(|| format!("loading boat configuration {}", path.display()))?,
        None => {
            let (config, foils) = builtins::dinghy();
            Boat::new(config, foils)
        }
    };
    let env_config = match &args.env_config {
        Some(path) => EnvConfig::load(path)
            .with_context(|| format!("loading environment configuration {}", path.display()))?,
        None => builtins::steady_breeze_env(),
    };
    let environment = match args.seed {
        Some(seed) => Environment::with_seed(env_config, seed),
        None => Environment::new(env_config),
    };
    let options = SimOptions {
        time_step: args.time_step,
        heading: args.heading,
        state_log: args.state_log.clone(),
        ..SimOptions::default()
    };

    let mut manager = Manager::new(boat, environment, options);
    let command = [args.sail, args.rudder];
    for _ in 0..args.steps {
        manager.step(&command)?;
    }

    let state = manager.state();
    let agent = manager.agent_state();
    info!(
        steps = args.steps,
        position = ?state.position,
        heading = state.heading,
        speed = state.velocity.length(),
        apparent_wind_speed = agent.wind_speed,
        apparent_wind_direction = agent.wind_direction,
        "run complete"
    );
    Ok(())
}

fn generate_foils(args: GenFoilsArgs) -> Result<()> {
    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    let tables = [
        ("sail", builtins::sail_table()),
        ("rudder", builtins::rudder_table()),
        ("keel", builtins::keel_table()),
    ];
    for (name, table) in tables {
        let path = args.out.join(format!("{name}.csv"));
        let mut text = String::from("alpha,cl,cd\n");
        for alpha in -180..=180 {
            if let Some(row) = table.lookup(alpha) {
                text.push_str(&format!("{alpha},{:.4},{:.4}\n", row.cl, row.cd));
            }
        }
        fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote foil table");
    }
    Ok(())
}
