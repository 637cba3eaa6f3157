//! Command-line driver for the portfolio simulator core.
//!
//! Runs either engine from a JSON configuration file and prints the
//! resulting series as JSON, so the core is exercisable without the
//! Python dashboard.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use portfolio_simulator_core_rs::{
    project_scenarios, simulate_portfolio, ScenarioConfig, SimulatorConfig,
};

#[derive(Parser)]
#[command(name = "portfolio-simulator", about = "Portfolio simulation engines")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the stochastic day-by-day portfolio simulation
    Simulate {
        /// JSON config file; built-in defaults when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Run the deterministic multi-scenario growth projection
    Project {
        /// JSON config file; built-in defaults when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Simulate { config, pretty } => {
            let config: SimulatorConfig = load_config(config)?;
            let snapshots = simulate_portfolio(&config)?;
            print_json(&snapshots, pretty)
        }
        Command::Project { config, pretty } => {
            let config: ScenarioConfig = load_config(config)?;
            let projection = project_scenarios(&config)?;
            print_json(&projection, pretty)
        }
    }
}

fn load_config<T>(path: Option<PathBuf>) -> Result<T, Box<dyn std::error::Error>>
where
    T: serde::de::DeserializeOwned + Default,
{
    match path {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(T::default()),
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
