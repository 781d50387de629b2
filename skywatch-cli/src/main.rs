//! Skywatch CLI - live flight board for the OpenSky Network.

mod commands;
mod error;
mod runner;
mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "skywatch")]
#[command(version, about = "Live flight board backed by the OpenSky Network", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the live flight dashboard
    Run {
        /// Airport table to load (overrides [airports] file)
        #[arg(long)]
        airports: Option<PathBuf>,

        /// OpenSky API base URL (overrides [opensky] base_url)
        #[arg(long)]
        url: Option<String>,

        /// Seconds between refreshes (overrides [fetch] poll_interval)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,

        /// Print a status line instead of the dashboard
        #[arg(long)]
        headless: bool,
    },

    /// Search the airport table by IATA code, name or city
    Airports {
        /// Search term
        term: String,

        /// Airport table to search (overrides [airports] file)
        #[arg(long)]
        airports: Option<PathBuf>,
    },

    /// Show the last 24 hours of arrivals and departures at an airport
    Traffic {
        /// ICAO airport code (e.g., KSFO)
        icao: String,
    },

    /// Write the default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            airports,
            url,
            interval,
            headless,
        } => commands::run::run(commands::run::RunArgs {
            airports,
            url,
            interval,
            headless,
            debug: cli.debug,
        }),
        Commands::Airports { term, airports } => {
            commands::airports::run(&term, airports, cli.debug)
        }
        Commands::Traffic { icao } => commands::traffic::run(&icao, cli.debug),
        Commands::Init { force } => commands::init::run(force),
    };

    if let Err(e) = result {
        e.exit();
    }
}
