//! # dsg CLI entry point
//!
//! Parses command-line arguments, initializes logging, and dispatches to
//! the subcommand handlers in `dsg_cli`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dsg_cli::bol::{run_bol, BolArgs};
use dsg_cli::classify::{run_classify, ClassifyArgs};
use dsg_cli::pallet::{run_pallet, PalletArgs};
use dsg_cli::shipment::{run_shipment, ShipmentArgs};
use dsg_cli::sscc::{run_sscc, SsccArgs};

/// DSG routing CLI.
///
/// Generates and verifies SSCC-18 shipping container codes, classifies
/// cartons for conveyor handling, evaluates pallet QA, and checks shipment
/// bookings and bills of lading.
#[derive(Parser, Debug)]
#[command(name = "dsg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a label configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate, verify, and format SSCC-18 codes.
    Sscc(SsccArgs),

    /// Classify a carton as conveyable or non-conveyable.
    Classify(ClassifyArgs),

    /// Evaluate a pallet description file.
    Pallet(PalletArgs),

    /// Check a shipment booking file.
    Shipment(ShipmentArgs),

    /// Score and validate a bill of lading file.
    Bol(BolArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "dsg CLI starting");

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Sscc(args) => run_sscc(args, config),
        Commands::Classify(args) => run_classify(args),
        Commands::Pallet(args) => run_pallet(args, config),
        Commands::Shipment(args) => run_shipment(args),
        Commands::Bol(args) => run_bol(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
