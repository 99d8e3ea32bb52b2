//! # BOL Subcommand
//!
//! Scores and validates a bill of lading file.
//!
//! ```yaml
//! bol_type: gs1
//! carrier_full_name: Estes Express Lines
//! tms_shipment_id: CS100234
//! pos:
//!   - po_number: PO-7781
//!     cartons_per_po: "42"
//! ```
//!
//! Exits 0 when the BOL is ready to submit, 1 when any field fails.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use dsg_core::{completeness_percent, validate_bol, BolForm, FieldError};

/// Arguments for the `dsg bol` subcommand.
#[derive(Args, Debug)]
pub struct BolArgs {
    /// Bill of lading file (YAML).
    pub file: PathBuf,

    /// Emit a JSON report.
    #[arg(long)]
    pub json: bool,
}

/// Completeness and validation outcome.
#[derive(Debug, Serialize)]
pub struct BolReport {
    pub completeness_percent: u8,
    pub errors: Vec<FieldError>,
}

/// Execute the bol subcommand.
pub fn run_bol(args: &BolArgs) -> Result<u8> {
    let form = load_bol(&args.file)?;
    let report = cmd_bol(&form);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("BOL completeness: {}%", report.completeness_percent);
        if report.errors.is_empty() {
            println!("Ready to submit");
        }
        for error in &report.errors {
            println!("  {error}");
        }
    }
    Ok(if report.errors.is_empty() { 0 } else { 1 })
}

/// Read and parse a BOL file.
pub fn load_bol(path: &Path) -> Result<BolForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read BOL file {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse BOL file {}", path.display()))
}

/// Score and validate `form`.
pub fn cmd_bol(form: &BolForm) -> BolReport {
    let report = BolReport {
        completeness_percent: completeness_percent(form),
        errors: validate_bol(form).err().unwrap_or_default(),
    };
    tracing::debug!(
        completeness = report.completeness_percent,
        errors = report.errors.len(),
        "checked BOL"
    );
    report
}
