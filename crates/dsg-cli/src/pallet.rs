//! # Pallet Subcommand
//!
//! Evaluates a pallet description file: registers each carton, stages it on
//! a new pallet, runs the footprint checks, and records the QA outcome.
//!
//! ## File format
//!
//! ```yaml
//! cartons:
//!   - carton_id: C001
//!     length: 24
//!     width: 18
//!     height: 12
//!     weight: 25
//!     placement_attested: true
//! qa:
//!   overhang: true
//!   brick_layer: true
//!   shrink_wrap: true
//!   labels_facing_out: true
//!   dc_placard_outside: true
//! trailer:
//!   heavy_on_bottom: true
//!   no_column_stacking: true
//!   weight_limit: true
//! ```
//!
//! Measurements may be numbers or strings. The pallet passes QA only when
//! every QA item is ticked; the command then exits 0, otherwise 1.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use dsg_core::carton::CartonForm;
use dsg_core::{
    ConveyabilityWarning, PalletStats, QaChecklist, RandomSerialSource, SerialSource,
    SsccGenerator, TrailerGuidance,
};
use dsg_state::{Carton, Pallet, PalletState};

use crate::config::load_label_config;

/// Arguments for the `dsg pallet` subcommand.
#[derive(Args, Debug)]
pub struct PalletArgs {
    /// Pallet description file (YAML).
    pub file: PathBuf,

    /// Emit a JSON report.
    #[arg(long)]
    pub json: bool,
}

/// A measurement written either as a YAML number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Number(f64),
    Text(String),
}

impl Measure {
    fn into_text(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// One carton entry in a pallet description.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CartonEntry {
    pub carton_id: String,
    #[serde(default)]
    pub length: Option<Measure>,
    #[serde(default)]
    pub width: Option<Measure>,
    #[serde(default)]
    pub height: Option<Measure>,
    #[serde(default)]
    pub weight: Option<Measure>,
    #[serde(default)]
    pub placement_attested: bool,
}

impl From<CartonEntry> for CartonForm {
    fn from(entry: CartonEntry) -> Self {
        Self {
            carton_id: entry.carton_id,
            length: entry.length.map(Measure::into_text),
            width: entry.width.map(Measure::into_text),
            height: entry.height.map(Measure::into_text),
            weight: entry.weight.map(Measure::into_text),
            placement_attested: entry.placement_attested,
        }
    }
}

/// A pallet description file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PalletDescription {
    pub cartons: Vec<CartonEntry>,
    #[serde(default)]
    pub qa: QaChecklist,
    #[serde(default)]
    pub trailer: TrailerGuidance,
}

/// Per-carton line of the report.
#[derive(Debug, Serialize)]
pub struct CartonReport {
    pub carton_id: String,
    pub sscc: String,
    pub conveyable: bool,
    pub warnings: Vec<ConveyabilityWarning>,
    pub placement: &'static str,
}

/// Outcome of evaluating a pallet description.
#[derive(Debug, Serialize)]
pub struct PalletReport {
    pub pallet_id: String,
    pub state: PalletState,
    pub stats: PalletStats,
    pub overhang_ok: bool,
    pub brick_layer_ok: bool,
    pub cartons: Vec<CartonReport>,
    pub qa_outstanding: Vec<&'static str>,
    pub trailer_outstanding: Vec<&'static str>,
}

/// Execute the pallet subcommand.
pub fn run_pallet(args: &PalletArgs, config_path: Option<&Path>) -> Result<u8> {
    let description = load_pallet_description(&args.file)?;
    let config = load_label_config(config_path)?;
    let mut generator = SsccGenerator::from_config(&config, RandomSerialSource::new());
    let report = evaluate_pallet(description, &mut generator)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(if report.state == PalletState::QaPassed { 0 } else { 1 })
}

/// Read and parse a pallet description file.
pub fn load_pallet_description(path: &Path) -> Result<PalletDescription> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pallet file {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse pallet file {}", path.display()))
}

/// Register, stage, and QA every carton in `description`.
pub fn evaluate_pallet<S: SerialSource>(
    description: PalletDescription,
    generator: &mut SsccGenerator<S>,
) -> Result<PalletReport> {
    let mut pallet = Pallet::new();
    let mut cartons = Vec::with_capacity(description.cartons.len());

    for entry in description.cartons {
        let form = CartonForm::from(entry);
        let mut carton = Carton::register(&form, generator)
            .with_context(|| format!("carton \"{}\"", form.carton_id))?;
        carton.print()?;
        carton.place()?;
        pallet.add_carton(&carton)?;
        cartons.push(CartonReport {
            carton_id: carton.carton_id.clone(),
            sscc: carton.sscc.to_string(),
            conveyable: carton.conveyability.is_conveyable,
            warnings: carton.conveyability.warnings.clone(),
            placement: carton.placement().instruction(),
        });
    }

    pallet.set_qa_checklist(description.qa)?;
    pallet.set_trailer_guidance(description.trailer)?;
    let stats = pallet.assemble()?;
    let passed = description.qa.all_passed();
    pallet.complete_qa(passed)?;

    tracing::info!(
        pallet_id = %pallet.id,
        cartons = stats.carton_count,
        state = %pallet.state,
        "pallet evaluated"
    );

    Ok(PalletReport {
        pallet_id: pallet.id.to_string(),
        state: pallet.state,
        stats,
        overhang_ok: pallet.overhang_ok(),
        brick_layer_ok: pallet.brick_layer_ok(),
        cartons,
        qa_outstanding: pallet.qa.outstanding(),
        trailer_outstanding: pallet.trailer.outstanding(),
    })
}

fn print_report(report: &PalletReport) {
    println!("Pallet: {}", report.pallet_id);
    println!("  State: {}", report.state);
    println!("  Cartons: {}", report.stats.carton_count);
    println!("  Total weight: {} lb", report.stats.total_weight_lb);
    println!("  Max height: {} in", report.stats.max_height_in);
    println!(
        "  Heavy cartons (>50 lb): {}",
        if report.stats.has_heavy_cartons { "yes" } else { "no" }
    );
    println!("  Overhang check: {}", pass_fail(report.overhang_ok));
    println!("  Brick layer check: {}", pass_fail(report.brick_layer_ok));
    for carton in &report.cartons {
        let verdict = if carton.conveyable {
            "conveyable"
        } else {
            "non-conveyable"
        };
        println!("  {} {} ({verdict})", carton.carton_id, carton.sscc);
        for warning in &carton.warnings {
            println!("    warning: {warning}");
        }
    }
    if !report.qa_outstanding.is_empty() {
        println!("  QA outstanding: {}", report.qa_outstanding.join(", "));
    }
    if !report.trailer_outstanding.is_empty() {
        println!(
            "  Trailer guidance outstanding: {}",
            report.trailer_outstanding.join(", ")
        );
    }
}

fn pass_fail(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "FAIL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsg_core::{CompanyPrefix, ExtensionDigit};

    const FULL: &str = r#"
cartons:
  - carton_id: C001
    length: 24
    width: 18
    height: 12
    weight: 25
    placement_attested: true
  - carton_id: C002
    length: "30"
    width: "24"
    height: "16"
    weight: "60"
    placement_attested: true
qa:
  overhang: true
  brick_layer: true
  shrink_wrap: true
  labels_facing_out: true
  dc_placard_outside: true
trailer:
  heavy_on_bottom: true
  no_column_stacking: true
  weight_limit: true
"#;

    fn generator() -> SsccGenerator<impl FnMut() -> u64> {
        let mut next = 0u64;
        SsccGenerator::new(
            ExtensionDigit::default(),
            CompanyPrefix::default(),
            move || {
                next += 1;
                next
            },
        )
    }

    #[test]
    fn numbers_and_strings_both_parse() {
        let desc: PalletDescription = serde_yaml::from_str(FULL).unwrap();
        assert_eq!(desc.cartons.len(), 2);
        let form = CartonForm::from(desc.cartons[0].clone());
        assert_eq!(form.length.as_deref(), Some("24"));
        let form = CartonForm::from(desc.cartons[1].clone());
        assert_eq!(form.weight.as_deref(), Some("60"));
    }

    #[test]
    fn full_checklist_passes_qa() {
        let desc: PalletDescription = serde_yaml::from_str(FULL).unwrap();
        let report = evaluate_pallet(desc, &mut generator()).unwrap();
        assert_eq!(report.state, PalletState::QaPassed);
        assert_eq!(report.stats.carton_count, 2);
        assert_eq!(report.stats.total_weight_lb, 85.0);
        assert!(report.stats.has_heavy_cartons);
        assert!(report.overhang_ok);
        assert!(report.brick_layer_ok);
        assert!(report.cartons[0].conveyable);
        assert!(!report.cartons[1].conveyable);
        assert_eq!(
            report.cartons[1].warnings,
            vec![ConveyabilityWarning::Overweight]
        );
        assert_ne!(report.cartons[0].sscc, report.cartons[1].sscc);
    }

    #[test]
    fn missing_checklist_fails_qa() {
        let yaml = r#"
cartons:
  - carton_id: C001
    length: 24
    width: 18
    height: 12
    weight: 25
    placement_attested: true
"#;
        let desc: PalletDescription = serde_yaml::from_str(yaml).unwrap();
        let report = evaluate_pallet(desc, &mut generator()).unwrap();
        assert_eq!(report.state, PalletState::QaFailed);
        assert_eq!(report.qa_outstanding.len(), 5);
        assert_eq!(report.trailer_outstanding.len(), 3);
    }

    #[test]
    fn empty_pallet_is_an_error() {
        let desc: PalletDescription = serde_yaml::from_str("cartons: []\n").unwrap();
        assert!(evaluate_pallet(desc, &mut generator()).is_err());
    }

    #[test]
    fn invalid_carton_names_the_carton() {
        let yaml = r#"
cartons:
  - carton_id: C9
    length: 24
    width: 18
    height: 12
    placement_attested: true
"#;
        let desc: PalletDescription = serde_yaml::from_str(yaml).unwrap();
        let err = evaluate_pallet(desc, &mut generator()).unwrap_err();
        assert!(format!("{err:#}").contains("carton \"C9\""));
    }

    #[test]
    fn unattested_carton_is_an_error() {
        let yaml = r#"
cartons:
  - carton_id: C001
    length: 24
    width: 18
    height: 12
    weight: 25
"#;
        let desc: PalletDescription = serde_yaml::from_str(yaml).unwrap();
        assert!(evaluate_pallet(desc, &mut generator()).is_err());
    }

    #[test]
    fn loads_description_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pallet.yaml");
        std::fs::write(&path, FULL).unwrap();
        let desc = load_pallet_description(&path).unwrap();
        assert_eq!(desc.cartons.len(), 2);
        assert!(desc.trailer.all_passed());
    }

    #[test]
    fn run_pallet_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pallet.yaml");
        std::fs::write(&path, FULL).unwrap();
        let args = PalletArgs {
            file: path,
            json: true,
        };
        assert_eq!(run_pallet(&args, None).unwrap(), 0);
    }
}
