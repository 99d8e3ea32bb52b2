//! # Classify Subcommand
//!
//! Runs the conveyability classifier over one carton's measurements and
//! prints the verdict, any warnings, and where the label goes.
//!
//! Measurements are taken as text and coerced the same way the carton entry
//! form does: an omitted or unparseable value counts as zero.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use dsg_core::{classify_raw, ConveyabilityResult, LabelPlacement};

/// Arguments for the `dsg classify` subcommand.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Length in inches.
    #[arg(long, allow_hyphen_values = true)]
    pub length: Option<String>,

    /// Width in inches.
    #[arg(long, allow_hyphen_values = true)]
    pub width: Option<String>,

    /// Height in inches.
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<String>,

    /// Weight in pounds.
    #[arg(long, allow_hyphen_values = true)]
    pub weight: Option<String>,

    /// Emit JSON.
    #[arg(long)]
    pub json: bool,
}

/// Classification with rendered messages.
#[derive(Debug, Serialize)]
pub struct ClassifyOutput {
    #[serde(flatten)]
    pub result: ConveyabilityResult,
    pub messages: Vec<String>,
    pub placement: LabelPlacement,
    pub placement_instruction: &'static str,
}

/// Execute the classify subcommand.
pub fn run_classify(args: &ClassifyArgs) -> Result<u8> {
    let out = cmd_classify(args);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(0);
    }

    if out.result.is_conveyable {
        println!("CONVEYABLE");
    } else {
        println!("NON-CONVEYABLE");
    }
    for message in &out.messages {
        println!("  warning: {message}");
    }
    println!("Label placement: {}", out.placement_instruction);
    Ok(0)
}

/// Classify the carton described by `args`.
pub fn cmd_classify(args: &ClassifyArgs) -> ClassifyOutput {
    let result = classify_raw(
        args.length.as_deref(),
        args.width.as_deref(),
        args.height.as_deref(),
        args.weight.as_deref(),
    );
    tracing::debug!(
        conveyable = result.is_conveyable,
        warnings = ?result.warnings,
        "classified carton"
    );
    let placement = result.placement();
    ClassifyOutput {
        messages: result.messages(),
        placement,
        placement_instruction: placement.instruction(),
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsg_core::ConveyabilityWarning;

    fn args(l: &str, w: &str, h: &str, wt: &str) -> ClassifyArgs {
        ClassifyArgs {
            length: Some(l.to_string()),
            width: Some(w.to_string()),
            height: Some(h.to_string()),
            weight: Some(wt.to_string()),
            json: false,
        }
    }

    #[test]
    fn conveyable_carton() {
        let out = cmd_classify(&args("24", "18", "12", "25"));
        assert!(out.result.is_conveyable);
        assert!(out.messages.is_empty());
        assert_eq!(out.placement, LabelPlacement::RightSide);
    }

    #[test]
    fn oversize_and_overweight() {
        let out = cmd_classify(&args("100", "40", "40", "60"));
        assert!(!out.result.is_conveyable);
        assert_eq!(
            out.result.warnings,
            vec![
                ConveyabilityWarning::Oversize,
                ConveyabilityWarning::Overweight
            ]
        );
        assert_eq!(out.messages.len(), 2);
        assert_eq!(out.placement, LabelPlacement::CartonEnd);
    }

    #[test]
    fn omitted_weight_is_zero() {
        let out = cmd_classify(&ClassifyArgs {
            weight: None,
            ..args("24", "18", "12", "")
        });
        assert!(!out.result.is_conveyable);
        assert!(out.result.warnings.is_empty());
    }

    #[test]
    fn json_output_shape() {
        let out = cmd_classify(&args("24", "18", "12", "1"));
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["is_conveyable"], false);
        assert_eq!(value["warnings"][0], "underweight");
        assert_eq!(value["messages"][0], "Below minimum weight (min: 3 lb)");
    }
}
