//! # SSCC Subcommand
//!
//! Generate shipping container codes, verify a code's check digit, and
//! render the label text for a code.
//!
//! ## Commands
//!
//! - `dsg sscc generate [--extension D] [--prefix P] [--serial S] [--count N] [--json]`
//! - `dsg sscc verify <CODE>`: exit 0 when valid, 1 otherwise.
//! - `dsg sscc format <CODE>`

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use dsg_core::{RandomSerialSource, SerialReference, Sscc, SsccGenerator};

use crate::config::resolve_label_config;

/// Arguments for the `dsg sscc` subcommand.
#[derive(Args, Debug)]
pub struct SsccArgs {
    #[command(subcommand)]
    pub command: SsccCommand,
}

/// SSCC subcommands.
#[derive(Subcommand, Debug)]
pub enum SsccCommand {
    /// Generate one or more SSCC-18 codes.
    Generate {
        /// Extension digit (0-9). Overrides the config file.
        #[arg(long)]
        extension: Option<String>,

        /// 7-digit GS1 company prefix. Overrides the config file.
        #[arg(long)]
        prefix: Option<String>,

        /// Serial reference (up to 9 digits). Random when omitted.
        #[arg(long, conflicts_with = "count")]
        serial: Option<String>,

        /// Number of codes to generate.
        #[arg(long, default_value_t = 1)]
        count: u32,

        /// Emit JSON instead of one code per line.
        #[arg(long)]
        json: bool,
    },

    /// Verify the check digit of an SSCC.
    Verify {
        /// 18-digit code, optionally prefixed with the "00" application identifier.
        code: String,
    },

    /// Print the human-readable label text and barcode data for an SSCC.
    Format {
        /// 18-digit code, optionally prefixed with the "00" application identifier.
        code: String,

        /// Emit JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Rendered forms of one code.
#[derive(Debug, Serialize)]
pub struct SsccOutput {
    pub sscc: String,
    pub human_readable: String,
    pub barcode_data: String,
    pub extension_digit: u8,
    pub company_prefix: String,
    pub serial_reference: String,
    pub check_digit: u8,
}

impl From<&Sscc> for SsccOutput {
    fn from(code: &Sscc) -> Self {
        let seg = code.segments();
        Self {
            sscc: code.to_string(),
            human_readable: code.human_readable(),
            barcode_data: code.barcode_data(),
            extension_digit: code.extension_digit(),
            company_prefix: seg.company_prefix.to_string(),
            serial_reference: seg.serial_reference.to_string(),
            check_digit: code.check_digit(),
        }
    }
}

/// Execute the sscc subcommand.
pub fn run_sscc(args: &SsccArgs, config_path: Option<&Path>) -> Result<u8> {
    match &args.command {
        SsccCommand::Generate {
            extension,
            prefix,
            serial,
            count,
            json,
        } => {
            let codes = cmd_generate(
                config_path,
                extension.as_deref(),
                prefix.as_deref(),
                serial.as_deref(),
                *count,
            )?;
            if *json {
                let out: Vec<SsccOutput> = codes.iter().map(SsccOutput::from).collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                for code in &codes {
                    println!("{code}");
                }
            }
            Ok(0)
        }
        SsccCommand::Verify { code } => Ok(cmd_verify(code)),
        SsccCommand::Format { code, json } => {
            let out = cmd_format(code)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("SSCC:         {}", out.sscc);
                println!("Label text:   {}", out.human_readable);
                println!("Barcode data: {}", out.barcode_data);
            }
            Ok(0)
        }
    }
}

/// Generate `count` codes, or exactly one when `serial` is given.
pub fn cmd_generate(
    config_path: Option<&Path>,
    extension: Option<&str>,
    prefix: Option<&str>,
    serial: Option<&str>,
    count: u32,
) -> Result<Vec<Sscc>> {
    if count == 0 {
        bail!("--count must be at least 1");
    }
    let config = resolve_label_config(config_path, extension, prefix)?;
    let mut generator = SsccGenerator::from_config(&config, RandomSerialSource::new());

    if let Some(serial) = serial {
        let serial = SerialReference::new(serial).context("invalid --serial")?;
        return Ok(vec![generator.with_serial(&serial)]);
    }

    let codes: Vec<Sscc> = (0..count).map(|_| generator.next_sscc()).collect();
    tracing::info!(
        count = codes.len(),
        company_prefix = %config.company_prefix,
        "generated SSCC codes"
    );
    Ok(codes)
}

/// Report whether `code` is a valid SSCC. Returns the exit code.
pub fn cmd_verify(code: &str) -> u8 {
    match Sscc::parse(code) {
        Ok(sscc) => {
            println!("VALID: {sscc}");
            0
        }
        Err(e) => {
            println!("INVALID: {e}");
            1
        }
    }
}

/// Parse `code` and build its rendered forms.
pub fn cmd_format(code: &str) -> Result<SsccOutput> {
    let sscc = Sscc::parse(code).with_context(|| format!("cannot format \"{code}\""))?;
    Ok(SsccOutput::from(&sscc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_defaults() {
        let codes = cmd_generate(None, None, None, None, 3).unwrap();
        assert_eq!(codes.len(), 3);
        for code in &codes {
            assert!(Sscc::is_valid(code.as_str()));
            assert_eq!(code.segments().company_prefix, "1234567");
        }
    }

    #[test]
    fn generate_with_serial_is_deterministic() {
        let code = cmd_generate(None, Some("0"), Some("0012345"), Some("123456789"), 1).unwrap();
        assert_eq!(code[0].as_str(), "000123451234567898");
    }

    #[test]
    fn generate_pads_short_serial() {
        let code = cmd_generate(None, None, None, Some("42"), 1).unwrap();
        assert_eq!(code[0].segments().serial_reference, "000000042");
    }

    #[test]
    fn generate_rejects_bad_input() {
        assert!(cmd_generate(None, None, Some("12A4567"), None, 1).is_err());
        assert!(cmd_generate(None, None, None, Some("1234567890"), 1).is_err());
        assert!(cmd_generate(None, None, None, None, 0).is_err());
    }

    #[test]
    fn generate_uses_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label.yaml");
        std::fs::write(&path, "company_prefix: \"0614141\"\nextension_digit: 1\n").unwrap();

        let code = cmd_generate(Some(&path), None, None, Some("234567890"), 1).unwrap();
        assert_eq!(code[0].as_str(), "106141412345678908");
    }

    #[test]
    fn verify_exit_codes() {
        assert_eq!(cmd_verify("000123451234567898"), 0);
        assert_eq!(cmd_verify("(00) 0 0012345 123456789 8"), 0);
        assert_eq!(cmd_verify("000123451234567890"), 1);
        assert_eq!(cmd_verify("not-a-code"), 1);
    }

    #[test]
    fn format_renders_label_text() {
        let out = cmd_format("000123451234567898").unwrap();
        assert_eq!(out.human_readable, "(00) 0 0012345 123456789 8");
        assert_eq!(out.barcode_data, "00000123451234567898");
        assert_eq!(out.serial_reference, "123456789");
        assert_eq!(out.check_digit, 8);
    }

    #[test]
    fn format_rejects_invalid_code() {
        assert!(cmd_format("000123451234567890").is_err());
    }
}
