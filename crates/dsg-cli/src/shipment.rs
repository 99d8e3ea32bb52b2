//! # Shipment Subcommand
//!
//! Checks a shipment booking file: the required booking fields, the ASN
//! window, and the parcel limits when the shipment goes by parcel.
//!
//! ## File format
//!
//! ```yaml
//! po_number: PO-7781
//! dc_code: DC12
//! depart_time: 2026-03-02T08:00:00Z
//! tms_id: CS100234
//! shipping_mode: parcel
//! total_cartons: "12"
//! total_weight: "96.5"
//! ```
//!
//! Exits 0 when the booking is complete and, for parcel, within limits.
//! Otherwise exits 1.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use dsg_core::shipment::{asn_deadline, asn_time_remaining, format_time_remaining};
use dsg_core::{validate_shipment_form, FieldError, ParcelEligibility, ShipmentForm, Timestamp};

/// Arguments for the `dsg shipment` subcommand.
#[derive(Args, Debug)]
pub struct ShipmentArgs {
    /// Shipment booking file (YAML).
    pub file: PathBuf,

    /// Evaluate the ASN window at this RFC 3339 time instead of now.
    #[arg(long)]
    pub at: Option<String>,

    /// Emit a JSON report.
    #[arg(long)]
    pub json: bool,
}

/// ASN window status.
#[derive(Debug, Serialize)]
pub struct AsnReport {
    pub deadline: Timestamp,
    pub remaining: String,
    pub sent: bool,
    pub overdue: bool,
}

/// Outcome of checking a booking.
#[derive(Debug, Serialize)]
pub struct ShipmentReport {
    pub errors: Vec<FieldError>,
    pub asn: Option<AsnReport>,
    pub parcel: Option<ParcelEligibility>,
}

impl ShipmentReport {
    /// The booking is complete and fits its shipping mode.
    pub fn ok(&self) -> bool {
        self.errors.is_empty() && self.parcel.as_ref().map_or(true, |p| p.is_eligible)
    }
}

/// Execute the shipment subcommand.
pub fn run_shipment(args: &ShipmentArgs) -> Result<u8> {
    let form = load_shipment_form(&args.file)?;
    let now = match &args.at {
        Some(at) => Timestamp::parse(at).context("invalid --at time")?,
        None => Timestamp::now(),
    };
    let report = cmd_shipment(&form, now)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(if report.ok() { 0 } else { 1 })
}

/// Read and parse a shipment booking file.
pub fn load_shipment_form(path: &Path) -> Result<ShipmentForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read shipment file {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse shipment file {}", path.display()))
}

/// Check `form` as of `now`.
pub fn cmd_shipment(form: &ShipmentForm, now: Timestamp) -> Result<ShipmentReport> {
    let errors = validate_shipment_form(form).err().unwrap_or_default();
    let asn = form.depart()?.map(|depart| {
        let remaining = asn_time_remaining(depart, now);
        AsnReport {
            deadline: asn_deadline(depart),
            remaining: format_time_remaining(remaining),
            sent: form.asn_sent_at.is_some(),
            overdue: form.asn_overdue(now),
        }
    });
    let parcel = form.parcel_eligibility();

    tracing::debug!(
        mode = %form.shipping_mode,
        errors = errors.len(),
        eligible = ?parcel.as_ref().map(|p| p.is_eligible),
        "checked shipment"
    );
    if asn.as_ref().is_some_and(|a| a.overdue) {
        tracing::warn!(po_number = %form.po_number, "ASN overdue");
    }

    Ok(ShipmentReport { errors, asn, parcel })
}

fn print_report(report: &ShipmentReport) {
    if report.errors.is_empty() {
        println!("Booking: complete");
    } else {
        println!("Booking: incomplete");
        for error in &report.errors {
            println!("  {error}");
        }
    }
    if let Some(asn) = &report.asn {
        let status = match (asn.sent, asn.overdue) {
            (true, _) => "sent",
            (false, true) => "OVERDUE",
            (false, false) => "pending",
        };
        println!("ASN due: {} ({status}, {} left)", asn.deadline, asn.remaining);
    }
    if let Some(parcel) = &report.parcel {
        let verdict = if parcel.is_eligible {
            "Shipment meets parcel requirements"
        } else {
            "Shipment may not meet parcel requirements"
        };
        println!("{verdict}");
        println!(
            "  Cartons: {} / {}",
            parcel.cartons, parcel.policy.max_cartons
        );
        println!(
            "  Weight: {} / {} lbs",
            parcel.weight_lb, parcel.policy.max_weight_lb
        );
        for warning in &parcel.warnings {
            println!("  warning: {warning}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARCEL: &str = r#"
po_number: PO-7781
dc_code: DC12
depart_time: "2026-03-02T08:00:00Z"
tms_id: CS100234
shipping_mode: parcel
total_cartons: "20"
total_weight: "96.5"
"#;

    fn at(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn parcel_over_carton_limit_is_not_ok() {
        let form: ShipmentForm = serde_yaml::from_str(PARCEL).unwrap();
        let report = cmd_shipment(&form, at("2026-03-02T08:30:00Z")).unwrap();
        assert!(report.errors.is_empty());
        let parcel = report.parcel.as_ref().unwrap();
        assert_eq!(parcel.cartons, 20);
        assert_eq!(
            parcel.warnings[0].to_string(),
            "Exceeds carton limit (20 > 16)"
        );
        assert!(!report.ok());
        let asn = report.asn.unwrap();
        assert_eq!(asn.remaining, "00:30:00");
        assert!(!asn.overdue);
    }

    #[test]
    fn ltl_booking_missing_fields() {
        let form: ShipmentForm = serde_yaml::from_str("po_number: PO-1\n").unwrap();
        let report = cmd_shipment(&form, at("2026-03-02T08:30:00Z")).unwrap();
        assert_eq!(report.errors.len(), 3);
        assert!(report.asn.is_none());
        assert!(report.parcel.is_none());
        assert!(!report.ok());
    }

    #[test]
    fn overdue_asn_is_reported() {
        let form: ShipmentForm = serde_yaml::from_str(PARCEL).unwrap();
        let report = cmd_shipment(&form, at("2026-03-02T09:30:00Z")).unwrap();
        let asn = report.asn.unwrap();
        assert!(asn.overdue);
        assert_eq!(asn.remaining, "00:00:00");
        assert_eq!(asn.deadline.to_string(), "2026-03-02T09:00:00Z");
    }

    #[test]
    fn bad_depart_time_is_an_error() {
        let form: ShipmentForm = serde_yaml::from_str("depart_time: soon\n").unwrap();
        assert!(cmd_shipment(&form, at("2026-03-02T08:30:00Z")).is_err());
    }

    #[test]
    fn run_shipment_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shipment.yaml");
        std::fs::write(&path, PARCEL.replace("\"20\"", "\"12\"")).unwrap();
        let args = ShipmentArgs {
            file: path.clone(),
            at: Some("2026-03-02T08:30:00Z".to_string()),
            json: true,
        };
        assert_eq!(run_shipment(&args).unwrap(), 0);

        std::fs::write(&path, PARCEL).unwrap();
        assert_eq!(run_shipment(&args).unwrap(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let args = ShipmentArgs {
            file: PathBuf::from("/nonexistent/shipment.yaml"),
            at: None,
            json: false,
        };
        assert!(run_shipment(&args).is_err());
    }
}
