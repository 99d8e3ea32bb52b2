//! # Shipment Setup
//!
//! Checks applied when a shipment is booked: the required booking fields,
//! the ASN window, and whether a parcel-mode shipment fits the carrier's
//! parcel limits.
//!
//! ## ASN window
//!
//! The advance ship notice is due one hour after the depart time. Until it
//! is sent, the remaining time counts down and is displayed as `HH:MM:SS`;
//! once it reaches zero the ASN is overdue.
//!
//! ## Parcel limits
//!
//! | Limit | Value |
//! |-------|-------|
//! | Cartons per destination per week | at most 16 |
//! | Billable weight | at most 110 lb |
//!
//! LTL shipments have no parcel check. Counts are read with
//! [`parse_count`] and weights with [`parse_measure`], so blank input is 0.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{DsgError, FieldError};
use crate::measure::{parse_count, parse_measure};
use crate::temporal::Timestamp;

/// Time allowed between departure and the ASN, in seconds.
pub const ASN_WINDOW_SECS: i64 = 60 * 60;

/// How a shipment travels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMode {
    /// Less-than-truckload freight.
    #[default]
    Ltl,
    /// Small-parcel carrier.
    Parcel,
}

impl std::fmt::Display for ShippingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Ltl => "ltl",
            Self::Parcel => "parcel",
        })
    }
}

// ─── Parcel eligibility ─────────────────────────────────────────────

/// Carrier limits for parcel shipments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParcelPolicy {
    pub max_cartons: i64,
    pub max_weight_lb: f64,
}

/// The DSG parcel limits.
pub const DSG_PARCEL_POLICY: ParcelPolicy = ParcelPolicy {
    max_cartons: 16,
    max_weight_lb: 110.0,
};

/// A parcel limit the shipment goes over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParcelWarning {
    /// More cartons than the weekly per-destination limit.
    CartonLimit {
        /// Cartons in the shipment.
        cartons: i64,
        /// The policy maximum.
        max: i64,
    },
    /// More billable weight than the parcel limit.
    WeightLimit {
        /// Shipment weight in pounds.
        weight_lb: f64,
        /// The policy maximum in pounds.
        max_lb: f64,
    },
}

impl std::fmt::Display for ParcelWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CartonLimit { cartons, max } => {
                write!(f, "Exceeds carton limit ({cartons} > {max})")
            }
            Self::WeightLimit { weight_lb, max_lb } => write!(
                f,
                "Exceeds weight limit ({} > {} lbs)",
                Pounds(*weight_lb),
                Pounds(*max_lb)
            ),
        }
    }
}

/// Renders a weight the way it was entered: `120`, `120.5`, `Infinity`.
struct Pounds(f64);

impl std::fmt::Display for Pounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_infinite() {
            let sign = if self.0 < 0.0 { "-" } else { "" };
            write!(f, "{sign}Infinity")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Outcome of a parcel check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParcelEligibility {
    pub is_eligible: bool,
    pub cartons: i64,
    pub weight_lb: f64,
    pub policy: ParcelPolicy,
    /// Carton limit first, then weight limit.
    pub warnings: Vec<ParcelWarning>,
}

/// Check a parcel shipment against [`DSG_PARCEL_POLICY`].
pub fn check_parcel_eligibility(cartons: i64, weight_lb: f64) -> ParcelEligibility {
    let policy = DSG_PARCEL_POLICY;
    let mut warnings = Vec::new();
    if cartons > policy.max_cartons {
        warnings.push(ParcelWarning::CartonLimit {
            cartons,
            max: policy.max_cartons,
        });
    }
    if weight_lb > policy.max_weight_lb {
        warnings.push(ParcelWarning::WeightLimit {
            weight_lb,
            max_lb: policy.max_weight_lb,
        });
    }
    ParcelEligibility {
        is_eligible: warnings.is_empty(),
        cartons,
        weight_lb,
        policy,
        warnings,
    }
}

// ─── Shipment form ──────────────────────────────────────────────────

/// Shipment booking, as entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipmentForm {
    pub po_number: String,
    pub dc_code: String,
    /// RFC 3339 depart time.
    pub depart_time: String,
    pub tms_id: String,
    pub destination: String,
    pub shipping_mode: ShippingMode,
    pub total_cartons: Option<String>,
    pub total_weight: Option<String>,
    /// When the ASN went out, if it has.
    pub asn_sent_at: Option<Timestamp>,
}

impl ShipmentForm {
    /// Parcel check for this shipment, or `None` for LTL.
    pub fn parcel_eligibility(&self) -> Option<ParcelEligibility> {
        match self.shipping_mode {
            ShippingMode::Ltl => None,
            ShippingMode::Parcel => Some(check_parcel_eligibility(
                parse_count(self.total_cartons.as_deref()),
                parse_measure(self.total_weight.as_deref()),
            )),
        }
    }

    /// Parsed depart time, or `None` if not entered.
    ///
    /// # Errors
    ///
    /// [`DsgError::InvalidTimestamp`] if the depart time is not RFC 3339.
    pub fn depart(&self) -> Result<Option<Timestamp>, DsgError> {
        if self.depart_time.is_empty() {
            return Ok(None);
        }
        Timestamp::parse(&self.depart_time).map(Some)
    }

    /// Record the ASN as sent at `now`.
    ///
    /// # Errors
    ///
    /// The same field errors as [`validate_shipment_form`]; the ASN is not
    /// recorded unless every booking field is present.
    pub fn send_asn(&mut self, now: Timestamp) -> Result<(), Vec<FieldError>> {
        validate_shipment_form(self)?;
        self.asn_sent_at = Some(now);
        Ok(())
    }

    /// `true` once the ASN window has closed without an ASN.
    ///
    /// A missing or unreadable depart time never counts as overdue.
    pub fn asn_overdue(&self, now: Timestamp) -> bool {
        if self.asn_sent_at.is_some() {
            return false;
        }
        match self.depart() {
            Ok(Some(depart)) => asn_time_remaining(depart, now).is_zero(),
            _ => false,
        }
    }
}

/// Check the four booking fields. Empty fields are reported in form order.
pub fn validate_shipment_form(form: &ShipmentForm) -> Result<(), Vec<FieldError>> {
    let fields = [
        ("po_number", "PO Number", &form.po_number),
        ("dc_code", "DC Code", &form.dc_code),
        ("depart_time", "Depart Time", &form.depart_time),
        ("tms_id", "TMS ID", &form.tms_id),
    ];
    let errors: Vec<FieldError> = fields
        .iter()
        .filter(|(_, _, value)| value.is_empty())
        .map(|(field, label, _)| FieldError::new(*field, format!("{label} is required")))
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ─── ASN window ─────────────────────────────────────────────────────

/// When the ASN for a shipment departing at `depart` is due.
pub fn asn_deadline(depart: Timestamp) -> Timestamp {
    Timestamp::from_utc(*depart.as_datetime() + Duration::seconds(ASN_WINDOW_SECS))
}

/// Time left before the ASN is due, never negative.
pub fn asn_time_remaining(depart: Timestamp, now: Timestamp) -> Duration {
    let remaining = *asn_deadline(depart).as_datetime() - *now.as_datetime();
    remaining.max(Duration::zero())
}

/// Render a remaining time as `HH:MM:SS`. Zero or negative is `00:00:00`.
pub fn format_time_remaining(remaining: Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}
