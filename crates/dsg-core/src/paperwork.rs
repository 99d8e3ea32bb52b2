//! # Bill of Lading Paperwork
//!
//! Completeness scoring and submit-time validation for the bill of lading
//! (BOL) that travels with a shipment.
//!
//! A BOL has thirteen required text fields plus one or more PO lines. The
//! completeness score counts each non-blank required field, and counts the
//! PO lines as one more item when every line has both a PO number and a
//! carton count, out of fourteen.
//!
//! The TMS shipment ID must begin with `CS`.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Required TMS shipment ID prefix.
pub const TMS_SHIPMENT_ID_PREFIX: &str = "CS";

/// Items scored by [`completeness_percent`]: every required field plus the
/// PO lines.
pub const COMPLETENESS_ITEMS: usize = BolForm::REQUIRED_FIELDS + 1;

/// BOL layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BolType {
    /// GS1-compliant layout.
    #[default]
    #[serde(rename = "gs1")]
    Gs1,
    /// Carrier's own layout.
    #[serde(rename = "non-gs1")]
    NonGs1,
}

/// One purchase order shipped on the BOL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoLine {
    pub po_number: String,
    pub cartons_per_po: String,
}

impl PoLine {
    /// Both the PO number and the carton count are filled in.
    pub fn is_complete(&self) -> bool {
        !self.po_number.is_empty() && !self.cartons_per_po.is_empty()
    }
}

/// Bill of lading, as entered. A new form starts with one empty PO line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BolForm {
    pub bol_type: BolType,
    pub carrier_full_name: String,
    pub vendor_name: String,
    pub vendor_number: String,
    pub bol_number: String,
    pub ship_to: String,
    pub bill_to: String,
    pub description: String,
    pub nmfc_class: String,
    pub total_cartons: String,
    pub total_pallets: String,
    pub total_weight: String,
    pub tms_shipment_id: String,
    pub seal_number: String,
    pub pos: Vec<PoLine>,
}

impl Default for BolForm {
    fn default() -> Self {
        Self {
            bol_type: BolType::default(),
            carrier_full_name: String::new(),
            vendor_name: String::new(),
            vendor_number: String::new(),
            bol_number: String::new(),
            ship_to: String::new(),
            bill_to: String::new(),
            description: String::new(),
            nmfc_class: String::new(),
            total_cartons: String::new(),
            total_pallets: String::new(),
            total_weight: String::new(),
            tms_shipment_id: String::new(),
            seal_number: String::new(),
            pos: vec![PoLine::default()],
        }
    }
}

impl BolForm {
    /// Number of required text fields.
    pub const REQUIRED_FIELDS: usize = 13;

    /// Required fields as `(name, value)`, in form order.
    pub fn required_fields(&self) -> [(&'static str, &str); Self::REQUIRED_FIELDS] {
        [
            ("carrier_full_name", self.carrier_full_name.as_str()),
            ("vendor_name", self.vendor_name.as_str()),
            ("vendor_number", self.vendor_number.as_str()),
            ("bol_number", self.bol_number.as_str()),
            ("ship_to", self.ship_to.as_str()),
            ("bill_to", self.bill_to.as_str()),
            ("description", self.description.as_str()),
            ("nmfc_class", self.nmfc_class.as_str()),
            ("total_cartons", self.total_cartons.as_str()),
            ("total_pallets", self.total_pallets.as_str()),
            ("total_weight", self.total_weight.as_str()),
            ("tms_shipment_id", self.tms_shipment_id.as_str()),
            ("seal_number", self.seal_number.as_str()),
        ]
    }

    /// Every PO line is complete. An empty list counts as complete.
    pub fn pos_complete(&self) -> bool {
        self.pos.iter().all(PoLine::is_complete)
    }

    /// Append an empty PO line.
    pub fn add_po(&mut self) {
        self.pos.push(PoLine::default());
    }

    /// Remove the PO line at `index`. Out-of-range indices are ignored.
    pub fn remove_po(&mut self, index: usize) -> Option<PoLine> {
        (index < self.pos.len()).then(|| self.pos.remove(index))
    }
}

/// Percentage of BOL items filled in, rounded to the nearest whole number.
pub fn completeness_percent(form: &BolForm) -> u8 {
    let filled = form
        .required_fields()
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .count()
        + usize::from(form.pos_complete());
    let percent = (filled * 100) as f64 / COMPLETENESS_ITEMS as f64;
    percent.round() as u8
}

/// Validate a BOL for submission.
///
/// # Errors
///
/// Returns every problem found, in this order:
/// 1. blank required fields, in form order (`"<field name> is required"`),
/// 2. incomplete PO lines, keyed `pos[<index>]`,
/// 3. a TMS shipment ID without the `CS` prefix.
///
/// A TMS shipment ID that is only whitespace reports the prefix error in
/// place of the required-field error.
pub fn validate_bol(form: &BolForm) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    let tms = form.tms_shipment_id.as_str();

    for (field, value) in form.required_fields() {
        if !value.trim().is_empty() {
            continue;
        }
        if field == "tms_shipment_id" && !value.is_empty() {
            errors.push(tms_prefix_error());
        } else {
            let label = field.replace('_', " ");
            errors.push(FieldError::new(field, format!("{label} is required")));
        }
    }

    for (index, po) in form.pos.iter().enumerate() {
        if !po.is_complete() {
            errors.push(FieldError::new(
                format!("pos[{index}]"),
                "PO number and cartons per PO are required",
            ));
        }
    }

    if !tms.trim().is_empty() && !tms.starts_with(TMS_SHIPMENT_ID_PREFIX) {
        errors.push(tms_prefix_error());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn tms_prefix_error() -> FieldError {
    FieldError::new(
        "tms_shipment_id",
        format!("TMS Shipment ID must start with \"{TMS_SHIPMENT_ID_PREFIX}\""),
    )
}
