//! # Carton Form Validation
//!
//! Field checks applied to carton entry before a carton is registered.
//! These are stricter than the conveyability classifier: the classifier
//! accepts anything and reports warnings, while a carton record needs a
//! usable ID and positive dimensions.
//!
//! | Field | Rule |
//! |-------|------|
//! | Carton ID | non-blank, at least 3 characters |
//! | Length / width / height | positive, at most 100 in |
//! | Weight | optional; if entered, between 0.1 and 200 lb |

use serde::{Deserialize, Serialize};

use crate::conveyability::CartonProfile;
use crate::error::FieldError;
use crate::measure::parse_measure;

/// Minimum carton ID length, in characters.
pub const MIN_CARTON_ID_LEN: usize = 3;

/// Largest accepted dimension, in inches.
pub const MAX_DIMENSION_IN: f64 = 100.0;

/// Accepted weight range, in pounds.
pub const WEIGHT_RANGE_LB: (f64, f64) = (0.1, 200.0);

/// Raw carton entry, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartonForm {
    /// User-assigned carton ID.
    pub carton_id: String,
    /// Length in inches.
    pub length: Option<String>,
    /// Width in inches.
    pub width: Option<String>,
    /// Height in inches.
    pub height: Option<String>,
    /// Weight in pounds.
    pub weight: Option<String>,
    /// The user attests the label was placed per the placement guide.
    pub placement_attested: bool,
}

/// Check the carton ID field.
pub fn validate_carton_id(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new("carton_id", "Carton ID is required"));
    }
    if value.chars().count() < MIN_CARTON_ID_LEN {
        return Err(FieldError::new(
            "carton_id",
            format!("Carton ID must be at least {MIN_CARTON_ID_LEN} characters"),
        ));
    }
    Ok(())
}

/// Check the three dimensions. Each non-positive axis gets its own error;
/// the upper limit is only checked once all three are positive.
pub fn validate_dimensions(
    length: Option<&str>,
    width: Option<&str>,
    height: Option<&str>,
) -> Result<(f64, f64, f64), Vec<FieldError>> {
    let axes = [
        ("dimensions.length", "Length", parse_measure(length)),
        ("dimensions.width", "Width", parse_measure(width)),
        ("dimensions.height", "Height", parse_measure(height)),
    ];

    let errors: Vec<FieldError> = axes
        .iter()
        .filter(|(_, _, v)| *v <= 0.0)
        .map(|(field, label, _)| {
            FieldError::new(*field, format!("{label} must be a positive number"))
        })
        .collect();
    if !errors.is_empty() {
        return Err(errors);
    }

    let [(_, _, l), (_, _, w), (_, _, h)] = axes;
    if l > MAX_DIMENSION_IN || w > MAX_DIMENSION_IN || h > MAX_DIMENSION_IN {
        return Err(vec![FieldError::new(
            "dimensions",
            format!("Dimensions cannot exceed {MAX_DIMENSION_IN} inches"),
        )]);
    }
    Ok((l, w, h))
}

/// Check the weight field. Blank or absent weight is allowed and reads as 0.
pub fn validate_weight(value: Option<&str>) -> Result<f64, FieldError> {
    let Some(raw) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(0.0);
    };
    let (min, max) = WEIGHT_RANGE_LB;
    let weight = parse_measure(Some(raw));
    if weight < min || weight > max {
        return Err(FieldError::new(
            "weight",
            format!("Weight must be a number between {min} and {max}"),
        ));
    }
    Ok(weight)
}

/// Validate every field of a carton form.
///
/// # Errors
///
/// Returns all field errors, in field order (ID, dimensions, weight).
pub fn validate_carton_form(form: &CartonForm) -> Result<CartonProfile, Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Err(e) = validate_carton_id(&form.carton_id) {
        errors.push(e);
    }
    let dims = validate_dimensions(
        form.length.as_deref(),
        form.width.as_deref(),
        form.height.as_deref(),
    )
    .map_err(|mut e| errors.append(&mut e))
    .ok();
    let weight = validate_weight(form.weight.as_deref())
        .map_err(|e| errors.push(e))
        .ok();

    match (dims, weight) {
        (Some((l, w, h)), Some(wt)) if errors.is_empty() => Ok(CartonProfile::new(l, w, h, wt)),
        _ => Err(errors),
    }
}
