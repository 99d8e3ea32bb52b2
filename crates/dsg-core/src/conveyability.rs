//! # Conveyability Classification
//!
//! Decides whether a carton can travel on the carrier's automated conveyor
//! and lists every handling rule it breaks.
//!
//! ## Policy
//!
//! | Attribute   | Min | Max |
//! |-------------|-----|-----|
//! | Length (in) |   9 |  48 |
//! | Width (in)  |   6 |  30 |
//! | Height (in) |   3 |  30 |
//! | Weight (lb) |   3 |  50 |
//!
//! The policy is fixed ([`DSG_CONVEYABLE_POLICY`]); it is not configuration.
//!
//! ## Warnings
//!
//! At most one warning per category, always in this order: oversize,
//! undersize, overweight, underweight. Dimension rules combine all three
//! axes into a single warning.
//!
//! ## Zero weight
//!
//! A weight of exactly `0` reads as "not entered yet" and does not raise the
//! underweight warning. It still fails the inclusive `[3, 50]` bound, so such
//! a carton is non-conveyable with no weight warning. Because missing input
//! is coerced to `0` (see [`crate::measure`]), a carton with no weight entered
//! behaves the same way. Whether missing input should be a distinct state is
//! unresolved; the behavior is kept as-is.

use serde::{Deserialize, Serialize};

use crate::measure::{coerce, parse_measure};

/// Inclusive bounds for one measured attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest allowed value.
    pub min: f64,
    /// Largest allowed value.
    pub max: f64,
}

impl Bounds {
    /// Whether `value` lies in `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Physical handling limits for conveyable cartons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConveyablePolicy {
    /// Length in inches.
    pub length_in: Bounds,
    /// Width in inches.
    pub width_in: Bounds,
    /// Height in inches.
    pub height_in: Bounds,
    /// Weight in pounds.
    pub weight_lb: Bounds,
}

/// The carrier's conveyor limits.
pub const DSG_CONVEYABLE_POLICY: ConveyablePolicy = ConveyablePolicy {
    length_in: Bounds { min: 9.0, max: 48.0 },
    width_in: Bounds { min: 6.0, max: 30.0 },
    height_in: Bounds { min: 3.0, max: 30.0 },
    weight_lb: Bounds { min: 3.0, max: 50.0 },
};

/// Measured dimensions and weight of a carton.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartonProfile {
    /// Length in inches.
    pub length_in: f64,
    /// Width in inches.
    pub width_in: f64,
    /// Height in inches.
    pub height_in: f64,
    /// Weight in pounds.
    pub weight_lb: f64,
}

impl CartonProfile {
    /// Build a profile, mapping NaN to `0.0`.
    pub fn new(length_in: f64, width_in: f64, height_in: f64, weight_lb: f64) -> Self {
        Self {
            length_in: coerce(length_in),
            width_in: coerce(width_in),
            height_in: coerce(height_in),
            weight_lb: coerce(weight_lb),
        }
    }

    /// Build a profile from raw form input; see [`parse_measure`].
    pub fn from_raw(
        length: Option<&str>,
        width: Option<&str>,
        height: Option<&str>,
        weight: Option<&str>,
    ) -> Self {
        Self {
            length_in: parse_measure(length),
            width_in: parse_measure(width),
            height_in: parse_measure(height),
            weight_lb: parse_measure(weight),
        }
    }

    /// Classify against the carrier policy.
    pub fn classify(&self) -> ConveyabilityResult {
        DSG_CONVEYABLE_POLICY.evaluate(self)
    }
}

/// One violated rule category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConveyabilityWarning {
    /// A dimension exceeds its maximum.
    Oversize,
    /// A dimension is below its minimum.
    Undersize,
    /// Weight exceeds its maximum.
    Overweight,
    /// Weight is positive but below its minimum.
    Underweight,
}

impl ConveyabilityWarning {
    /// Human-readable message for this warning under `policy`.
    pub fn message(&self, policy: &ConveyablePolicy) -> String {
        match self {
            Self::Oversize => format!(
                "Exceeds conveyable dimensions (max: {}\"L × {}\"W × {}\"H)",
                policy.length_in.max, policy.width_in.max, policy.height_in.max
            ),
            Self::Undersize => format!(
                "Below minimum dimensions (min: {}\"L × {}\"W × {}\"H)",
                policy.length_in.min, policy.width_in.min, policy.height_in.min
            ),
            Self::Overweight => format!(
                "Exceeds conveyable weight limit (max: {} lbs)",
                policy.weight_lb.max
            ),
            Self::Underweight => {
                format!("Below minimum weight (min: {} lb)", policy.weight_lb.min)
            }
        }
    }
}

impl std::fmt::Display for ConveyabilityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message(&DSG_CONVEYABLE_POLICY))
    }
}

/// Outcome of classifying one carton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConveyabilityResult {
    /// All four attributes lie within their inclusive bounds.
    pub is_conveyable: bool,
    /// Violated rule categories in evaluation order.
    pub warnings: Vec<ConveyabilityWarning>,
}

impl ConveyabilityResult {
    /// Warning messages in order, for direct display.
    pub fn messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// Label placement instruction for this carton.
    pub fn placement(&self) -> LabelPlacement {
        LabelPlacement::for_conveyable(self.is_conveyable)
    }
}

impl ConveyablePolicy {
    /// Evaluate `profile` in a single pass over the thresholds.
    pub fn evaluate(&self, profile: &CartonProfile) -> ConveyabilityResult {
        let CartonProfile {
            length_in: l,
            width_in: w,
            height_in: h,
            weight_lb: wt,
        } = *profile;

        let oversize = l > self.length_in.max || w > self.width_in.max || h > self.height_in.max;
        let undersize = l < self.length_in.min || w < self.width_in.min || h < self.height_in.min;
        let overweight = wt > self.weight_lb.max;
        let underweight = wt > 0.0 && wt < self.weight_lb.min;

        let warnings = [
            (oversize, ConveyabilityWarning::Oversize),
            (undersize, ConveyabilityWarning::Undersize),
            (overweight, ConveyabilityWarning::Overweight),
            (underweight, ConveyabilityWarning::Underweight),
        ]
        .into_iter()
        .filter_map(|(hit, warning)| hit.then_some(warning))
        .collect();

        let is_conveyable = self.length_in.contains(l)
            && self.width_in.contains(w)
            && self.height_in.contains(h)
            && self.weight_lb.contains(wt);

        ConveyabilityResult {
            is_conveyable,
            warnings,
        }
    }
}

/// Classify a carton against the carrier policy. Total over all inputs;
/// NaN is treated as `0` and infinities exceed every maximum.
pub fn classify(
    length_in: f64,
    width_in: f64,
    height_in: f64,
    weight_lb: f64,
) -> ConveyabilityResult {
    CartonProfile::new(length_in, width_in, height_in, weight_lb).classify()
}

/// Classify raw form input. Missing or unparseable values count as `0`.
pub fn classify_raw(
    length: Option<&str>,
    width: Option<&str>,
    height: Option<&str>,
    weight: Option<&str>,
) -> ConveyabilityResult {
    CartonProfile::from_raw(length, width, height, weight).classify()
}

/// Where to apply the shipping label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPlacement {
    /// Right side, 2" from the base and 2" from the vertical edge.
    RightSide,
    /// End of carton, parallel or perpendicular.
    CartonEnd,
}

impl LabelPlacement {
    /// Placement keyed by conveyability.
    pub fn for_conveyable(is_conveyable: bool) -> Self {
        if is_conveyable {
            Self::RightSide
        } else {
            Self::CartonEnd
        }
    }

    /// Instruction text printed on the label guide.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::RightSide => "Right side, 2\" from base and 2\" from vertical edge",
            Self::CartonEnd => "End of carton (parallel or perpendicular OK)",
        }
    }
}

impl std::fmt::Display for LabelPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.instruction())
    }
}
