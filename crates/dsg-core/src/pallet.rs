//! # Pallet Evaluation
//!
//! Aggregate statistics and loading checks for a set of cartons staged on
//! one pallet. The pallet lifecycle itself lives in `dsg-state`.
//!
//! ## Checks
//!
//! - **Overhang**: every carton fits the standard 48" × 40" footprint.
//! - **Brick layer**: the pallet holds at least one carton. Stacking
//!   pattern is attested by the loader on the QA checklist.
//! - **Heavy cartons**: any carton over 50 lb is flagged for
//!   heavy-on-bottom trailer loading.

use serde::{Deserialize, Serialize};

use crate::conveyability::{CartonProfile, DSG_CONVEYABLE_POLICY};

/// Standard pallet footprint length, in inches.
pub const PALLET_LENGTH_IN: f64 = 48.0;

/// Standard pallet footprint width, in inches.
pub const PALLET_WIDTH_IN: f64 = 40.0;

/// Summary of the cartons on a pallet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PalletStats {
    /// Sum of carton weights, in pounds.
    pub total_weight_lb: f64,
    /// Tallest carton, in inches. Zero when empty.
    pub max_height_in: f64,
    /// Any carton exceeds the conveyable weight limit.
    pub has_heavy_cartons: bool,
    /// Number of cartons.
    pub carton_count: usize,
}

impl PalletStats {
    /// Compute statistics over `cartons`.
    pub fn compute<'a, I>(cartons: I) -> Self
    where
        I: IntoIterator<Item = &'a CartonProfile>,
    {
        cartons
            .into_iter()
            .fold(Self::default(), |acc, c| Self {
                total_weight_lb: acc.total_weight_lb + c.weight_lb,
                max_height_in: acc.max_height_in.max(c.height_in),
                has_heavy_cartons: acc.has_heavy_cartons
                    || c.weight_lb > DSG_CONVEYABLE_POLICY.weight_lb.max,
                carton_count: acc.carton_count + 1,
            })
    }
}

/// Every carton fits within the pallet footprint.
pub fn check_overhang<'a, I>(cartons: I) -> bool
where
    I: IntoIterator<Item = &'a CartonProfile>,
{
    cartons
        .into_iter()
        .all(|c| c.length_in <= PALLET_LENGTH_IN && c.width_in <= PALLET_WIDTH_IN)
}

/// The pallet has something to stack.
pub fn check_brick_layer<'a, I>(cartons: I) -> bool
where
    I: IntoIterator<Item = &'a CartonProfile>,
{
    cartons.into_iter().next().is_some()
}

/// Loader attestations required before a pallet passes QA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QaChecklist {
    /// No carton overhangs the pallet edge by more than 1".
    pub overhang: bool,
    /// Cartons are interlocked in a brick-layer pattern.
    pub brick_layer: bool,
    /// Pallet is shrink-wrapped.
    pub shrink_wrap: bool,
    /// All carton labels face outward.
    pub labels_facing_out: bool,
    /// DC placard is on the outside of the wrap.
    pub dc_placard_outside: bool,
}

impl QaChecklist {
    /// Every item is ticked.
    pub fn all_passed(&self) -> bool {
        self.outstanding().is_empty()
    }

    /// Unticked items, by name.
    pub fn outstanding(&self) -> Vec<&'static str> {
        [
            (self.overhang, "overhang"),
            (self.brick_layer, "brick_layer"),
            (self.shrink_wrap, "shrink_wrap"),
            (self.labels_facing_out, "labels_facing_out"),
            (self.dc_placard_outside, "dc_placard_outside"),
        ]
        .into_iter()
        .filter_map(|(ok, name)| (!ok).then_some(name))
        .collect()
    }
}

/// Trailer loading guidance acknowledged by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailerGuidance {
    /// Heavy pallets go on the bottom.
    pub heavy_on_bottom: bool,
    /// No column stacking.
    pub no_column_stacking: bool,
    /// Trailer weight limit confirmed.
    pub weight_limit: bool,
}

impl TrailerGuidance {
    /// Every item is acknowledged.
    pub fn all_passed(&self) -> bool {
        self.outstanding().is_empty()
    }

    /// Unacknowledged items, by name.
    pub fn outstanding(&self) -> Vec<&'static str> {
        [
            (self.heavy_on_bottom, "heavy_on_bottom"),
            (self.no_column_stacking, "no_column_stacking"),
            (self.weight_limit, "weight_limit"),
        ]
        .into_iter()
        .filter_map(|(ok, name)| (!ok).then_some(name))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CartonProfile> {
        vec![
            CartonProfile::new(24.0, 18.0, 12.0, 25.0),
            CartonProfile::new(20.0, 16.0, 14.0, 30.0),
            CartonProfile::new(30.0, 24.0, 16.0, 45.0),
        ]
    }

    #[test]
    fn stats_over_cartons() {
        let stats = PalletStats::compute(&sample());
        assert_eq!(stats.total_weight_lb, 100.0);
        assert_eq!(stats.max_height_in, 16.0);
        assert!(!stats.has_heavy_cartons);
        assert_eq!(stats.carton_count, 3);
    }

    #[test]
    fn stats_empty_pallet() {
        let stats = PalletStats::compute(&[]);
        assert_eq!(stats, PalletStats::default());
        assert_eq!(stats.max_height_in, 0.0);
    }

    #[test]
    fn heavy_carton_flagged_above_limit_only() {
        let at_limit = [CartonProfile::new(24.0, 18.0, 12.0, 50.0)];
        assert!(!PalletStats::compute(&at_limit).has_heavy_cartons);
        let over = [CartonProfile::new(24.0, 18.0, 12.0, 50.5)];
        assert!(PalletStats::compute(&over).has_heavy_cartons);
    }

    #[test]
    fn overhang_footprint() {
        assert!(check_overhang(&sample()));
        assert!(check_overhang(&[CartonProfile::new(48.0, 40.0, 10.0, 10.0)]));
        assert!(!check_overhang(&[CartonProfile::new(49.0, 20.0, 10.0, 10.0)]));
        assert!(!check_overhang(&[CartonProfile::new(20.0, 41.0, 10.0, 10.0)]));
        assert!(check_overhang(&[]));
    }

    #[test]
    fn brick_layer_requires_cartons() {
        assert!(check_brick_layer(&sample()));
        assert!(!check_brick_layer(&[]));
    }

    #[test]
    fn qa_checklist_outstanding() {
        let mut qa = QaChecklist::default();
        assert_eq!(qa.outstanding().len(), 5);
        qa.overhang = true;
        qa.brick_layer = true;
        qa.shrink_wrap = true;
        qa.labels_facing_out = true;
        assert_eq!(qa.outstanding(), vec!["dc_placard_outside"]);
        qa.dc_placard_outside = true;
        assert!(qa.all_passed());
    }

    #[test]
    fn trailer_guidance_outstanding() {
        let tg = TrailerGuidance {
            heavy_on_bottom: true,
            no_column_stacking: false,
            weight_limit: true,
        };
        assert_eq!(tg.outstanding(), vec!["no_column_stacking"]);
        assert!(!tg.all_passed());
    }
}
