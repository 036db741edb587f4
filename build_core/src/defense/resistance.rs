//! Resistance - Potential, cap and applied resistance per damage type
//!
//! Formula:
//! - potential = sum of resistance modifiers for the type (may be negative or exceed the cap)
//! - max = base cap + sum of max-resistance modifiers for the type
//! - actual = clamp(potential, 0, max)
//!
//! All three are reported in percent.

use crate::config::ResistanceConstants;
use crate::stat_block::Aggregator;
use affix_core::{ModKey, ResType};
use serde::{Deserialize, Serialize};

/// One resistance entity, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resistance {
    pub max: f64,
    pub potential: f64,
    pub actual: f64,
}

impl Resistance {
    /// Build from a cap and an unclamped total, deriving `actual`
    pub fn new(max: f64, potential: f64) -> Self {
        Resistance {
            max,
            potential,
            actual: clamp_resistance(potential, max),
        }
    }

    pub fn is_capped(&self) -> bool {
        self.potential >= self.max
    }

    /// Resistance above the cap that is not applied
    pub fn overcap(&self) -> f64 {
        (self.potential - self.max).max(0.0)
    }
}

/// `max(0, min(potential, max))`
pub fn clamp_resistance(potential: f64, max: f64) -> f64 {
    potential.min(max).max(0.0)
}

/// The four resistances of a build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResistanceSnapshot {
    pub cold_res: Resistance,
    pub lightning_res: Resistance,
    pub fire_res: Resistance,
    pub erosion_res: Resistance,
}

impl ResistanceSnapshot {
    pub fn get(&self, res: ResType) -> &Resistance {
        match res {
            ResType::Cold => &self.cold_res,
            ResType::Lightning => &self.lightning_res,
            ResType::Fire => &self.fire_res,
            ResType::Erosion => &self.erosion_res,
        }
    }
}

/// Rounds away float noise from summing fractional modifiers
fn to_percent(fraction: f64) -> f64 {
    (fraction * 100.0 * 1e6).round() / 1e6
}

/// Resolve one resistance from the build's modifier set
pub fn resolve_resistance(
    agg: &Aggregator<'_>,
    res: ResType,
    constants: &ResistanceConstants,
) -> Resistance {
    let scopes = res.scopes();
    let potential = to_percent(agg.resolve_in(ModKey::ResPct, scopes).total());
    let max = constants.base_max + to_percent(agg.resolve_in(ModKey::MaxResPct, scopes).total());
    Resistance::new(max, potential)
}

/// Resolve all four resistances
pub fn calculate_resistances(
    agg: &Aggregator<'_>,
    constants: &ResistanceConstants,
) -> ResistanceSnapshot {
    ResistanceSnapshot {
        cold_res: resolve_resistance(agg, ResType::Cold, constants),
        lightning_res: resolve_resistance(agg, ResType::Lightning, constants),
        fire_res: resolve_resistance(agg, ResType::Fire, constants),
        erosion_res: resolve_resistance(agg, ResType::Erosion, constants),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Configuration;
    use affix_core::{parse_affix, Modifier};
    use proptest::prelude::*;

    fn snapshot(lines: &[&str]) -> ResistanceSnapshot {
        let mods: Vec<Modifier> = lines.iter().map(|l| parse_affix(l).unwrap()).collect();
        let config = Configuration::default();
        let agg = Aggregator::new(&mods, &config);
        calculate_resistances(&agg, &ResistanceConstants::default())
    }

    #[test]
    fn test_no_modifiers() {
        let snap = snapshot(&[]);
        for res in ResType::all() {
            assert_eq!(*snap.get(*res), Resistance::new(60.0, 0.0));
        }
    }

    #[test]
    fn test_elemental_skips_erosion() {
        let snap = snapshot(&["+18% elemental resistance", "+40% cold resistance"]);
        assert_eq!(snap.cold_res, Resistance::new(60.0, 58.0));
        assert_eq!(snap.fire_res, Resistance::new(60.0, 18.0));
        assert_eq!(snap.erosion_res.potential, 0.0);
    }

    #[test]
    fn test_all_resistance_covers_erosion() {
        let snap = snapshot(&["+10% all resistance"]);
        assert_eq!(snap.erosion_res.potential, 10.0);
        assert_eq!(snap.lightning_res.potential, 10.0);
    }

    #[test]
    fn test_overcap_clamps_to_raised_max() {
        let snap = snapshot(&[
            "+100% erosion resistance",
            "+175% erosion resistance",
            "+30% max erosion resistance",
        ]);
        let e = snap.erosion_res;
        assert_eq!(e, Resistance { max: 90.0, potential: 275.0, actual: 90.0 });
        assert!(e.is_capped());
        assert_eq!(e.overcap(), 185.0);
    }

    #[test]
    fn test_negative_potential_applies_zero() {
        let snap = snapshot(&["+10% fire resistance", "-45% fire resistance"]);
        assert_eq!(snap.fire_res.potential, -35.0);
        assert_eq!(snap.fire_res.actual, 0.0);
    }

    #[test]
    fn test_camel_case_shape() {
        let json = serde_json::to_value(snapshot(&[])).unwrap();
        assert_eq!(json["erosionRes"]["max"], 60.0);
    }

    proptest! {
        #[test]
        fn prop_actual_is_clamped(potential in -500.0f64..500.0, max in 0.0f64..100.0) {
            let r = Resistance::new(max, potential);
            prop_assert!(r.actual <= r.max);
            prop_assert!(r.actual >= 0.0);
            prop_assert_eq!(r.actual, potential.clamp(0.0, max));
        }
    }
}
