//! Aggregator - Resolves scoped modifier totals from the active modifier set

use crate::types::Configuration;
use affix_core::{ModKey, ModType, Modifier};
use serde::{Deserialize, Serialize};

/// Additive bucket and multiplicative layers of one kind over one scope set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolved {
    /// Sum of every `addn` modifier
    pub additive: f64,
    /// Product of `1 + value` over every non-`addn` modifier
    pub more: f64,
}

impl Default for Resolved {
    fn default() -> Self {
        Resolved {
            additive: 0.0,
            more: 1.0,
        }
    }
}

impl Resolved {
    /// `(1 + additive) * more`
    pub fn multiplier(&self) -> f64 {
        (1.0 + self.additive) * self.more
    }

    /// `multiplier() - 1`, the net bonus as a fraction
    pub fn increase(&self) -> f64 {
        self.multiplier() - 1.0
    }

    /// Additive total carried through the multiplicative layers.
    /// Used for stats that are totals rather than multipliers, like resistances.
    pub fn total(&self) -> f64 {
        self.additive * self.more
    }
}

/// Read-only view over a modifier set and the configuration that sizes its stacks
pub struct Aggregator<'a> {
    mods: &'a [Modifier],
    config: &'a Configuration,
}

impl<'a> Aggregator<'a> {
    pub fn new(mods: &'a [Modifier], config: &'a Configuration) -> Self {
        Self { mods, config }
    }

    /// Magnitude after resolving its stack count
    pub fn effective_value(&self, m: &Modifier) -> f64 {
        match &m.per {
            Some(per) => m.stacked_value(self.config.stack_count(per)),
            None => m.value,
        }
    }

    /// Modifiers of `key` whose scope is global or one of `scopes`
    pub fn matching<'s>(
        &'s self,
        key: ModKey,
        scopes: &'s [ModType],
    ) -> impl Iterator<Item = &'a Modifier> + 's {
        self.mods
            .iter()
            .filter(move |m| m.key() == key)
            .filter(move |m| m.mod_type == ModType::Global || scopes.contains(&m.mod_type))
    }

    pub fn resolve(&self, key: ModKey, scope: ModType) -> Resolved {
        self.resolve_in(key, &[scope])
    }

    /// Global modifiers are members of every scope set, so they count once
    pub fn resolve_in(&self, key: ModKey, scopes: &[ModType]) -> Resolved {
        self.matching(key, scopes)
            .fold(Resolved::default(), |mut acc, m| {
                let v = self.effective_value(m);
                if m.addn {
                    acc.additive += v;
                } else {
                    acc.more *= 1.0 + v;
                }
                acc
            })
    }

    /// Plain sum of effective values, for flat kinds like stats and charges
    pub fn sum(&self, key: ModKey, scopes: &[ModType]) -> f64 {
        self.matching(key, scopes)
            .map(|m| self.effective_value(m))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affix_core::{parse_affix, ModKind, StatType};

    fn mods(lines: &[&str]) -> Vec<Modifier> {
        lines.iter().map(|l| parse_affix(l).unwrap()).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_additive_and_more() {
        let mods = mods(&[
            "+20% additional damage",
            "+30% additional cold damage",
            "+100% damage",
            "+50% cold damage",
            "+10% fire damage",
        ]);
        let config = Configuration::default();
        let agg = Aggregator::new(&mods, &config);

        let cold = agg.resolve(ModKey::DmgPct, ModType::Cold);
        assert!(close(cold.additive, 0.5));
        assert!(close(cold.more, 3.0));
        assert!(close(cold.multiplier(), 4.5));
        assert!(close(cold.increase(), 3.5));
    }

    #[test]
    fn test_global_counted_once_across_scopes() {
        let mods = mods(&["+100% damage", "+100% attack damage"]);
        let config = Configuration::default();
        let agg = Aggregator::new(&mods, &config);

        let r = agg.resolve_in(
            ModKey::DmgPct,
            &[ModType::Global, ModType::Attack, ModType::Cold],
        );
        assert!(close(r.multiplier(), 4.0));
        assert_eq!(agg.matching(ModKey::DmgPct, &[ModType::Spell]).count(), 1);
    }

    #[test]
    fn test_stacks() {
        let mods = vec![
            Modifier::new(ModKind::DmgPct, 0.02)
                .additional()
                .per_stack("fervor", 10),
            Modifier::new(ModKind::DmgPct, 0.1).per_stack("fervor", 10),
        ];

        let full = Configuration::default();
        let r = Aggregator::new(&mods, &full).resolve(ModKey::DmgPct, ModType::Global);
        assert!(close(r.additive, 0.2));
        assert!(close(r.more, 2.0));

        let partial = Configuration::default().with_stacks("fervor", 5);
        let r = Aggregator::new(&mods, &partial).resolve(ModKey::DmgPct, ModType::Global);
        assert!(close(r.additive, 0.1));
        assert!(close(r.more, 1.5));

        let none = Configuration::default().with_stacks("fervor", 0);
        let r = Aggregator::new(&mods, &none).resolve(ModKey::DmgPct, ModType::Global);
        assert!(close(r.multiplier(), 1.0));
    }

    #[test]
    fn test_sum_flat_kinds() {
        let mods = mods(&["+200 dexterity", "+50 dexterity", "+100 strength"]);
        let config = Configuration::default();
        let agg = Aggregator::new(&mods, &config);
        assert_eq!(agg.sum(ModKey::Stat(StatType::Dex), &[]), 250.0);
        assert_eq!(agg.sum(ModKey::Stat(StatType::Int), &[]), 0.0);
    }

    #[test]
    fn test_empty_set_is_neutral() {
        let config = Configuration::default();
        let agg = Aggregator::new(&[], &config);
        let r = agg.resolve(ModKey::CritDmgPct, ModType::Attack);
        assert_eq!(r, Resolved::default());
        assert_eq!(r.multiplier(), 1.0);
        assert_eq!(r.total(), 0.0);
    }
}
