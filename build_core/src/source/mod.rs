//! ModifierSource - Trait and implementations for modifier providers

mod custom;
mod gear;
mod pactspirit;
mod prism;
mod skill;
mod talent;

pub use custom::CustomAffixSource;
pub use gear::GearSource;
pub use pactspirit::PactspiritSource;
pub use prism::PrismSource;
pub use skill::{PassiveSource, SupportSource};
pub use talent::TalentSource;

use crate::config::GameData;
use crate::loadout::Loadout;
use crate::stat_block::Aggregator;
use crate::types::{ActiveSkill, Configuration, SupportSkill};
use affix_core::{ModKey, ModType, Modifier};
use tracing::debug;

/// Anything that contributes modifiers to a build
pub trait ModifierSource {
    /// Identifier for diagnostics
    fn id(&self) -> &str;

    /// Append this source's modifiers
    fn collect(&self, out: &mut Vec<Modifier>);
}

/// Build-wide modifier pool.
///
/// Gear, talents, prisms, pactspirit rings and custom affixes first; passive buffs
/// are then added scaled by the aura effect resolved from that pool plus each
/// passive's own modifiers and supports.
#[derive(Debug, Clone, Default)]
pub struct BuildModifiers {
    mods: Vec<Modifier>,
}

impl BuildModifiers {
    pub fn collect(loadout: &Loadout, config: &Configuration, data: &GameData) -> Self {
        let mut sources: Vec<Box<dyn ModifierSource + '_>> = Vec::new();
        for gear in &loadout.gear {
            sources.push(Box::new(GearSource::new(gear)));
        }
        for page in &loadout.talents {
            sources.push(Box::new(TalentSource::new(page)));
        }
        for prism in &loadout.prisms {
            sources.push(Box::new(PrismSource::new(prism)));
        }
        for ring in &loadout.pactspirits {
            sources.push(Box::new(PactspiritSource::new(ring)));
        }
        sources.push(Box::new(CustomAffixSource::new(&config.custom_affixes)));

        let mut mods = Vec::new();
        for source in &sources {
            source.collect(&mut mods);
        }
        mods.retain(|m| m.is_build_wide());

        let mut passive_mods = Vec::new();
        for passive in loadout.enabled_passive_skills() {
            let Some(template) = data.passive(&passive.name) else {
                debug!(passive = %passive.name, "no template for passive skill, skipping");
                continue;
            };
            let supports = support_mods(&passive.name, &passive.supports, data);
            let source = PassiveSource::new(passive, template, supports, &mods, config);
            debug!(
                passive = source.id(),
                aura_effect = source.aura_multiplier(),
                "applying passive buff"
            );
            source.collect(&mut passive_mods);
        }
        mods.extend(passive_mods);

        BuildModifiers { mods }
    }

    pub fn from_mods(mods: Vec<Modifier>) -> Self {
        BuildModifiers { mods }
    }

    pub fn mods(&self) -> &[Modifier] {
        &self.mods
    }

    /// Build pool plus the modifiers of the skill's own supports
    pub fn for_skill(&self, skill: &ActiveSkill, data: &GameData) -> Vec<Modifier> {
        let mut mods = self.mods.clone();
        mods.extend(support_mods(&skill.name, &skill.supports, data));
        mods
    }
}

fn support_mods(skill: &str, supports: &[SupportSkill], data: &GameData) -> Vec<Modifier> {
    let mut mods = Vec::new();
    for support in supports {
        match data.support(&support.name) {
            Some(template) => SupportSource::new(support, template).collect(&mut mods),
            None => debug!(skill, support = %support.name, "no template for support skill"),
        }
    }
    mods
}

/// Aura effect multiplier over a pool, used when scaling passive buffs
pub(crate) fn aura_multiplier(mods: &[Modifier], config: &Configuration) -> f64 {
    Aggregator::new(mods, config)
        .resolve(ModKey::AuraEffPct, ModType::Global)
        .multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PassiveSkill, SupportSkill};
    use affix_core::{Gear, GearSlot, ModKind, PactspiritRing, Prism, PrismRarity};

    fn data() -> GameData {
        GameData::bundled().unwrap()
    }

    #[test]
    fn test_empty_loadout_has_no_modifiers() {
        let pool = BuildModifiers::collect(&Loadout::default(), &Configuration::default(), &data());
        assert!(pool.mods().is_empty());
    }

    #[test]
    fn test_gear_and_custom_affixes() {
        let loadout = Loadout {
            gear: vec![Gear::new(GearSlot::Boots).with_affix("+10% damage")],
            ..Loadout::default()
        };
        let config = Configuration::default().with_custom_affix("+5% cast speed");
        let pool = BuildModifiers::collect(&loadout, &config, &data());
        assert_eq!(pool.mods().len(), 2);
    }

    #[test]
    fn test_passive_scaled_by_own_aura_effect() {
        let loadout = Loadout {
            passive_skills: vec![PassiveSkill::new("Precise: Cruelty")],
            ..Loadout::default()
        };
        let config = Configuration::default().with_stacks("cruelty_buff", 40);
        let pool = BuildModifiers::collect(&loadout, &config, &data());

        // own_skill_only aura effect stays out of the build pool
        assert_eq!(pool.mods().len(), 1);
        let dmg = &pool.mods()[0];
        assert_eq!(dmg.kind, ModKind::DmgPct);
        assert!((dmg.value - 0.18 * 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_build_aura_effect_stacks_with_own() {
        let loadout = Loadout {
            passive_skills: vec![PassiveSkill::new("Precise: Cruelty")],
            ..Loadout::default()
        };
        let config = Configuration::default()
            .with_stacks("cruelty_buff", 0)
            .with_custom_affix("+50% additional aura effect");
        let pool = BuildModifiers::collect(&loadout, &config, &data());
        let dmg = pool
            .mods()
            .iter()
            .find(|m| m.kind == ModKind::DmgPct)
            .unwrap();
        assert!((dmg.value - 0.18 * 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_passive_support_scales_only_its_passive() {
        let loadout = Loadout {
            passive_skills: vec![PassiveSkill::new("Precise: Cruelty").with_support("Aura Amplification", 1)],
            ..Loadout::default()
        };
        let config = Configuration::default().with_stacks("cruelty_buff", 0);
        let pool = BuildModifiers::collect(&loadout, &config, &data());

        // the support's aura effect stays out of the build pool
        assert_eq!(pool.mods().len(), 1);
        let dmg = &pool.mods()[0];
        assert_eq!(dmg.kind, ModKind::DmgPct);
        assert!((dmg.value - 0.18 * 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_prisms_and_pactspirits_join_pool() {
        let loadout = Loadout {
            prisms: vec![Prism::new(PrismRarity::Rare, "Adds to medium talents in range:\n+8% attack speed")
                .with_gauge(PrismRarity::Rare, "+12% cold damage")],
            pactspirits: vec![PactspiritRing::new("Ring of Embers", "+10% fire damage")],
            ..Loadout::default()
        };
        let pool = BuildModifiers::collect(&loadout, &Configuration::default(), &data());
        let kinds: Vec<_> = pool.mods().iter().map(|m| m.kind).collect();
        assert_eq!(kinds, [ModKind::AspdPct, ModKind::DmgPct, ModKind::DmgPct]);
    }

    #[test]
    fn test_disabled_or_unknown_passive_ignored() {
        let mut disabled = PassiveSkill::new("Precise: Cruelty");
        disabled.enabled = false;
        let loadout = Loadout {
            passive_skills: vec![disabled, PassiveSkill::new("Unknown Aura")],
            ..Loadout::default()
        };
        let pool = BuildModifiers::collect(&loadout, &Configuration::default(), &data());
        assert!(pool.mods().is_empty());
    }

    #[test]
    fn test_supports_only_for_their_skill() {
        let pool = BuildModifiers::from_mods(Vec::new());
        let supported = ActiveSkill::new("Chain Lightning").with_support("Quick Cast", 1);
        let plain = ActiveSkill::new("Frost Spike");

        let mods = pool.for_skill(&supported, &data());
        assert_eq!(mods.len(), 1);
        assert_eq!(mods[0].kind, ModKind::CspdPct);
        assert!(pool.for_skill(&plain, &data()).is_empty());

        let unknown = ActiveSkill {
            supports: vec![SupportSkill {
                name: "Mystery".into(),
                level: 1,
            }],
            ..ActiveSkill::new("Frost Spike")
        };
        assert!(pool.for_skill(&unknown, &data()).is_empty());
    }
}
