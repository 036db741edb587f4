//! SupportSource and PassiveSource - Modifiers granted by skills

use crate::config::{PassiveTemplate, SupportTemplate};
use crate::source::{aura_multiplier, ModifierSource};
use crate::types::{Configuration, PassiveSkill, SupportSkill};
use affix_core::{ModTarget, Modifier};

/// A support's modifiers at its level, applied only to the skill it supports
pub struct SupportSource<'a> {
    support: &'a SupportSkill,
    template: &'a SupportTemplate,
}

impl<'a> SupportSource<'a> {
    pub fn new(support: &'a SupportSkill, template: &'a SupportTemplate) -> Self {
        SupportSource { support, template }
    }
}

impl ModifierSource for SupportSource<'_> {
    fn id(&self) -> &str {
        &self.support.name
    }

    fn collect(&self, out: &mut Vec<Modifier>) {
        out.extend(self.template.mods_at_level(self.support.level));
    }
}

/// A passive's build-wide buff, scaled by aura effect.
///
/// The aura multiplier comes from the build pool plus the passive's own
/// `own_skill_only` modifiers and its supports. Those own modifiers never leave
/// the source, and `unscalable` buff modifiers keep their magnitude.
pub struct PassiveSource<'a> {
    passive: &'a PassiveSkill,
    buff: Vec<Modifier>,
    aura_mult: f64,
}

impl<'a> PassiveSource<'a> {
    pub fn new(
        passive: &'a PassiveSkill,
        template: &'a PassiveTemplate,
        support_mods: Vec<Modifier>,
        build_mods: &[Modifier],
        config: &Configuration,
    ) -> Self {
        let (own, buff): (Vec<Modifier>, Vec<Modifier>) = template
            .buff_mods_at_level(passive.level)
            .into_iter()
            .partition(|m| m.target == ModTarget::OwnSkillOnly);

        let mut pool = build_mods.to_vec();
        pool.extend(own);
        pool.extend(support_mods);
        let aura_mult = aura_multiplier(&pool, config);

        PassiveSource {
            passive,
            buff,
            aura_mult,
        }
    }

    pub fn aura_multiplier(&self) -> f64 {
        self.aura_mult
    }
}

impl ModifierSource for PassiveSource<'_> {
    fn id(&self) -> &str {
        &self.passive.name
    }

    fn collect(&self, out: &mut Vec<Modifier>) {
        out.extend(self.buff.iter().map(|m| {
            if m.unscalable {
                m.clone()
            } else {
                m.scaled(self.aura_mult)
            }
        }));
    }
}
