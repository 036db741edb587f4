//! Build-side value types shared by loadouts, sources and the calculator

use affix_core::PerStack;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum active skill slots
pub const MAX_ACTIVE_SKILLS: usize = 4;
/// Maximum supports socketed into one active or passive skill
pub const MAX_SUPPORTS: usize = 5;
/// Maximum passive skill slots
pub const MAX_PASSIVE_SKILLS: usize = 4;

/// Run-time toggles supplied alongside a loadout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Active stacks per stackable buff. A buff with no entry is held at its limit.
    #[serde(default)]
    pub stacks: BTreeMap<String, u32>,
    /// Extra affix lines that apply to the whole build
    #[serde(default)]
    pub custom_affixes: Vec<String>,
}

impl Configuration {
    /// Active stacks for a stacking descriptor, within `[0, limit]`
    pub fn stack_count(&self, per: &PerStack) -> u32 {
        self.stacks
            .get(&per.stackable)
            .copied()
            .unwrap_or(per.limit)
            .min(per.limit)
    }

    pub fn with_stacks(mut self, stackable: impl Into<String>, count: u32) -> Self {
        self.stacks.insert(stackable.into(), count);
        self
    }

    pub fn with_custom_affix(mut self, affix: impl Into<String>) -> Self {
        self.custom_affixes.push(affix.into());
        self
    }
}

fn default_level() -> u32 {
    1
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportSkill {
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveSkill {
    pub name: String,
    /// Saved with the slot; damage formulas do not read the active skill's level
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub supports: Vec<SupportSkill>,
}

impl ActiveSkill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            enabled: true,
            supports: Vec::new(),
        }
    }

    pub fn with_support(mut self, name: impl Into<String>, level: u32) -> Self {
        self.supports.push(SupportSkill {
            name: name.into(),
            level,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveSkill {
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Supports only affect the passive itself
    #[serde(default)]
    pub supports: Vec<SupportSkill>,
}

impl PassiveSkill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            enabled: true,
            supports: Vec::new(),
        }
    }

    pub fn with_support(mut self, name: impl Into<String>, level: u32) -> Self {
        self.supports.push(SupportSkill {
            name: name.into(),
            level,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per(limit: u32) -> PerStack {
        PerStack {
            stackable: "cruelty_buff".to_string(),
            limit,
        }
    }

    #[test]
    fn test_stack_count_defaults_to_limit() {
        let config = Configuration::default();
        assert_eq!(config.stack_count(&per(40)), 40);
    }

    #[test]
    fn test_stack_count_clamped() {
        let config = Configuration::default().with_stacks("cruelty_buff", 55);
        assert_eq!(config.stack_count(&per(40)), 40);
        let config = Configuration::default().with_stacks("cruelty_buff", 3);
        assert_eq!(config.stack_count(&per(40)), 3);
    }

    #[test]
    fn test_skill_defaults_from_json() {
        let skill: ActiveSkill = serde_json::from_str(r#"{"name": "Frost Spike"}"#).unwrap();
        assert_eq!(skill, ActiveSkill::new("Frost Spike"));

        let passive: PassiveSkill = serde_json::from_str(
            r#"{"name": "Precise: Cruelty", "supports": [{"name": "Aura Amplification", "level": 3}]}"#,
        )
        .unwrap();
        assert_eq!(
            passive,
            PassiveSkill::new("Precise: Cruelty").with_support("Aura Amplification", 3)
        );
    }
}
