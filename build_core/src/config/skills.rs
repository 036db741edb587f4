//! Active skill configuration loading

use super::ConfigError;
use affix_core::{DmgType, ModType, StatType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Descriptive skill tags that decide delivery and which scoped modifiers apply
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillTag {
    Attack,
    Spell,
    Melee,
    Area,
    Projectile,
    Persistent,
    Physical,
    Cold,
    Lightning,
    Fire,
    Erosion,
}

impl SkillTag {
    pub fn damage_type(self) -> Option<DmgType> {
        match self {
            SkillTag::Physical => Some(DmgType::Physical),
            SkillTag::Cold => Some(DmgType::Cold),
            SkillTag::Lightning => Some(DmgType::Lightning),
            SkillTag::Fire => Some(DmgType::Fire),
            SkillTag::Erosion => Some(DmgType::Erosion),
            _ => None,
        }
    }
}

/// How a skill delivers its hits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Attack,
    Spell,
}

/// Damage-over-time effect a skill leaves behind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistentDamage {
    /// Damage per second before modifiers
    pub base_dps: f64,
    /// Seconds before skill duration modifiers
    pub duration: f64,
}

/// Static formula inputs for one active skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillConfiguration {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<SkillTag>,
    /// Main stats that scale the skill's damage
    #[serde(default)]
    pub stats: Vec<StatType>,
    /// Share of flat added damage the skill receives
    pub added_dmg_eff_pct: f64,
    /// Share of weapon damage an attack deals
    #[serde(default = "default_one")]
    pub weapon_dmg_pct: f64,
    /// Spell hit damage before modifiers
    #[serde(default)]
    pub base_damage: Option<f64>,
    /// Seconds per cast before cast speed
    #[serde(default = "default_one")]
    pub cast_time: f64,
    #[serde(default)]
    pub base_crit_rating: Option<f64>,
    #[serde(default)]
    pub persistent: Option<PersistentDamage>,
}

fn default_one() -> f64 {
    1.0
}

impl SkillConfiguration {
    pub fn has_tag(&self, tag: SkillTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Attack wins when a skill is tagged both ways
    pub fn delivery(&self) -> Option<Delivery> {
        if self.has_tag(SkillTag::Attack) {
            Some(Delivery::Attack)
        } else if self.has_tag(SkillTag::Spell) {
            Some(Delivery::Spell)
        } else {
            None
        }
    }

    /// Modifier scopes that apply to this skill
    pub fn scopes(&self) -> Vec<ModType> {
        let mut scopes = vec![ModType::Global];
        match self.delivery() {
            Some(Delivery::Attack) => scopes.push(ModType::Attack),
            Some(Delivery::Spell) => scopes.push(ModType::Spell),
            None => {}
        }
        if self.has_tag(SkillTag::Melee) {
            scopes.push(ModType::Melee);
        }
        if self.has_tag(SkillTag::Area) {
            scopes.push(ModType::Area);
        }
        let mut elemental = false;
        for dt in self.tags.iter().filter_map(|t| t.damage_type()) {
            let scope = ModType::from(dt);
            elemental |= scope.is_elemental();
            scopes.push(scope);
        }
        if elemental {
            scopes.push(ModType::Elemental);
        }
        scopes
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.added_dmg_eff_pct < 0.0 || self.weapon_dmg_pct < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "skill '{}' has a negative damage effectiveness",
                self.name
            )));
        }
        if self.cast_time <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "skill '{}' has a non-positive cast time",
                self.name
            )));
        }
        if let Some(p) = &self.persistent {
            if p.base_dps < 0.0 || p.duration < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "skill '{}' has a negative persistent damage entry",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// Container for skill configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    #[serde(default)]
    pub skills: Vec<SkillConfiguration>,
}

fn into_map(config: SkillsConfig) -> Result<HashMap<String, SkillConfiguration>, ConfigError> {
    let mut map = HashMap::new();
    for skill in config.skills {
        skill.validate()?;
        if map.contains_key(&skill.name) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate skill configuration '{}'",
                skill.name
            )));
        }
        map.insert(skill.name.clone(), skill);
    }
    Ok(map)
}

/// Load skill configurations from a TOML file
pub fn load_skill_configs(path: &Path) -> Result<HashMap<String, SkillConfiguration>, ConfigError> {
    into_map(super::load_toml(path)?)
}

/// Load skill configurations from a TOML string
pub fn parse_skill_configs(content: &str) -> Result<HashMap<String, SkillConfiguration>, ConfigError> {
    into_map(super::parse_toml(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skills() {
        let toml = r#"
[[skills]]
name = "Frost Spike"
tags = ["attack", "cold", "projectile"]
stats = ["dex", "int"]
added_dmg_eff_pct = 2.01

[[skills]]
name = "Chain Lightning"
tags = ["spell", "lightning"]
stats = ["int"]
added_dmg_eff_pct = 1.2
base_damage = 50000.0
cast_time = 0.8
"#;
        let skills = parse_skill_configs(toml).unwrap();
        let fs = &skills["Frost Spike"];
        assert_eq!(fs.delivery(), Some(Delivery::Attack));
        assert_eq!(fs.weapon_dmg_pct, 1.0);
        assert_eq!(fs.stats, vec![StatType::Dex, StatType::Int]);
        assert_eq!(
            fs.scopes(),
            vec![ModType::Global, ModType::Attack, ModType::Cold, ModType::Elemental]
        );

        let cl = &skills["Chain Lightning"];
        assert_eq!(cl.delivery(), Some(Delivery::Spell));
        assert_eq!(cl.base_damage, Some(50000.0));
    }

    #[test]
    fn test_erosion_is_not_elemental_scope() {
        let skill = SkillConfiguration {
            name: "Mind Control".into(),
            tags: vec![SkillTag::Spell, SkillTag::Erosion, SkillTag::Persistent],
            stats: vec![StatType::Int],
            added_dmg_eff_pct: 1.0,
            weapon_dmg_pct: 1.0,
            base_damage: None,
            cast_time: 1.0,
            base_crit_rating: None,
            persistent: None,
        };
        assert!(!skill.scopes().contains(&ModType::Elemental));
        assert!(skill.scopes().contains(&ModType::Erosion));
    }

    #[test]
    fn test_duplicate_and_invalid_rejected() {
        let dup = r#"
[[skills]]
name = "A"
added_dmg_eff_pct = 1.0

[[skills]]
name = "A"
added_dmg_eff_pct = 1.0
"#;
        assert!(matches!(
            parse_skill_configs(dup),
            Err(ConfigError::ValidationError(_))
        ));

        let bad = r#"
[[skills]]
name = "B"
added_dmg_eff_pct = 1.0
cast_time = 0.0
"#;
        assert!(parse_skill_configs(bad).is_err());
    }
}
