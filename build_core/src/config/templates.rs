//! Support and passive skill templates

use super::ConfigError;
use affix_core::Modifier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Modifiers a support skill grants to the active skill it is socketed into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTemplate {
    pub name: String,
    /// Fractional growth of every modifier per level above 1
    #[serde(default)]
    pub level_scaling: f64,
    #[serde(default)]
    pub mods: Vec<Modifier>,
}

impl SupportTemplate {
    pub fn mods_at_level(&self, level: u32) -> Vec<Modifier> {
        let factor = level_factor(self.level_scaling, level);
        self.mods.iter().map(|m| m.scaled(factor)).collect()
    }
}

/// Buff a passive (aura) skill grants while enabled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveTemplate {
    pub name: String,
    #[serde(default)]
    pub level_scaling: f64,
    #[serde(default)]
    pub buff_mods: Vec<Modifier>,
}

impl PassiveTemplate {
    pub fn buff_mods_at_level(&self, level: u32) -> Vec<Modifier> {
        let factor = level_factor(self.level_scaling, level);
        self.buff_mods.iter().map(|m| m.scaled(factor)).collect()
    }
}

fn level_factor(scaling: f64, level: u32) -> f64 {
    1.0 + scaling * f64::from(level.saturating_sub(1))
}

/// Container for template configurations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplatesConfig {
    #[serde(default)]
    pub supports: Vec<SupportTemplate>,
    #[serde(default)]
    pub passives: Vec<PassiveTemplate>,
}

/// Templates indexed by skill name
#[derive(Debug, Clone, Default)]
pub struct SkillTemplates {
    pub supports: HashMap<String, SupportTemplate>,
    pub passives: HashMap<String, PassiveTemplate>,
}

impl TryFrom<TemplatesConfig> for SkillTemplates {
    type Error = ConfigError;

    fn try_from(config: TemplatesConfig) -> Result<Self, Self::Error> {
        let mut templates = SkillTemplates::default();
        for s in config.supports {
            check_mods(&s.name, &s.mods)?;
            if templates.supports.insert(s.name.clone(), s).is_some() {
                return Err(ConfigError::ValidationError(
                    "duplicate support template".to_string(),
                ));
            }
        }
        for p in config.passives {
            check_mods(&p.name, &p.buff_mods)?;
            if templates.passives.insert(p.name.clone(), p).is_some() {
                return Err(ConfigError::ValidationError(
                    "duplicate passive template".to_string(),
                ));
            }
        }
        Ok(templates)
    }
}

fn check_mods(name: &str, mods: &[Modifier]) -> Result<(), ConfigError> {
    for m in mods {
        if !m.kind.accepts_scope(m.mod_type) {
            return Err(ConfigError::ValidationError(format!(
                "template '{}' restricts {:?} to unsupported scope '{}'",
                name, m.kind, m.mod_type
            )));
        }
    }
    Ok(())
}

pub fn load_templates(path: &Path) -> Result<SkillTemplates, ConfigError> {
    let config: TemplatesConfig = super::load_toml(path)?;
    config.try_into()
}

pub fn parse_templates(content: &str) -> Result<SkillTemplates, ConfigError> {
    let config: TemplatesConfig = super::parse_toml(content)?;
    config.try_into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use affix_core::{ModKind, ModTarget, ModType};

    const TOML: &str = r#"
[[supports]]
name = "Quick Cast"
level_scaling = 0.1

[[supports.mods]]
type = "CspdPct"
value = 0.2

[[passives]]
name = "Precise: Cruelty"

[[passives.buff_mods]]
type = "DmgPct"
value = 0.18
mod_type = "attack"
addn = true

[[passives.buff_mods]]
type = "AuraEffPct"
value = 0.01
addn = true
per = { stackable = "cruelty_buff", limit = 40 }
target = "own_skill_only"
unscalable = true
"#;

    #[test]
    fn test_parse_templates() {
        let templates = parse_templates(TOML).unwrap();

        let qc = &templates.supports["Quick Cast"];
        let mods = qc.mods_at_level(11);
        assert_eq!(mods[0].kind, ModKind::CspdPct);
        assert!((mods[0].value - 0.4).abs() < 1e-12);
        assert!((qc.mods_at_level(1)[0].value - 0.2).abs() < 1e-12);

        let cruelty = &templates.passives["Precise: Cruelty"];
        assert_eq!(cruelty.buff_mods[0].mod_type, ModType::Attack);
        let aura = &cruelty.buff_mods[1];
        assert_eq!(aura.target, ModTarget::OwnSkillOnly);
        assert!(aura.unscalable);
        assert_eq!(aura.per.as_ref().unwrap().limit, 40);
    }

    #[test]
    fn test_bad_scope_rejected() {
        let bad = r#"
[[supports]]
name = "Broken"

[[supports.mods]]
type = "AspdPct"
value = 0.2
mod_type = "cold"
"#;
        assert!(matches!(
            parse_templates(bad),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
