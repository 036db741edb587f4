//! Static game data loaded from TOML

mod constants;
mod skills;
mod templates;

pub use constants::{
    AttackConstants, CritConstants, GameConstants, ResistanceConstants, SpellBurstConstants,
    StatConstants,
};
pub use skills::{
    load_skill_configs, parse_skill_configs, Delivery, PersistentDamage, SkillConfiguration,
    SkillTag, SkillsConfig,
};
pub use templates::{
    load_templates, parse_templates, PassiveTemplate, SkillTemplates, SupportTemplate,
    TemplatesConfig,
};

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

const BUNDLED_CONSTANTS: &str = include_str!("../../config/constants.toml");
const BUNDLED_SKILLS: &str = include_str!("../../config/skills.toml");
const BUNDLED_TEMPLATES: &str = include_str!("../../config/templates.toml");

/// Read-only tables every evaluation consults
#[derive(Debug, Clone, Default)]
pub struct GameData {
    pub constants: GameConstants,
    pub skills: HashMap<String, SkillConfiguration>,
    pub templates: SkillTemplates,
}

impl GameData {
    /// Data compiled into the crate
    pub fn bundled() -> Result<Self, ConfigError> {
        let constants: GameConstants = parse_toml(BUNDLED_CONSTANTS)?;
        constants.validate()?;
        Ok(GameData {
            constants,
            skills: parse_skill_configs(BUNDLED_SKILLS)?,
            templates: parse_templates(BUNDLED_TEMPLATES)?,
        })
    }

    /// Load `constants.toml`, `skills.toml` and `templates.toml` from a directory.
    /// A missing constants file falls back to defaults.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let constants_path = dir.join("constants.toml");
        let constants = if constants_path.exists() {
            GameConstants::load_from_path(&constants_path)?
        } else {
            debug!(dir = %dir.display(), "no constants.toml, using defaults");
            GameConstants::default()
        };

        Ok(GameData {
            constants,
            skills: load_skill_configs(&dir.join("skills.toml"))?,
            templates: load_templates(&dir.join("templates.toml"))?,
        })
    }

    pub fn skill(&self, name: &str) -> Option<&SkillConfiguration> {
        self.skills.get(name)
    }

    pub fn support(&self, name: &str) -> Option<&SupportTemplate> {
        self.templates.supports.get(name)
    }

    pub fn passive(&self, name: &str) -> Option<&PassiveTemplate> {
        self.templates.passives.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_data_loads() {
        let data = GameData::bundled().unwrap();
        assert_eq!(data.constants, GameConstants::default());
        for name in ["Frost Spike", "Chain Lightning", "Mind Control", "[Test] Simple Attack"] {
            assert!(data.skill(name).is_some(), "missing {name}");
        }
        assert!(data.passive("Precise: Cruelty").is_some());
        assert!(data.support("Quick Cast").is_some());
    }

    fn write(dir: &Path, name: &str, content: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "skills.toml",
            r#"
[[skills]]
name = "Custom Bolt"
tags = ["spell", "fire"]
added_dmg_eff_pct = 1.0
base_damage = 10.0
"#,
        );
        write(dir.path(), "templates.toml", "");

        let data = GameData::load_from_dir(dir.path()).unwrap();
        assert_eq!(data.skills.len(), 1);
        assert_eq!(data.constants.resistances.base_max, 60.0);

        write(dir.path(), "constants.toml", "[resistances]\nbase_max = 70.0\n");
        let data = GameData::load_from_dir(dir.path()).unwrap();
        assert_eq!(data.constants.resistances.base_max, 70.0);
    }

    #[test]
    fn test_load_from_dir_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            GameData::load_from_dir(dir.path()),
            Err(ConfigError::IoError(_))
        ));

        write(dir.path(), "skills.toml", "[[skills]\nname = ");
        write(dir.path(), "templates.toml", "");
        assert!(matches!(
            GameData::load_from_dir(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
