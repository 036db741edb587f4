//! Game constants configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ConfigError;

/// Tunable game constants. Every section and field falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub resistances: ResistanceConstants,
    #[serde(default)]
    pub crit: CritConstants,
    #[serde(default)]
    pub attack: AttackConstants,
    #[serde(default)]
    pub stats: StatConstants,
    #[serde(default)]
    pub spell_burst: SpellBurstConstants,
}

impl GameConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let constants: GameConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crit.rating_per_full_chance <= 0.0 {
            return Err(ConfigError::ValidationError(
                "crit.rating_per_full_chance must be positive".to_string(),
            ));
        }
        if self.spell_burst.base_charge_rate < 0.0 {
            return Err(ConfigError::ValidationError(
                "spell_burst.base_charge_rate must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistanceConstants {
    /// Resistance cap before max-resistance modifiers, in percent
    #[serde(default = "default_base_max")]
    pub base_max: f64,
}

impl Default for ResistanceConstants {
    fn default() -> Self {
        ResistanceConstants {
            base_max: default_base_max(),
        }
    }
}

fn default_base_max() -> f64 {
    60.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritConstants {
    /// Damage multiplier of a critical strike before modifiers
    #[serde(default = "default_base_crit_damage")]
    pub base_damage: f64,
    /// Rating that equals a 100% critical strike chance
    #[serde(default = "default_rating_per_full_chance")]
    pub rating_per_full_chance: f64,
    /// Base rating of spells that declare none
    #[serde(default = "default_base_rating")]
    pub spell_rating: f64,
    /// Base rating of attacks made without a weapon
    #[serde(default = "default_base_rating")]
    pub unarmed_rating: f64,
}

impl Default for CritConstants {
    fn default() -> Self {
        CritConstants {
            base_damage: default_base_crit_damage(),
            rating_per_full_chance: default_rating_per_full_chance(),
            spell_rating: default_base_rating(),
            unarmed_rating: default_base_rating(),
        }
    }
}

fn default_base_crit_damage() -> f64 {
    1.5
}
fn default_rating_per_full_chance() -> f64 {
    10_000.0
}
fn default_base_rating() -> f64 {
    500.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackConstants {
    /// Attacks per second without a weapon
    #[serde(default = "default_unarmed_speed")]
    pub unarmed_speed: f64,
}

impl Default for AttackConstants {
    fn default() -> Self {
        AttackConstants {
            unarmed_speed: default_unarmed_speed(),
        }
    }
}

fn default_unarmed_speed() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatConstants {
    /// Damage bonus per point of a skill's main stats
    #[serde(default = "default_damage_per_point")]
    pub damage_per_point: f64,
}

impl Default for StatConstants {
    fn default() -> Self {
        StatConstants {
            damage_per_point: default_damage_per_point(),
        }
    }
}

fn default_damage_per_point() -> f64 {
    0.005
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellBurstConstants {
    /// Charges gained per second before charge speed modifiers
    #[serde(default = "default_base_charge_rate")]
    pub base_charge_rate: f64,
}

impl Default for SpellBurstConstants {
    fn default() -> Self {
        SpellBurstConstants {
            base_charge_rate: default_base_charge_rate(),
        }
    }
}

fn default_base_charge_rate() -> f64 {
    0.5
}
