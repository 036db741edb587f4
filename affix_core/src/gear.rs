use crate::modifier::Modifier;
use crate::parser::{parse_affix_lines, ParsedAffix};
use crate::types::GearSlot;
use serde::{Deserialize, Serialize};

/// Base damage line of a weapon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponBase {
    pub min_damage: f64,
    pub max_damage: f64,
    /// Attacks per second
    pub attack_speed: f64,
    /// Base critical strike rating
    #[serde(default)]
    pub crit_rating: f64,
}

impl WeaponBase {
    pub fn average_damage(&self) -> f64 {
        (self.min_damage + self.max_damage) / 2.0
    }
}

/// An equipped piece of gear, described by its raw affix lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gear {
    pub slot: GearSlot,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<WeaponBase>,
    #[serde(default)]
    pub affixes: Vec<String>,
}

impl Gear {
    pub fn new(slot: GearSlot) -> Self {
        Self {
            slot,
            name: String::new(),
            weapon: None,
            affixes: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_weapon(mut self, weapon: WeaponBase) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_affix(mut self, affix: impl Into<String>) -> Self {
        self.affixes.push(affix.into());
        self
    }

    /// Each affix with the modifiers its lines produced
    pub fn parsed_affixes(&self) -> Vec<ParsedAffix> {
        self.affixes.iter().map(|a| parse_affix_lines(a)).collect()
    }

    /// Every modifier this piece contributes
    pub fn modifiers(&self) -> Vec<Modifier> {
        self.parsed_affixes()
            .into_iter()
            .flat_map(|p| p.modifiers)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::ModKind;

    #[test]
    fn test_gear_modifiers_skip_flavour() {
        let gear = Gear::new(GearSlot::Helmet)
            .with_name("Crown of Frost")
            .with_affix("+20% cold damage")
            .with_affix("Looks pretty")
            .with_affix("+10% cast speed\n+5% aura effect");

        let mods = gear.modifiers();
        assert_eq!(mods.len(), 3);
        assert_eq!(mods[2].kind, ModKind::AuraEffPct);
        assert_eq!(gear.parsed_affixes().len(), 3);
        assert!(!gear.parsed_affixes()[1].has_effect());
    }

    #[test]
    fn test_weapon_average() {
        let w = WeaponBase {
            min_damage: 10.0,
            max_damage: 30.0,
            attack_speed: 1.5,
            crit_rating: 500.0,
        };
        assert_eq!(w.average_damage(), 20.0);
    }

    #[test]
    fn test_gear_json_defaults() {
        let gear: Gear = serde_json::from_str(r#"{"slot": "left_ring"}"#).unwrap();
        assert_eq!(gear.slot, GearSlot::LeftRing);
        assert!(gear.affixes.is_empty());
        assert!(gear.weapon.is_none());
    }
}
