use serde::{Deserialize, Serialize};

/// Category a modifier is restricted to.
///
/// `Global` is the widest scope and is implied when an affix names no narrower category.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModType {
    #[default]
    Global,
    Melee,
    Area,
    Attack,
    Spell,
    Physical,
    Cold,
    Lightning,
    Fire,
    Erosion,
    Elemental,
}

impl ModType {
    /// Whether a modifier with this scope applies when resolving `scope`
    pub fn applies_to(self, scope: ModType) -> bool {
        self == ModType::Global || self == scope
    }

    /// Cold, lightning and fire
    pub fn is_elemental(self) -> bool {
        matches!(self, ModType::Cold | ModType::Lightning | ModType::Fire)
    }
}

/// Damage types that flat damage and skills can carry
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DmgType {
    #[default]
    Physical,
    Cold,
    Lightning,
    Fire,
    Erosion,
}

impl From<DmgType> for ModType {
    fn from(dt: DmgType) -> Self {
        match dt {
            DmgType::Physical => ModType::Physical,
            DmgType::Cold => ModType::Cold,
            DmgType::Lightning => ModType::Lightning,
            DmgType::Fire => ModType::Fire,
            DmgType::Erosion => ModType::Erosion,
        }
    }
}

/// The four resistances a build reports
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
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResType {
    Cold,
    Lightning,
    Fire,
    Erosion,
}

impl ResType {
    pub fn all() -> &'static [ResType] {
        &[ResType::Cold, ResType::Lightning, ResType::Fire, ResType::Erosion]
    }

    /// Scopes whose resistance modifiers raise this resistance.
    /// Elemental resistance covers cold, lightning and fire; erosion stands alone.
    pub fn scopes(self) -> &'static [ModType] {
        match self {
            ResType::Cold => &[ModType::Cold, ModType::Elemental],
            ResType::Lightning => &[ModType::Lightning, ModType::Elemental],
            ResType::Fire => &[ModType::Fire, ModType::Elemental],
            ResType::Erosion => &[ModType::Erosion],
        }
    }
}

/// Primary attributes
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
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum StatType {
    #[strum(serialize = "str", serialize = "strength", to_string = "strength")]
    Str,
    #[strum(serialize = "dex", serialize = "dexterity", to_string = "dexterity")]
    Dex,
    #[strum(serialize = "int", serialize = "intelligence", to_string = "intelligence")]
    Int,
}

/// Who a modifier affects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModTarget {
    /// The whole build
    #[default]
    Build,
    /// Only the skill instance that grants the modifier
    OwnSkillOnly,
}

/// Stacking descriptor: the modifier's magnitude is multiplied by the active
/// stack count of `stackable`, capped at `limit`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerStack {
    pub stackable: String,
    pub limit: u32,
}

/// Equipment slots on the gear page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GearSlot {
    Helmet,
    Chest,
    Neck,
    Gloves,
    Belt,
    Boots,
    LeftRing,
    RightRing,
    MainHand,
    OffHand,
}

impl GearSlot {
    pub fn all() -> &'static [GearSlot] {
        &[
            GearSlot::Helmet,
            GearSlot::Chest,
            GearSlot::Neck,
            GearSlot::Gloves,
            GearSlot::Belt,
            GearSlot::Boots,
            GearSlot::LeftRing,
            GearSlot::RightRing,
            GearSlot::MainHand,
            GearSlot::OffHand,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mod_type_case_insensitive() {
        assert_eq!(ModType::from_str("COLD").unwrap(), ModType::Cold);
        assert_eq!(ModType::from_str("Elemental").unwrap(), ModType::Elemental);
        assert!(ModType::from_str("persistent").is_err());
    }

    #[test]
    fn test_global_applies_everywhere() {
        assert!(ModType::Global.applies_to(ModType::Attack));
        assert!(ModType::Attack.applies_to(ModType::Attack));
        assert!(!ModType::Spell.applies_to(ModType::Attack));
    }

    #[test]
    fn test_stat_aliases() {
        assert_eq!(StatType::from_str("dex").unwrap(), StatType::Dex);
        assert_eq!(StatType::from_str("Intelligence").unwrap(), StatType::Int);
        assert_eq!(StatType::Str.to_string(), "strength");
    }

    #[test]
    fn test_erosion_is_not_elemental() {
        assert!(!ResType::Erosion.scopes().contains(&ModType::Elemental));
        assert!(ResType::Fire.scopes().contains(&ModType::Elemental));
    }
}
