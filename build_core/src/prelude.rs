//! Prelude module for convenient imports
//!
//! ```rust
//! use build_core::prelude::*;
//! ```

// Build snapshot
pub use crate::loadout::{Loadout, SaveData};
pub use crate::types::{ActiveSkill, Configuration, PassiveSkill, SupportSkill};

// Damage
pub use crate::damage::{calculate_offense, DpsSummary, OffenseResult};

// Defense
pub use crate::defense::{Resistance, ResistanceSnapshot};

// Config
pub use crate::config::GameData;

// Sources (for advanced use)
pub use crate::source::{BuildModifiers, ModifierSource};

// Re-exports from affix_core
pub use affix_core::{
    parse_affix, Gear, GearSlot, ModType, Modifier, PactspiritRing, Prism, PrismRarity, ResType,
    StatType,
};
