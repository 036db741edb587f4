//! build_core - Modifier aggregation and DPS calculation for character builds
//!
//! This library provides:
//! - Loadout: a build snapshot resolved from save data and talent tree layouts
//! - BuildModifiers: the modifier pool gathered from gear, talents, prisms, pactspirit rings,
//!   custom affixes and passives
//! - Aggregator: scoped additive/multiplicative resolution over a modifier pool
//! - calculate_offense: per-skill expected DPS plus resistances
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use build_core::prelude::*;
//! use talent_core::{DirTreeFetcher, TalentTreeCache};
//!
//! let data = GameData::bundled()?;
//! let trees = TalentTreeCache::new(DirTreeFetcher::new("trees/"));
//! let save = SaveData::from_json(&std::fs::read_to_string("build.json")?)?;
//! let loadout = Loadout::from_save(&save, &trees)?;
//!
//! let result = calculate_offense(&loadout, &save.configuration_page, &data);
//! for (skill, summary) in &result.skills {
//!     println!("{skill}: {:.0} dps", summary.total_dps);
//! }
//! ```

pub mod config;
pub mod damage;
pub mod defense;
pub mod loadout;
pub mod prelude;
pub mod source;
pub mod stat_block;
pub mod types;

// Core API
pub use damage::{calculate_offense, calculate_skill, DpsSummary, OffenseResult};
pub use loadout::{Loadout, LoadoutError, SaveData};
pub use stat_block::{Aggregator, Resolved};
pub use types::{ActiveSkill, Configuration, PassiveSkill, SupportSkill};

// Configuration
pub use config::{ConfigError, GameConstants, GameData};
pub use defense::ResistanceSnapshot;

// Advanced: custom modifier sources
pub use source::{BuildModifiers, ModifierSource};

// Re-export commonly needed affix_core types
pub use affix_core::{
    Gear, GearSlot, ModType, Modifier, PactspiritRing, Prism, PrismRarity, ResType, StatType,
};
