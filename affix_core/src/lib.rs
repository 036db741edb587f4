//! affix_core - Modifier model and affix text parser
//!
//! Affixes are the human-readable effect lines found on gear, talent nodes,
//! skills, prisms and pactspirit rings. This crate turns them into typed [`Modifier`]s:
//!
//! ```rust
//! use affix_core::{parse_affix, ModKind, ModType};
//!
//! let m = parse_affix("+25% additional cold damage").unwrap();
//! assert_eq!(m.kind, ModKind::DmgPct);
//! assert_eq!(m.mod_type, ModType::Cold);
//! assert!(m.addn);
//! ```

pub mod gear;
pub mod modifier;
pub mod pactspirit;
pub mod parser;
pub mod prism;
pub mod types;

pub use gear::{Gear, WeaponBase};
pub use modifier::{ModKey, ModKind, Modifier};
pub use pactspirit::PactspiritRing;
pub use parser::{
    parse_affix, parse_affix_lines, render_modifier, AffixMatcher, AffixParser, ParsedAffix,
};
pub use prism::{GaugeAffix, Prism, PrismRarity, MAX_RARE_GAUGE_AFFIXES};
pub use types::{DmgType, GearSlot, ModTarget, ModType, PerStack, ResType, StatType};
