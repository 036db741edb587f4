use crate::modifier::Modifier;
use crate::parser::parse_affix_lines;
use serde::{Deserialize, Serialize};

/// Rarity of a prism or of one of its gauge affixes
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
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PrismRarity {
    Rare,
    Legendary,
}

/// Rare gauge affixes any prism may carry
pub const MAX_RARE_GAUGE_AFFIXES: usize = 2;

/// An affix rolled on the prism gauge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeAffix {
    pub rarity: PrismRarity,
    pub affix: String,
}

/// A crafted ethereal prism placed on the talent page.
///
/// Rare prisms carry a base affix that adds an effect, legendary prisms one that
/// replaces an effect. Either way the base affix lines count as gained modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prism {
    #[serde(default)]
    pub name: String,
    pub rarity: PrismRarity,
    #[serde(default)]
    pub base_affix: String,
    #[serde(default)]
    pub gauge_affixes: Vec<GaugeAffix>,
}

impl Prism {
    pub fn new(rarity: PrismRarity, base_affix: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            rarity,
            base_affix: base_affix.into(),
            gauge_affixes: Vec::new(),
        }
    }

    pub fn with_gauge(mut self, rarity: PrismRarity, affix: impl Into<String>) -> Self {
        self.gauge_affixes.push(GaugeAffix {
            rarity,
            affix: affix.into(),
        });
        self
    }

    /// Leading word every base affix of this rarity starts with
    pub fn base_affix_prefix(&self) -> &'static str {
        match self.rarity {
            PrismRarity::Rare => "adds",
            PrismRarity::Legendary => "replaces",
        }
    }

    /// An empty base affix is allowed; otherwise it must match the prism's rarity
    pub fn has_valid_base_affix(&self) -> bool {
        let base = self.base_affix.trim();
        base.is_empty()
            || base
                .split_whitespace()
                .next()
                .is_some_and(|w| w.eq_ignore_ascii_case(self.base_affix_prefix()))
    }

    /// Gauge slots of `rarity`; only a legendary prism has a legendary slot
    pub fn max_gauge_affixes(&self, rarity: PrismRarity) -> usize {
        match (rarity, self.rarity) {
            (PrismRarity::Rare, _) => MAX_RARE_GAUGE_AFFIXES,
            (PrismRarity::Legendary, PrismRarity::Legendary) => 1,
            (PrismRarity::Legendary, PrismRarity::Rare) => 0,
        }
    }

    pub fn gauge_count(&self, rarity: PrismRarity) -> usize {
        self.gauge_affixes
            .iter()
            .filter(|g| g.rarity == rarity)
            .count()
    }

    /// Base affix and gauge affix modifiers
    pub fn modifiers(&self) -> Vec<Modifier> {
        std::iter::once(self.base_affix.as_str())
            .chain(self.gauge_affixes.iter().map(|g| g.affix.as_str()))
            .flat_map(|text| parse_affix_lines(text).modifiers)
            .collect()
    }
}
