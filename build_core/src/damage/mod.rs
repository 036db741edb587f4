//! Damage system - Per-skill DPS summaries

mod calculation;

pub use calculation::{
    calculate_offense, calculate_skill, crit_chance, crit_damage, crit_factor, stat_multiplier,
};

use crate::defense::ResistanceSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Average damage of a skill's primary hits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitDpsSummary {
    /// Hit damage before modifiers, including flat added damage
    pub base_damage: f64,
    /// Non-critical hit after modifiers
    pub avg_hit: f64,
    pub crit_chance: f64,
    pub crit_dmg_mult: f64,
    /// Hit averaged over critical and non-critical outcomes
    pub avg_hit_with_crit: f64,
    /// Attacks or casts per second
    pub hits_per_sec: f64,
    pub avg_dps: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngenuityOverloadSummary {
    /// Share of spell burst damage dealt again
    pub pct: f64,
    pub avg_dps: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellBurstSummary {
    pub max_charges: f64,
    pub charges_per_sec: f64,
    pub releases_per_sec: f64,
    pub burst_dmg_mult: f64,
    pub avg_dps: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingenuity_overload: Option<IngenuityOverloadSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentSummary {
    pub total: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReapSummary {
    pub total_reap_dps: f64,
    pub reap_cdr_bonus_pct: f64,
    pub reap_duration_bonus_pct: f64,
}

/// Independent expected-value DPS streams of one skill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DpsSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_dps_summary: Option<HitDpsSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spell_dps_summary: Option<HitDpsSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spell_burst_dps_summary: Option<SpellBurstSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistent_dps_summary: Option<PersistentSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_reap_dps_summary: Option<ReapSummary>,
    pub total_dps: f64,
}

impl DpsSummary {
    /// Sum of every populated branch. Ingenuity overload counts as its own term.
    pub fn branch_total(&self) -> f64 {
        let hits = self.attack_dps_summary.map_or(0.0, |s| s.avg_dps)
            + self.spell_dps_summary.map_or(0.0, |s| s.avg_dps);
        let burst = self.spell_burst_dps_summary.map_or(0.0, |b| {
            b.avg_dps + b.ingenuity_overload.map_or(0.0, |o| o.avg_dps)
        });
        let persistent = self.persistent_dps_summary.map_or(0.0, |p| p.total);
        let reap = self.total_reap_dps_summary.map_or(0.0, |r| r.total_reap_dps);
        hits + burst + persistent + reap
    }
}

/// Result of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffenseResult {
    pub skills: BTreeMap<String, DpsSummary>,
    pub defenses: ResistanceSnapshot,
}
