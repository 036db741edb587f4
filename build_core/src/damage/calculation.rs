//! Damage calculation - turning a loadout into per-skill expected DPS
//!
//! Every branch is an average rate, never a sampled outcome:
//! - hit: base * damage multiplier * stat multiplier * crit factor * hits per second
//! - spell burst: burst hit * max charges * releases per second
//! - ingenuity overload: a share of spell burst DPS
//! - persistent: base DoT DPS * damage and DoT multipliers * stat multiplier
//! - reap: persistent DPS * reaped seconds / effective cooldown, per reap source

use super::*;
use crate::config::{Delivery, GameConstants, GameData, SkillConfiguration};
use crate::defense::calculate_resistances;
use crate::loadout::Loadout;
use crate::source::BuildModifiers;
use crate::stat_block::{Aggregator, Resolved};
use crate::types::Configuration;
use affix_core::{GearSlot, ModKey, ModKind, ModType, StatType, WeaponBase};
use tracing::debug;

/// Evaluate every enabled active skill and the build's resistances.
///
/// Skills without a configuration are omitted.
pub fn calculate_offense(
    loadout: &Loadout,
    config: &Configuration,
    data: &GameData,
) -> OffenseResult {
    let build = BuildModifiers::collect(loadout, config, data);
    let defenses = calculate_resistances(
        &Aggregator::new(build.mods(), config),
        &data.constants.resistances,
    );
    let weapon = loadout.gear_in(GearSlot::MainHand).and_then(|g| g.weapon);

    let mut skills = BTreeMap::new();
    for skill in loadout.enabled_active_skills() {
        let Some(conf) = data.skill(&skill.name) else {
            debug!(skill = %skill.name, "no configuration for skill, omitting");
            continue;
        };
        let mods = build.for_skill(skill, data);
        let agg = Aggregator::new(&mods, config);
        let summary = calculate_skill(conf, &agg, weapon.as_ref(), &data.constants);
        debug!(skill = %skill.name, total_dps = summary.total_dps, "evaluated skill");
        skills.insert(skill.name.clone(), summary);
    }

    OffenseResult { skills, defenses }
}

/// All DPS branches of one skill over its modifier set
pub fn calculate_skill(
    conf: &SkillConfiguration,
    agg: &Aggregator<'_>,
    weapon: Option<&WeaponBase>,
    constants: &GameConstants,
) -> DpsSummary {
    let scopes = conf.scopes();
    let dmg_mult = agg.resolve_in(ModKey::DmgPct, &scopes).multiplier();
    let stat_mult = stat_multiplier(agg, &conf.stats, constants.stats.damage_per_point);

    let mut summary = DpsSummary::default();

    if let Some(delivery) = conf.delivery() {
        let hit = calculate_hit(conf, delivery, agg, &scopes, weapon, constants, dmg_mult * stat_mult);
        match delivery {
            Delivery::Attack => summary.attack_dps_summary = hit,
            Delivery::Spell => {
                summary.spell_dps_summary = hit;
                summary.spell_burst_dps_summary =
                    hit.and_then(|h| calculate_spell_burst(&h, agg, constants));
            }
        }
    }

    if let Some(persistent) = &conf.persistent {
        let dot_mult = agg.resolve_in(ModKey::DotDmgPct, &scopes).multiplier();
        let duration_mult = agg.resolve(ModKey::SkillDurationPct, ModType::Global).multiplier();
        let p = PersistentSummary {
            total: persistent.base_dps * dmg_mult * dot_mult * stat_mult,
            duration: persistent.duration * duration_mult,
        };
        summary.total_reap_dps_summary = calculate_reap(&p, agg);
        summary.persistent_dps_summary = Some(p);
    }

    summary.total_dps = summary.branch_total();
    summary
}

/// `1 + per_point * total main stats`; each stat is its flat sum times its percentage multiplier
pub fn stat_multiplier(agg: &Aggregator<'_>, stats: &[StatType], per_point: f64) -> f64 {
    let total: f64 = stats
        .iter()
        .map(|&s| {
            let flat = agg.sum(ModKey::Stat(s), &[]);
            flat * agg.resolve(ModKey::StatPct(s), ModType::Global).multiplier()
        })
        .sum();
    1.0 + per_point * total
}

/// Chance in `[0, 1]` from a rating
pub fn crit_chance(base_rating: f64, rating_mult: f64, rating_per_full_chance: f64) -> f64 {
    (base_rating * rating_mult / rating_per_full_chance).clamp(0.0, 1.0)
}

/// Critical damage multiplier: additive bonuses join the base, more layers multiply
pub fn crit_damage(base: f64, resolved: Resolved) -> f64 {
    (base + resolved.additive) * resolved.more
}

/// Average damage multiplier from critical strikes
pub fn crit_factor(chance: f64, crit_dmg: f64) -> f64 {
    1.0 + chance * (crit_dmg - 1.0)
}

fn calculate_hit(
    conf: &SkillConfiguration,
    delivery: Delivery,
    agg: &Aggregator<'_>,
    scopes: &[ModType],
    weapon: Option<&WeaponBase>,
    constants: &GameConstants,
    multiplier: f64,
) -> Option<HitDpsSummary> {
    let (delivery_scope, own_base, base_rating, base_speed) = match delivery {
        Delivery::Attack => (
            ModType::Attack,
            weapon.map_or(0.0, |w| w.average_damage() * conf.weapon_dmg_pct),
            weapon.map_or(constants.crit.unarmed_rating, |w| w.crit_rating),
            weapon.map_or(constants.attack.unarmed_speed, |w| w.attack_speed),
        ),
        Delivery::Spell => (
            ModType::Spell,
            conf.base_damage?,
            constants.crit.spell_rating,
            1.0 / conf.cast_time,
        ),
    };

    let flat = agg.sum(ModKey::FlatDmg, &[delivery_scope]);
    let base_damage = own_base + flat * conf.added_dmg_eff_pct;
    if base_damage <= 0.0 {
        return None;
    }

    let avg_hit = base_damage * multiplier;
    let chance = crit_chance(
        conf.base_crit_rating.unwrap_or(base_rating),
        agg.resolve_in(ModKey::CritRatingPct, scopes).multiplier(),
        constants.crit.rating_per_full_chance,
    );
    let crit_dmg_mult = crit_damage(
        constants.crit.base_damage,
        agg.resolve_in(ModKey::CritDmgPct, scopes),
    );
    let avg_hit_with_crit = avg_hit * crit_factor(chance, crit_dmg_mult);

    let speed_key = match delivery {
        Delivery::Attack => ModKey::AspdPct,
        Delivery::Spell => ModKey::CspdPct,
    };
    let hits_per_sec = base_speed * agg.resolve(speed_key, ModType::Global).multiplier();

    Some(HitDpsSummary {
        base_damage,
        avg_hit,
        crit_chance: chance,
        crit_dmg_mult,
        avg_hit_with_crit,
        hits_per_sec,
        avg_dps: avg_hit_with_crit * hits_per_sec,
    })
}

/// Charges build at the boosted base rate; a full bar releases every charge at once
/// but no more often than the skill is cast
fn calculate_spell_burst(
    hit: &HitDpsSummary,
    agg: &Aggregator<'_>,
    constants: &GameConstants,
) -> Option<SpellBurstSummary> {
    let max_charges = agg.sum(ModKey::MaxSpellBurst, &[]).floor();
    if max_charges < 1.0 {
        return None;
    }

    let charges_per_sec = constants.spell_burst.base_charge_rate
        * agg
            .resolve(ModKey::SpellBurstChargeSpeedPct, ModType::Global)
            .multiplier();
    let releases_per_sec = (charges_per_sec / max_charges).min(hit.hits_per_sec);
    let burst_dmg_mult = agg
        .resolve(ModKey::SpellBurstDmgPct, ModType::Global)
        .multiplier();
    let avg_dps = hit.avg_hit_with_crit * burst_dmg_mult * max_charges * releases_per_sec;

    let overload_pct = agg.sum(ModKey::IngenuityOverloadPct, &[]);
    let ingenuity_overload = (overload_pct > 0.0).then(|| IngenuityOverloadSummary {
        pct: overload_pct,
        avg_dps: avg_dps * overload_pct,
    });

    Some(SpellBurstSummary {
        max_charges,
        charges_per_sec,
        releases_per_sec,
        burst_dmg_mult,
        avg_dps,
        ingenuity_overload,
    })
}

/// Each reap source deals its reaped seconds of DoT damage once per effective cooldown.
/// Reaped seconds cannot exceed the DoT's duration.
fn calculate_reap(persistent: &PersistentSummary, agg: &Aggregator<'_>) -> Option<ReapSummary> {
    let sources: Vec<_> = agg
        .matching(ModKey::Reap, &[])
        .filter_map(|m| match m.kind {
            ModKind::Reap { cooldown } => Some((agg.effective_value(m), cooldown)),
            _ => None,
        })
        .collect();
    if sources.is_empty() {
        return None;
    }

    let cdr_bonus = agg.resolve(ModKey::ReapCdrPct, ModType::Global).increase();
    let duration_bonus = agg.resolve(ModKey::ReapDurationPct, ModType::Global).increase();
    let recovery_speed = (1.0 + cdr_bonus).max(0.0);

    let total_reap_dps = sources
        .iter()
        .filter(|(_, cooldown)| *cooldown > 0.0)
        .map(|&(secs, cooldown)| {
            let reaped = (secs * (1.0 + duration_bonus)).clamp(0.0, persistent.duration);
            persistent.total * reaped * recovery_speed / cooldown
        })
        .sum();

    Some(ReapSummary {
        total_reap_dps,
        reap_cdr_bonus_pct: cdr_bonus * 100.0,
        reap_duration_bonus_pct: duration_bonus * 100.0,
    })
}
