use crate::types::*;
use serde::{Deserialize, Serialize};

/// The closed set of modifier kinds.
///
/// Serialized with a `type` tag so modifiers read naturally in JSON and TOML:
/// `{ type = "DmgPct", value = 0.5, mod_type = "cold" }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ModKind {
    DmgPct,
    DotDmgPct,
    CritRatingPct,
    CritDmgPct,
    AspdPct,
    CspdPct,
    AuraEffPct,
    SkillDurationPct,
    ResPct,
    MaxResPct,
    Stat { stat: StatType },
    StatPct { stat: StatType },
    FlatDmg { dmg_type: DmgType, min: f64, max: f64 },
    MaxSpellBurst,
    SpellBurstChargeSpeedPct,
    SpellBurstDmgPct,
    IngenuityOverloadPct,
    /// `value` is the reaped duration in seconds
    Reap { cooldown: f64 },
    ReapCdrPct,
    ReapDurationPct,
}

/// Hashable identity of a [`ModKind`], used to select modifiers during aggregation.
///
/// Payload-free except where the payload changes which stat is modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModKey {
    DmgPct,
    DotDmgPct,
    CritRatingPct,
    CritDmgPct,
    AspdPct,
    CspdPct,
    AuraEffPct,
    SkillDurationPct,
    ResPct,
    MaxResPct,
    Stat(StatType),
    StatPct(StatType),
    FlatDmg,
    MaxSpellBurst,
    SpellBurstChargeSpeedPct,
    SpellBurstDmgPct,
    IngenuityOverloadPct,
    Reap,
    ReapCdrPct,
    ReapDurationPct,
}

const ANY_SCOPE: &[ModType] = &[
    ModType::Global,
    ModType::Melee,
    ModType::Area,
    ModType::Attack,
    ModType::Spell,
    ModType::Physical,
    ModType::Cold,
    ModType::Lightning,
    ModType::Fire,
    ModType::Erosion,
    ModType::Elemental,
];
const CRIT_SCOPES: &[ModType] = &[ModType::Global, ModType::Attack, ModType::Spell];
const RES_SCOPES: &[ModType] = &[
    ModType::Global,
    ModType::Cold,
    ModType::Lightning,
    ModType::Fire,
    ModType::Erosion,
    ModType::Elemental,
];
const GLOBAL_ONLY: &[ModType] = &[ModType::Global];

impl ModKind {
    pub fn key(&self) -> ModKey {
        match *self {
            ModKind::DmgPct => ModKey::DmgPct,
            ModKind::DotDmgPct => ModKey::DotDmgPct,
            ModKind::CritRatingPct => ModKey::CritRatingPct,
            ModKind::CritDmgPct => ModKey::CritDmgPct,
            ModKind::AspdPct => ModKey::AspdPct,
            ModKind::CspdPct => ModKey::CspdPct,
            ModKind::AuraEffPct => ModKey::AuraEffPct,
            ModKind::SkillDurationPct => ModKey::SkillDurationPct,
            ModKind::ResPct => ModKey::ResPct,
            ModKind::MaxResPct => ModKey::MaxResPct,
            ModKind::Stat { stat } => ModKey::Stat(stat),
            ModKind::StatPct { stat } => ModKey::StatPct(stat),
            ModKind::FlatDmg { .. } => ModKey::FlatDmg,
            ModKind::MaxSpellBurst => ModKey::MaxSpellBurst,
            ModKind::SpellBurstChargeSpeedPct => ModKey::SpellBurstChargeSpeedPct,
            ModKind::SpellBurstDmgPct => ModKey::SpellBurstDmgPct,
            ModKind::IngenuityOverloadPct => ModKey::IngenuityOverloadPct,
            ModKind::Reap { .. } => ModKey::Reap,
            ModKind::ReapCdrPct => ModKey::ReapCdrPct,
            ModKind::ReapDurationPct => ModKey::ReapDurationPct,
        }
    }

    /// Scopes this kind may be restricted to
    pub fn accepted_scopes(&self) -> &'static [ModType] {
        match self {
            ModKind::DmgPct | ModKind::DotDmgPct => ANY_SCOPE,
            ModKind::CritRatingPct | ModKind::CritDmgPct => CRIT_SCOPES,
            ModKind::ResPct | ModKind::MaxResPct => RES_SCOPES,
            ModKind::FlatDmg { .. } => CRIT_SCOPES,
            _ => GLOBAL_ONLY,
        }
    }

    pub fn accepts_scope(&self, scope: ModType) -> bool {
        self.accepted_scopes().contains(&scope)
    }
}

/// A typed, scoped numeric effect contributing to a build's stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    #[serde(flatten)]
    pub kind: ModKind,
    /// Signed fraction for percentage kinds (`9%` is `0.09`), raw magnitude otherwise
    pub value: f64,
    #[serde(default)]
    pub mod_type: ModType,
    /// Summed into one additive bucket when set, an independent multiplier when not
    #[serde(default)]
    pub addn: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per: Option<PerStack>,
    #[serde(default)]
    pub target: ModTarget,
    /// Exempt from aura-effect scaling
    #[serde(default)]
    pub unscalable: bool,
}

impl Modifier {
    pub fn new(kind: ModKind, value: f64) -> Self {
        Self {
            kind,
            value,
            mod_type: ModType::Global,
            addn: false,
            per: None,
            target: ModTarget::Build,
            unscalable: false,
        }
    }

    /// Flat damage whose value is the average of the range
    pub fn flat_damage(dmg_type: DmgType, min: f64, max: f64) -> Self {
        Self::new(ModKind::FlatDmg { dmg_type, min, max }, (min + max) / 2.0).additional()
    }

    pub fn scoped(mut self, mod_type: ModType) -> Self {
        self.mod_type = mod_type;
        self
    }

    pub fn additional(mut self) -> Self {
        self.addn = true;
        self
    }

    pub fn per_stack(mut self, stackable: impl Into<String>, limit: u32) -> Self {
        self.per = Some(PerStack {
            stackable: stackable.into(),
            limit,
        });
        self
    }

    pub fn own_skill_only(mut self) -> Self {
        self.target = ModTarget::OwnSkillOnly;
        self
    }

    pub fn unscalable(mut self) -> Self {
        self.unscalable = true;
        self
    }

    pub fn key(&self) -> ModKey {
        self.kind.key()
    }

    /// Copy with the magnitude multiplied by `factor`.
    /// Flat damage ranges scale together with the value.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut m = self.clone();
        m.value *= factor;
        if let ModKind::FlatDmg { min, max, .. } = &mut m.kind {
            *min *= factor;
            *max *= factor;
        }
        m
    }

    /// Magnitude after applying `stacks` of its stacking buff, if any
    pub fn stacked_value(&self, stacks: u32) -> f64 {
        match &self.per {
            Some(per) => self.value * f64::from(stacks.min(per.limit)),
            None => self.value,
        }
    }

    pub fn is_build_wide(&self) -> bool {
        self.target == ModTarget::Build
    }
}
