//! Loadout - An immutable build snapshot assembled from save data

use crate::types::{
    ActiveSkill, Configuration, PassiveSkill, SupportSkill, MAX_ACTIVE_SKILLS, MAX_PASSIVE_SKILLS,
    MAX_SUPPORTS,
};
use affix_core::{Gear, GearSlot, PactspiritRing, Prism, PrismRarity};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use talent_core::{
    Allocation, Position, TalentTreeCache, TalentTreeData, TreeFetcher, TreeLoadError, TreeName,
};
use thiserror::Error;
use tracing::warn;

/// Error assembling a loadout
#[derive(Debug, Error)]
pub enum LoadoutError {
    #[error("Failed to load talent tree: {0}")]
    Tree(#[from] TreeLoadError),
    #[error("Failed to parse save data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One talent tree page as saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentPageSave {
    pub tree: TreeName,
    #[serde(default)]
    pub allocated: Allocation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillPageSave {
    #[serde(default)]
    pub active: Vec<ActiveSkill>,
    #[serde(default)]
    pub passive: Vec<PassiveSkill>,
}

/// Saved build as written by the storage layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    #[serde(default)]
    pub equipment_page: Vec<Gear>,
    #[serde(default)]
    pub talent_page: Vec<TalentPageSave>,
    #[serde(default)]
    pub skill_page: SkillPageSave,
    #[serde(default)]
    pub prism_page: Vec<Prism>,
    #[serde(default)]
    pub pactspirit_page: Vec<PactspiritRing>,
    #[serde(default)]
    pub configuration_page: Configuration,
}

impl SaveData {
    pub fn from_json(json: &str) -> Result<Self, LoadoutError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An allocated tree with its layout resolved
#[derive(Debug, Clone)]
pub struct TalentPage {
    pub name: TreeName,
    pub tree: Arc<TalentTreeData>,
    pub allocation: Allocation,
}

/// Build snapshot the calculator reads
#[derive(Debug, Clone, Default)]
pub struct Loadout {
    pub gear: Vec<Gear>,
    pub talents: Vec<TalentPage>,
    pub active_skills: Vec<ActiveSkill>,
    pub passive_skills: Vec<PassiveSkill>,
    pub prisms: Vec<Prism>,
    pub pactspirits: Vec<PactspiritRing>,
}

impl Loadout {
    /// Resolve a save against tree layouts. A tree that cannot be loaded is the only failure;
    /// inconsistent entries are dropped or clamped with a warning.
    ///
    /// A skill name fills at most one active and one passive slot, and a support is
    /// socketed at most once per skill. Later repeats are dropped.
    pub fn from_save<F: TreeFetcher>(
        save: &SaveData,
        trees: &TalentTreeCache<F>,
    ) -> Result<Self, LoadoutError> {
        let mut talents = Vec::with_capacity(save.talent_page.len());
        for page in &save.talent_page {
            let tree = trees.load(page.tree)?;
            let allocation = sanitize_allocation(page.tree, &tree, &page.allocated);
            talents.push(TalentPage {
                name: page.tree,
                tree,
                allocation,
            });
        }

        Ok(Loadout {
            gear: dedup_slots(&save.equipment_page),
            talents,
            active_skills: sanitize_active_skills(&save.skill_page.active),
            passive_skills: sanitize_passive_skills(&save.skill_page.passive),
            prisms: save.prism_page.iter().map(sanitize_prism).collect(),
            pactspirits: save.pactspirit_page.clone(),
        })
    }

    pub fn gear_in(&self, slot: GearSlot) -> Option<&Gear> {
        self.gear.iter().find(|g| g.slot == slot)
    }

    pub fn enabled_active_skills(&self) -> impl Iterator<Item = &ActiveSkill> {
        self.active_skills.iter().filter(|s| s.enabled)
    }

    pub fn enabled_passive_skills(&self) -> impl Iterator<Item = &PassiveSkill> {
        self.passive_skills.iter().filter(|s| s.enabled)
    }
}

fn sanitize_allocation(name: TreeName, tree: &TalentTreeData, saved: &Allocation) -> Allocation {
    let mut allocation = Allocation::new();
    for entry in saved.iter() {
        let pos = Position::new(entry.x, entry.y);
        match tree.node_at(pos) {
            None => warn!(tree = %name, x = pos.x, y = pos.y, "allocated position has no node, dropping"),
            Some(node) if entry.points > node.max_points => {
                warn!(
                    tree = %name,
                    x = pos.x,
                    y = pos.y,
                    points = entry.points,
                    max = node.max_points,
                    "allocation exceeds node max, clamping"
                );
                allocation.set(pos, node.max_points);
            }
            Some(_) => allocation.set(pos, entry.points),
        }
    }
    allocation
}

fn dedup_slots(gear: &[Gear]) -> Vec<Gear> {
    let mut seen = BTreeSet::new();
    gear.iter()
        .filter(|g| {
            let fresh = seen.insert(g.slot);
            if !fresh {
                warn!(slot = ?g.slot, name = %g.name, "slot already filled, ignoring gear");
            }
            fresh
        })
        .cloned()
        .collect()
}

fn cap_slots<T: Clone>(items: &[T], max: usize, what: &str) -> Vec<T> {
    if items.len() > max {
        warn!(count = items.len(), max, "too many {}, ignoring extras", what);
    }
    items.iter().take(max).cloned().collect()
}

/// Keep the first entry per name
fn dedup_names<T>(items: Vec<T>, name: impl Fn(&T) -> &str, what: &str) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(name(item).to_string());
            if !fresh {
                warn!(name = name(item), "{} already selected, ignoring repeat", what);
            }
            fresh
        })
        .collect()
}

fn sanitize_supports(skill: &str, supports: Vec<SupportSkill>) -> Vec<SupportSkill> {
    let mut supports = dedup_names(supports, |s| &s.name, "support");
    if supports.len() > MAX_SUPPORTS {
        warn!(skill, count = supports.len(), "too many supports, ignoring extras");
        supports.truncate(MAX_SUPPORTS);
    }
    supports
}

fn sanitize_active_skills(skills: &[ActiveSkill]) -> Vec<ActiveSkill> {
    let skills = dedup_names(skills.to_vec(), |s| &s.name, "active skill");
    cap_slots(&skills, MAX_ACTIVE_SKILLS, "active skills")
        .into_iter()
        .map(|mut skill| {
            skill.supports = sanitize_supports(&skill.name, std::mem::take(&mut skill.supports));
            skill
        })
        .collect()
}

fn sanitize_passive_skills(skills: &[PassiveSkill]) -> Vec<PassiveSkill> {
    let skills = dedup_names(skills.to_vec(), |s| &s.name, "passive skill");
    cap_slots(&skills, MAX_PASSIVE_SKILLS, "passive skills")
        .into_iter()
        .map(|mut skill| {
            skill.supports = sanitize_supports(&skill.name, std::mem::take(&mut skill.supports));
            skill
        })
        .collect()
}

/// Drop a base affix that does not match the prism's rarity and gauge affixes beyond
/// the prism's slots, keeping the first ones of each rarity
fn sanitize_prism(prism: &Prism) -> Prism {
    let mut prism = prism.clone();
    if !prism.has_valid_base_affix() {
        warn!(
            prism = %prism.name,
            rarity = %prism.rarity,
            expected = prism.base_affix_prefix(),
            "base affix does not match prism rarity, dropping it"
        );
        prism.base_affix.clear();
    }

    for rarity in [PrismRarity::Rare, PrismRarity::Legendary] {
        let max = prism.max_gauge_affixes(rarity);
        let count = prism.gauge_count(rarity);
        if count <= max {
            continue;
        }
        warn!(prism = %prism.name, %rarity, count, max, "too many gauge affixes, ignoring extras");
        let mut kept = 0;
        prism.gauge_affixes.retain(|g| {
            if g.rarity != rarity {
                return true;
            }
            kept += 1;
            kept <= max
        });
    }
    prism
}

#[cfg(test)]
mod tests {
    use super::*;
    use talent_core::{NodeType, TalentNodeData};

    struct StaticFetcher;

    impl TreeFetcher for StaticFetcher {
        fn fetch(&self, name: TreeName) -> Result<TalentTreeData, TreeLoadError> {
            if name == TreeName::Lich {
                return Err(TreeLoadError::Fetch {
                    tree: name,
                    message: "not found".into(),
                });
            }
            Ok(TalentTreeData {
                name: name.to_string(),
                nodes: vec![TalentNodeData {
                    node_type: NodeType::Micro,
                    raw_affix: "+4% damage".into(),
                    position: Position::new(0, 0),
                    max_points: 3,
                    icon_name: String::new(),
                    prerequisite: None,
                }],
            })
        }
    }

    const SAVE: &str = r#"{
        "equipmentPage": [
            {"slot": "helmet", "name": "Cap", "affixes": ["+10% damage"]},
            {"slot": "helmet", "name": "Second Cap", "affixes": ["+99% damage"]}
        ],
        "talentPage": [
            {"tree": "Warlock", "allocated": [
                {"x": 0, "y": 0, "points": 9},
                {"x": 4, "y": 4, "points": 1}
            ]}
        ],
        "skillPage": {
            "active": [
                {"name": "A", "supports": [
                    {"name": "s1"}, {"name": "s2"}, {"name": "s3"},
                    {"name": "s4"}, {"name": "s5"}, {"name": "s6"}
                ]},
                {"name": "B", "enabled": false},
                {"name": "C"}, {"name": "D"}, {"name": "E"}
            ],
            "passive": [{"name": "Precise: Cruelty", "level": 20}]
        },
        "configurationPage": {"stacks": {"cruelty_buff": 12}}
    }"#;

    #[test]
    fn test_from_save_sanitizes() {
        let save = SaveData::from_json(SAVE).unwrap();
        let cache = TalentTreeCache::new(StaticFetcher);
        let loadout = Loadout::from_save(&save, &cache).unwrap();

        assert_eq!(loadout.gear.len(), 1);
        assert_eq!(loadout.gear_in(GearSlot::Helmet).unwrap().name, "Cap");

        let page = &loadout.talents[0];
        assert_eq!(page.name, TreeName::Warlock);
        assert_eq!(page.allocation.points_at(Position::new(0, 0)), 3);
        assert_eq!(page.allocation.total_points(), 3);

        assert_eq!(loadout.active_skills.len(), MAX_ACTIVE_SKILLS);
        assert_eq!(loadout.active_skills[0].supports.len(), MAX_SUPPORTS);
        assert_eq!(loadout.enabled_active_skills().count(), 3);
        assert_eq!(loadout.passive_skills[0].level, 20);
        assert_eq!(save.configuration_page.stacks["cruelty_buff"], 12);
    }

    fn load(save: SaveData) -> Loadout {
        Loadout::from_save(&save, &TalentTreeCache::new(StaticFetcher)).unwrap()
    }

    #[test]
    fn test_repeated_active_skill_keeps_first() {
        let mut save = SaveData::default();
        save.skill_page.active = vec![
            ActiveSkill::new("Chain Lightning")
                .with_support("Quick Cast", 20)
                .with_support("Quick Cast", 1)
                .with_support("Quick Cast", 5),
            ActiveSkill::new("Frost Spike"),
            ActiveSkill::new("Chain Lightning"),
        ];
        let loadout = load(save);

        let names: Vec<_> = loadout.active_skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Chain Lightning", "Frost Spike"]);
        let supports = &loadout.active_skills[0].supports;
        assert_eq!(supports.len(), 1);
        assert_eq!(supports[0].level, 20);
    }

    #[test]
    fn test_repeated_passive_skill_keeps_first() {
        let mut save = SaveData::default();
        let mut first = PassiveSkill::new("Precise: Cruelty")
            .with_support("Aura Amplification", 10)
            .with_support("Aura Amplification", 20);
        first.level = 20;
        save.skill_page.passive = vec![first, PassiveSkill::new("Precise: Cruelty")];
        let loadout = load(save);

        assert_eq!(loadout.passive_skills.len(), 1);
        assert_eq!(loadout.passive_skills[0].level, 20);
        assert_eq!(loadout.passive_skills[0].supports.len(), 1);
        assert_eq!(loadout.passive_skills[0].supports[0].level, 10);
    }

    #[test]
    fn test_repeats_do_not_use_up_slots() {
        let mut save = SaveData::default();
        save.skill_page.active = ["A", "A", "B", "B", "C", "D", "E"]
            .into_iter()
            .map(ActiveSkill::new)
            .collect();
        let loadout = load(save);
        let names: Vec<_> = loadout.active_skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_prism_mismatched_base_is_dropped() {
        let mut save = SaveData::default();
        save.prism_page = vec![
            Prism::new(PrismRarity::Rare, "Replaces core talents in range:\n+5% damage"),
            Prism::new(PrismRarity::Legendary, "Replaces core talents in range:\n+5% damage"),
        ];
        let loadout = load(save);
        assert!(loadout.prisms[0].base_affix.is_empty());
        assert!(loadout.prisms[1].base_affix.starts_with("Replaces"));
    }

    #[test]
    fn test_prism_gauge_caps() {
        let mut save = SaveData::default();
        save.prism_page = vec![
            Prism::new(PrismRarity::Rare, "")
                .with_gauge(PrismRarity::Rare, "+1% damage")
                .with_gauge(PrismRarity::Legendary, "+50% damage")
                .with_gauge(PrismRarity::Rare, "+2% damage")
                .with_gauge(PrismRarity::Rare, "+3% damage"),
            Prism::new(PrismRarity::Legendary, "")
                .with_gauge(PrismRarity::Legendary, "+10% damage")
                .with_gauge(PrismRarity::Legendary, "+20% damage"),
        ];
        let loadout = load(save);

        let rare = &loadout.prisms[0];
        assert_eq!(rare.gauge_count(PrismRarity::Rare), 2);
        assert_eq!(rare.gauge_count(PrismRarity::Legendary), 0);
        let kept: Vec<_> = rare.gauge_affixes.iter().map(|g| g.affix.as_str()).collect();
        assert_eq!(kept, ["+1% damage", "+2% damage"]);

        let legendary = &loadout.prisms[1];
        assert_eq!(legendary.gauge_affixes.len(), 1);
        assert_eq!(legendary.gauge_affixes[0].affix, "+10% damage");
    }

    #[test]
    fn test_prism_and_pactspirit_pages_from_json() {
        let save = SaveData::from_json(
            r#"{
                "prismPage": [{"rarity": "rare", "baseAffix": "Adds x\n+8% attack speed"}],
                "pactspiritPage": [{"name": "Ring of Embers", "affix": "+10% fire damage"}]
            }"#,
        )
        .unwrap();
        let loadout = load(save);
        assert_eq!(loadout.prisms.len(), 1);
        assert_eq!(loadout.pactspirits[0].name, "Ring of Embers");
    }

    #[test]
    fn test_tree_failure_is_fatal() {
        let save = SaveData {
            talent_page: vec![TalentPageSave {
                tree: TreeName::Lich,
                allocated: Allocation::new(),
            }],
            ..SaveData::default()
        };
        let cache = TalentTreeCache::new(StaticFetcher);
        assert!(matches!(
            Loadout::from_save(&save, &cache),
            Err(LoadoutError::Tree(_))
        ));
    }

    #[test]
    fn test_empty_save() {
        let save = SaveData::from_json("{}").unwrap();
        let cache = TalentTreeCache::new(StaticFetcher);
        let loadout = Loadout::from_save(&save, &cache).unwrap();
        assert!(loadout.gear.is_empty());
        assert!(loadout.talents.is_empty());
        assert!(cache.is_empty());
    }
}
