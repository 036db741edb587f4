use affix_core::{parse_affix_lines, ParsedAffix};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Every talent tree the game ships
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum TreeName {
    #[strum(serialize = "God_of_War")]
    GodOfWar,
    #[strum(serialize = "God_of_Might")]
    GodOfMight,
    #[strum(serialize = "God_of_Machines")]
    GodOfMachines,
    #[strum(serialize = "Goddess_of_Hunting")]
    GoddessOfHunting,
    #[strum(serialize = "Goddess_of_Knowledge")]
    GoddessOfKnowledge,
    #[strum(serialize = "Goddess_of_Deception")]
    GoddessOfDeception,
    Warrior,
    Warlord,
    Onslaughter,
    #[strum(serialize = "The_Brave")]
    TheBrave,
    Marksman,
    Bladerunner,
    Druid,
    Assassin,
    Magister,
    Arcanist,
    Elementalist,
    Prophet,
    Shadowdancer,
    Ranger,
    Sentinel,
    Shadowmaster,
    Psychic,
    Warlock,
    Lich,
    Machinist,
    #[strum(serialize = "Steel_Vanguard")]
    SteelVanguard,
    Alchemist,
    Artisan,
    Ronin,
}

impl TreeName {
    /// The six god and goddess trees that head a talent page
    pub fn is_god_goddess_tree(self) -> bool {
        matches!(
            self,
            TreeName::GodOfWar
                | TreeName::GodOfMight
                | TreeName::GodOfMachines
                | TreeName::GoddessOfHunting
                | TreeName::GoddessOfKnowledge
                | TreeName::GoddessOfDeception
        )
    }

    /// Data file holding this tree's layout
    pub fn file_name(self) -> String {
        format!("{}_tree.json", self.as_ref().to_lowercase())
    }
}

impl Serialize for TreeName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

impl<'de> Deserialize<'de> for TreeName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TreeName::from_str(&s)
            .map_err(|_| serde::de::Error::custom(format!("unknown talent tree '{}'", s)))
    }
}

/// Grid position of a node; `x` is the column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Micro,
    Medium,
    Legendary,
}

/// Static layout of one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentNodeData {
    pub node_type: NodeType,
    pub raw_affix: String,
    pub position: Position,
    pub max_points: u32,
    #[serde(default)]
    pub icon_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<Position>,
}

impl TalentNodeData {
    /// Modifiers granted per allocated point
    pub fn parsed_affix(&self) -> ParsedAffix {
        parse_affix_lines(&self.raw_affix)
    }
}

/// Static layout of a whole tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentTreeData {
    pub name: String,
    pub nodes: Vec<TalentNodeData>,
}

impl TalentTreeData {
    pub fn node_at(&self, pos: Position) -> Option<&TalentNodeData> {
        self.nodes.iter().find(|n| n.position == pos)
    }

    /// Nodes that list `pos` as their prerequisite
    pub fn dependents_of(&self, pos: Position) -> impl Iterator<Item = &TalentNodeData> {
        self.nodes
            .iter()
            .filter(move |n| n.prerequisite == Some(pos))
    }

    pub fn column_count(&self) -> u32 {
        self.nodes.iter().map(|n| n.position.x + 1).max().unwrap_or(0)
    }

    /// Structural checks: unique positions, positive caps, resolvable prerequisites
    pub fn validate(&self) -> Result<(), String> {
        for (i, node) in self.nodes.iter().enumerate() {
            if node.max_points == 0 {
                return Err(format!(
                    "node at ({}, {}) has max_points 0",
                    node.position.x, node.position.y
                ));
            }
            if self.nodes[..i].iter().any(|n| n.position == node.position) {
                return Err(format!(
                    "duplicate node at ({}, {})",
                    node.position.x, node.position.y
                ));
            }
            if let Some(pre) = node.prerequisite {
                if self.node_at(pre).is_none() {
                    return Err(format!(
                        "node at ({}, {}) requires missing node ({}, {})",
                        node.position.x, node.position.y, pre.x, pre.y
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tree_names() {
        assert_eq!(TreeName::iter().count(), 30);
        assert_eq!(TreeName::iter().filter(|t| t.is_god_goddess_tree()).count(), 6);
        assert_eq!(TreeName::GodOfWar.to_string(), "God_of_War");
        assert_eq!(TreeName::from_str("god_of_war").unwrap(), TreeName::GodOfWar);
        assert_eq!(TreeName::SteelVanguard.file_name(), "steel_vanguard_tree.json");
        assert!(!TreeName::Magister.is_god_goddess_tree());
    }

    #[test]
    fn test_tree_name_serde() {
        let json = serde_json::to_string(&TreeName::TheBrave).unwrap();
        assert_eq!(json, "\"The_Brave\"");
        let back: TreeName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TreeName::TheBrave);
        assert!(serde_json::from_str::<TreeName>("\"Nope\"").is_err());
    }

    #[test]
    fn test_node_json_shape() {
        let json = r#"{
            "nodeType": "medium",
            "rawAffix": "+20% additional damage",
            "position": {"x": 1, "y": 2},
            "maxPoints": 3,
            "iconName": "dmg",
            "prerequisite": {"x": 0, "y": 2}
        }"#;
        let node: TalentNodeData = serde_json::from_str(json).unwrap();
        assert_eq!(node.node_type, NodeType::Medium);
        assert_eq!(node.prerequisite, Some(Position::new(0, 2)));
        assert_eq!(node.parsed_affix().modifiers.len(), 1);
    }

    fn node(x: u32, y: u32, max: u32, pre: Option<Position>) -> TalentNodeData {
        TalentNodeData {
            node_type: NodeType::Micro,
            raw_affix: String::new(),
            position: Position::new(x, y),
            max_points: max,
            icon_name: String::new(),
            prerequisite: pre,
        }
    }

    #[test]
    fn test_validate() {
        let mut tree = TalentTreeData {
            name: "t".into(),
            nodes: vec![node(0, 0, 3, None), node(1, 0, 1, Some(Position::new(0, 0)))],
        };
        assert!(tree.validate().is_ok());
        assert_eq!(tree.column_count(), 2);
        assert_eq!(tree.dependents_of(Position::new(0, 0)).count(), 1);

        tree.nodes.push(node(2, 0, 1, Some(Position::new(5, 5))));
        assert!(tree.validate().is_err());

        tree.nodes.pop();
        tree.nodes.push(node(0, 0, 1, None));
        assert!(tree.validate().is_err());
    }
}
