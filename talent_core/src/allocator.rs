use crate::tree::{Position, TalentTreeData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points that must be spent in earlier columns per column index
pub const POINTS_PER_COLUMN: u32 = 3;

/// One entry of the saved allocation list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatedNode {
    pub x: u32,
    pub y: u32,
    pub points: u32,
}

/// Sparse point allocation for one tree. Absent positions hold zero points.
///
/// Legality of a move is always derived from the current map and the tree
/// layout; nothing about unlock or prerequisite state is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<AllocatedNode>", into = "Vec<AllocatedNode>")]
pub struct Allocation {
    points: BTreeMap<Position, u32>,
}

impl From<Vec<AllocatedNode>> for Allocation {
    fn from(nodes: Vec<AllocatedNode>) -> Self {
        let mut alloc = Allocation::new();
        for n in nodes {
            alloc.set(Position::new(n.x, n.y), n.points);
        }
        alloc
    }
}

impl From<Allocation> for Vec<AllocatedNode> {
    fn from(alloc: Allocation) -> Self {
        alloc.iter().collect()
    }
}

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points_at(&self, pos: Position) -> u32 {
        self.points.get(&pos).copied().unwrap_or(0)
    }

    /// Store `points` at `pos`, dropping the entry at zero
    pub fn set(&mut self, pos: Position, points: u32) {
        if points == 0 {
            self.points.remove(&pos);
        } else {
            self.points.insert(pos, points);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = AllocatedNode> + '_ {
        self.points.iter().map(|(pos, &points)| AllocatedNode {
            x: pos.x,
            y: pos.y,
            points,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_points(&self) -> u32 {
        saturating_sum(self.points.values().copied())
    }

    pub fn column_points(&self, x: u32) -> u32 {
        saturating_sum(
            self.points
                .iter()
                .filter(|(pos, _)| pos.x == x)
                .map(|(_, &p)| p),
        )
    }

    pub fn points_before_column(&self, x: u32) -> u32 {
        saturating_sum(
            self.points
                .iter()
                .filter(|(pos, _)| pos.x < x)
                .map(|(_, &p)| p),
        )
    }

    /// Column `x` needs `POINTS_PER_COLUMN * x` points in earlier columns
    pub fn is_column_unlocked(&self, x: u32) -> bool {
        self.points_before_column(x) >= POINTS_PER_COLUMN.saturating_mul(x)
    }

    /// No prerequisite, or the prerequisite node holds its full points
    pub fn is_prerequisite_satisfied(&self, tree: &TalentTreeData, prerequisite: Option<Position>) -> bool {
        let Some(pre) = prerequisite else {
            return true;
        };
        match tree.node_at(pre) {
            Some(node) => self.points_at(pre) >= node.max_points,
            None => false,
        }
    }

    pub fn can_allocate(&self, tree: &TalentTreeData, pos: Position) -> bool {
        let Some(node) = tree.node_at(pos) else {
            return false;
        };
        self.is_column_unlocked(pos.x)
            && self.is_prerequisite_satisfied(tree, node.prerequisite)
            && self.points_at(pos) < node.max_points
    }

    /// A fully allocated node cannot drop a point while a dependent holds any
    pub fn can_deallocate(&self, tree: &TalentTreeData, pos: Position) -> bool {
        let Some(node) = tree.node_at(pos) else {
            return false;
        };
        let current = self.points_at(pos);
        if current == 0 {
            return false;
        }
        let dependent_allocated = tree
            .dependents_of(pos)
            .any(|d| self.points_at(d.position) > 0);
        !(dependent_allocated && current >= node.max_points)
    }

    /// Add one point if legal. Returns whether the map changed.
    pub fn allocate(&mut self, tree: &TalentTreeData, pos: Position) -> bool {
        if !self.can_allocate(tree, pos) {
            return false;
        }
        self.set(pos, self.points_at(pos) + 1);
        true
    }

    /// Remove one point if legal. Returns whether the map changed.
    pub fn deallocate(&mut self, tree: &TalentTreeData, pos: Position) -> bool {
        if !self.can_deallocate(tree, pos) {
            return false;
        }
        self.set(pos, self.points_at(pos) - 1);
        true
    }
}

fn saturating_sum(points: impl Iterator<Item = u32>) -> u32 {
    points.fold(0, u32::saturating_add)
}
