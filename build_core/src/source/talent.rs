//! TalentSource - Modifiers from allocated talent nodes

use crate::loadout::TalentPage;
use crate::source::ModifierSource;
use affix_core::Modifier;
use talent_core::Position;
use tracing::warn;

/// Every allocated node of one tree. A node's affix is per point, so each
/// modifier is multiplied by the points spent on it.
pub struct TalentSource<'a> {
    page: &'a TalentPage,
    id: String,
}

impl<'a> TalentSource<'a> {
    pub fn new(page: &'a TalentPage) -> Self {
        TalentSource {
            page,
            id: format!("talent:{}", page.name),
        }
    }
}

impl ModifierSource for TalentSource<'_> {
    fn id(&self) -> &str {
        &self.id
    }

    fn collect(&self, out: &mut Vec<Modifier>) {
        for entry in self.page.allocation.iter() {
            let pos = Position::new(entry.x, entry.y);
            let Some(node) = self.page.tree.node_at(pos) else {
                warn!(tree = %self.page.name, x = pos.x, y = pos.y, "allocated position has no node");
                continue;
            };
            let points = f64::from(entry.points);
            out.extend(node.parsed_affix().modifiers.iter().map(|m| m.scaled(points)));
        }
    }
}
