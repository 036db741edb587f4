//! GearSource - Modifiers from equipped gear

use crate::source::ModifierSource;
use affix_core::{Gear, Modifier};

/// Modifiers parsed from one equipped piece
pub struct GearSource<'a> {
    gear: &'a Gear,
    id: String,
}

impl<'a> GearSource<'a> {
    pub fn new(gear: &'a Gear) -> Self {
        GearSource {
            gear,
            id: format!("gear:{:?}", gear.slot),
        }
    }
}

impl ModifierSource for GearSource<'_> {
    fn id(&self) -> &str {
        &self.id
    }

    fn collect(&self, out: &mut Vec<Modifier>) {
        out.extend(self.gear.modifiers());
    }
}
