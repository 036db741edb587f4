//! CustomAffixSource - Free-form affixes from the configuration page

use crate::source::ModifierSource;
use affix_core::{parse_affix_lines, Modifier};

pub struct CustomAffixSource<'a> {
    affixes: &'a [String],
}

impl<'a> CustomAffixSource<'a> {
    pub fn new(affixes: &'a [String]) -> Self {
        CustomAffixSource { affixes }
    }
}

impl ModifierSource for CustomAffixSource<'_> {
    fn id(&self) -> &str {
        "custom"
    }

    fn collect(&self, out: &mut Vec<Modifier>) {
        for affix in self.affixes {
            out.extend(parse_affix_lines(affix).modifiers);
        }
    }
}
