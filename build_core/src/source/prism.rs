//! PrismSource - Modifiers from prisms on the talent page

use crate::source::ModifierSource;
use affix_core::{Modifier, Prism};

pub struct PrismSource<'a> {
    prism: &'a Prism,
    id: String,
}

impl<'a> PrismSource<'a> {
    pub fn new(prism: &'a Prism) -> Self {
        PrismSource {
            prism,
            id: format!("prism:{}", prism.name),
        }
    }
}

impl ModifierSource for PrismSource<'_> {
    fn id(&self) -> &str {
        &self.id
    }

    fn collect(&self, out: &mut Vec<Modifier>) {
        out.extend(self.prism.modifiers());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affix_core::{ModKind, PrismRarity};

    #[test]
    fn test_prism_source() {
        let mut prism = Prism::new(
            PrismRarity::Legendary,
            "Replaces micro talents in range:\n+5% damage",
        )
        .with_gauge(PrismRarity::Legendary, "+20% cast speed");
        prism.name = "Ethereal".into();

        let source = PrismSource::new(&prism);
        let mut mods = Vec::new();
        source.collect(&mut mods);

        assert_eq!(source.id(), "prism:Ethereal");
        let kinds: Vec<_> = mods.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, [ModKind::DmgPct, ModKind::CspdPct]);
    }
}
