//! PactspiritSource - Modifiers from pactspirit rings

use crate::source::ModifierSource;
use affix_core::{Modifier, PactspiritRing};

pub struct PactspiritSource<'a> {
    ring: &'a PactspiritRing,
    id: String,
}

impl<'a> PactspiritSource<'a> {
    pub fn new(ring: &'a PactspiritRing) -> Self {
        PactspiritSource {
            ring,
            id: format!("pactspirit:{}", ring.display_name()),
        }
    }
}

impl ModifierSource for PactspiritSource<'_> {
    fn id(&self) -> &str {
        &self.id
    }

    fn collect(&self, out: &mut Vec<Modifier>) {
        out.extend(self.ring.modifiers());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affix_core::ModKind;

    #[test]
    fn test_pactspirit_source() {
        let mut ring = PactspiritRing::new("Ring of Frost", "+12% cold damage");
        ring.destiny_type = Some("Greater Destiny".into());
        let source = PactspiritSource::new(&ring);
        let mut mods = Vec::new();
        source.collect(&mut mods);

        assert_eq!(source.id(), "pactspirit:Greater Destiny: Ring of Frost");
        assert_eq!(mods.len(), 1);
        assert_eq!(mods[0].kind, ModKind::DmgPct);
    }
}
