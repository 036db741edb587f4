use crate::modifier::Modifier;
use crate::parser::parse_affix_lines;
use serde::{Deserialize, Serialize};

/// A ring slotted into a pactspirit, described by its affix text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PactspiritRing {
    pub name: String,
    /// Destiny the ring belongs to, when it has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destiny_type: Option<String>,
    #[serde(default)]
    pub affix: String,
}

impl PactspiritRing {
    pub fn new(name: impl Into<String>, affix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            destiny_type: None,
            affix: affix.into(),
        }
    }

    /// `"<destiny>: <name>"`, or just the name
    pub fn display_name(&self) -> String {
        match &self.destiny_type {
            Some(destiny) => format!("{}: {}", destiny, self.name),
            None => self.name.clone(),
        }
    }

    pub fn modifiers(&self) -> Vec<Modifier> {
        parse_affix_lines(&self.affix).modifiers
    }
}
