//! Show how affix text is understood

use affix_core::{parse_affix_lines, render_modifier, AffixParser};
use anyhow::{bail, Result};
use clap::Parser;

/// Parse affix text
#[derive(Parser)]
pub struct ParseAffix {
    /// Affix text; separate lines with `\n` or pass several arguments
    #[arg(value_name = "TEXT")]
    text: Vec<String>,

    /// Print modifiers as JSON
    #[arg(long)]
    json: bool,

    /// List the recognized affix forms instead
    #[arg(long, conflicts_with = "text")]
    forms: bool,
}

impl ParseAffix {
    pub fn execute(self) -> Result<()> {
        if self.forms {
            for name in AffixParser::new().matcher_names() {
                println!("{name}");
            }
            return Ok(());
        }
        if self.text.is_empty() {
            bail!("No affix text given");
        }

        let parsed = parse_affix_lines(&self.text.join("\n").replace("\\n", "\n"));
        if self.json {
            println!("{}", serde_json::to_string_pretty(&parsed.modifiers)?);
            return Ok(());
        }
        if !parsed.has_effect() {
            println!("No modeled effect.");
        }
        for m in &parsed.modifiers {
            let canonical = render_modifier(m).unwrap_or_default();
            println!("{:<50} {:?} {:?} value={}", canonical, m.kind, m.mod_type, m.value);
        }
        Ok(())
    }
}
