//! Inspect talent tree layouts

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use talent_core::{DirTreeFetcher, TalentTreeCache, TreeName};

/// Inspect talent tree layouts
#[derive(Parser)]
pub struct Tree {
    /// Tree to show (e.g. God_of_War); lists available trees when omitted
    #[arg(value_name = "TREE")]
    name: Option<TreeName>,

    /// Directory holding `<tree>_tree.json` layouts
    #[arg(short, long, value_name = "DIR")]
    trees: PathBuf,
}

impl Tree {
    pub fn execute(self) -> Result<()> {
        let fetcher = DirTreeFetcher::new(&self.trees);
        let Some(name) = self.name else {
            for name in fetcher.available()? {
                let kind = if name.is_god_goddess_tree() { "god" } else { "profession" };
                println!("{:<22} {}", name.to_string(), kind);
            }
            return Ok(());
        };

        let cache = TalentTreeCache::new(fetcher);
        let tree = cache
            .load(name)
            .with_context(|| format!("Failed to load tree {name}"))?;

        println!("{} ({} columns)", tree.name, tree.column_count());
        let mut nodes: Vec<_> = tree.nodes.iter().collect();
        nodes.sort_by_key(|n| (n.position.x, n.position.y));
        for node in nodes {
            let parsed = node.parsed_affix();
            let marker = if parsed.has_effect() { "" } else { "  (no modeled effect)" };
            println!(
                "  ({}, {}) {:?} x{}  {}{}",
                node.position.x,
                node.position.y,
                node.node_type,
                node.max_points,
                node.raw_affix.replace('\n', " / "),
                marker
            );
            if let Some(pre) = node.prerequisite {
                println!("      requires ({}, {})", pre.x, pre.y);
            }
        }
        Ok(())
    }
}
