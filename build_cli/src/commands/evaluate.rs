//! Evaluate a saved build

use anyhow::{Context, Result};
use build_core::damage::HitDpsSummary;
use build_core::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use talent_core::{DirTreeFetcher, TalentTreeCache};

/// Evaluate a saved build
#[derive(Parser)]
pub struct Evaluate {
    /// Save file (JSON)
    #[arg(value_name = "SAVE")]
    save: PathBuf,

    /// Directory holding `<tree>_tree.json` layouts
    #[arg(short, long, value_name = "DIR")]
    trees: PathBuf,

    /// Directory with constants.toml, skills.toml and templates.toml (defaults to bundled data)
    #[arg(short, long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable per-skill breakdown
    Summary,
    /// Full JSON result
    Json,
}

impl Evaluate {
    pub fn execute(self) -> Result<()> {
        let data = match &self.data {
            Some(dir) => GameData::load_from_dir(dir)
                .with_context(|| format!("Failed to load game data from {}", dir.display()))?,
            None => GameData::bundled().context("Bundled game data is invalid")?,
        };

        let json = std::fs::read_to_string(&self.save)
            .with_context(|| format!("Failed to read {}", self.save.display()))?;
        let save = SaveData::from_json(&json)
            .with_context(|| format!("Failed to parse {}", self.save.display()))?;

        let trees = TalentTreeCache::new(DirTreeFetcher::new(&self.trees));
        let loadout = Loadout::from_save(&save, &trees)?;
        let result = calculate_offense(&loadout, &save.configuration_page, &data);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            OutputFormat::Summary => print_summary(&result),
        }
        Ok(())
    }
}

fn print_summary(result: &OffenseResult) {
    if result.skills.is_empty() {
        println!("No evaluable skills.");
    }
    for (name, summary) in &result.skills {
        println!("{name}: {} dps", fmt_big(summary.total_dps));
        if let Some(hit) = &summary.attack_dps_summary {
            print_hit("attack", hit);
        }
        if let Some(hit) = &summary.spell_dps_summary {
            print_hit("spell", hit);
        }
        if let Some(burst) = &summary.spell_burst_dps_summary {
            println!(
                "  spell burst   {:>12}  ({} charges, {:.3} releases/s)",
                fmt_big(burst.avg_dps),
                burst.max_charges,
                burst.releases_per_sec
            );
            if let Some(overload) = &burst.ingenuity_overload {
                println!("  overload      {:>12}", fmt_big(overload.avg_dps));
            }
        }
        if let Some(p) = &summary.persistent_dps_summary {
            println!("  persistent    {:>12}  ({:.2}s)", fmt_big(p.total), p.duration);
        }
        if let Some(reap) = &summary.total_reap_dps_summary {
            println!(
                "  reap          {:>12}  (+{:.2}% recovery, +{:.2}% duration)",
                fmt_big(reap.total_reap_dps),
                reap.reap_cdr_bonus_pct,
                reap.reap_duration_bonus_pct
            );
        }
    }

    println!("Resistances (max / potential / actual):");
    for res in ResType::all() {
        let r = result.defenses.get(*res);
        println!("  {:<10} {:>6.1} / {:>6.1} / {:>6.1}", res.to_string(), r.max, r.potential, r.actual);
    }
}

fn print_hit(label: &str, hit: &HitDpsSummary) {
    println!(
        "  {label:<13} {:>12}  ({:.1}% crit, x{:.2} crit dmg, {:.2}/s)",
        fmt_big(hit.avg_dps),
        hit.crit_chance * 100.0,
        hit.crit_dmg_mult,
        hit.hits_per_sec
    );
}

fn fmt_big(v: f64) -> String {
    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    UNITS
        .iter()
        .find(|(scale, _)| v.abs() >= *scale)
        .map(|(scale, unit)| format!("{:.2}{}", v / scale, unit))
        .unwrap_or_else(|| format!("{:.2}", v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_big() {
        assert_eq!(fmt_big(13.66e12), "13.66T");
        assert_eq!(fmt_big(2_500.0), "2.50K");
        assert_eq!(fmt_big(12.0), "12.00");
    }
}
