//! Affix text parsing.
//!
//! An [`AffixParser`] holds an ordered list of [`AffixMatcher`]s. Each matcher
//! recognizes one grammar over the lowercased, whitespace-separated tokens of a
//! single affix line and can render a modifier of its kind back to text. The
//! first matcher that accepts a line wins; a line nobody accepts carries no
//! mechanical effect.

use crate::modifier::{ModKind, Modifier};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// One recognizable affix grammar
pub trait AffixMatcher: Send + Sync {
    fn name(&self) -> &'static str;

    /// Parse the tokens of one line. Must consume every token to succeed.
    fn parse(&self, tokens: &[&str]) -> Option<Modifier>;

    /// Render a modifier of this matcher's kind back to affix text
    fn render(&self, modifier: &Modifier) -> Option<String>;
}

/// Ordered matcher list
pub struct AffixParser {
    matchers: Vec<Box<dyn AffixMatcher>>,
}

impl Default for AffixParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AffixParser {
    /// Parser with the built-in grammars in priority order
    pub fn new() -> Self {
        Self {
            matchers: vec![
                Box::new(DmgPctMatcher),
                Box::new(PctMatcher::new("dot_damage", ModKind::DotDmgPct, &["damage", "over", "time"])),
                Box::new(CritMatcher::new("crit_rating", ModKind::CritRatingPct, "rating")),
                Box::new(CritMatcher::new("crit_damage", ModKind::CritDmgPct, "damage")),
                Box::new(PctMatcher::new("attack_speed", ModKind::AspdPct, &["attack", "speed"])),
                Box::new(PctMatcher::new("cast_speed", ModKind::CspdPct, &["cast", "speed"])),
                Box::new(PctMatcher::new("aura_effect", ModKind::AuraEffPct, &["aura", "effect"])),
                Box::new(PctMatcher::new(
                    "skill_duration",
                    ModKind::SkillDurationPct,
                    &["skill", "duration"],
                )),
                Box::new(ResistanceMatcher),
                Box::new(StatMatcher),
                Box::new(FlatDamageMatcher),
                Box::new(MaxSpellBurstMatcher),
                Box::new(PctMatcher::new(
                    "spell_burst_charge_speed",
                    ModKind::SpellBurstChargeSpeedPct,
                    &["spell", "burst", "charge", "speed"],
                )),
                Box::new(PctMatcher::new(
                    "spell_burst_damage",
                    ModKind::SpellBurstDmgPct,
                    &["spell", "burst", "damage"],
                )),
                Box::new(IngenuityOverloadMatcher),
                Box::new(ReapMatcher),
                Box::new(PctMatcher::new(
                    "reap_cooldown",
                    ModKind::ReapCdrPct,
                    &["reaping", "cooldown", "recovery", "speed"],
                )),
                Box::new(PctMatcher::new(
                    "reap_duration",
                    ModKind::ReapDurationPct,
                    &["reaping", "duration"],
                )),
            ],
        }
    }

    /// Parse a single affix line. `None` means the line has no modeled effect.
    pub fn parse(&self, text: &str) -> Option<Modifier> {
        let lowered = text.trim().to_lowercase();
        let tokens = tokenize(&lowered);
        if tokens.is_empty() {
            return None;
        }
        self.matchers.iter().find_map(|m| m.parse(&tokens))
    }

    /// Parse every line of a possibly multi-line affix
    pub fn parse_lines(&self, text: &str) -> ParsedAffix {
        let modifiers = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let parsed = self.parse(line);
                if parsed.is_none() {
                    debug!(affix = line.trim(), "affix line has no modeled effect");
                }
                parsed
            })
            .collect();
        ParsedAffix {
            raw: text.to_string(),
            modifiers,
        }
    }

    /// Canonical text for a modifier, if any matcher can express it
    pub fn render(&self, modifier: &Modifier) -> Option<String> {
        self.matchers.iter().find_map(|m| m.render(modifier))
    }

    pub fn matcher_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.matchers.iter().map(|m| m.name())
    }
}

/// The raw text of an affix and whatever modifiers its lines produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedAffix {
    pub raw: String,
    pub modifiers: Vec<Modifier>,
}

impl ParsedAffix {
    pub fn has_effect(&self) -> bool {
        !self.modifiers.is_empty()
    }
}

fn default_parser() -> &'static AffixParser {
    static PARSER: OnceLock<AffixParser> = OnceLock::new();
    PARSER.get_or_init(AffixParser::new)
}

/// Parse one affix line with the built-in grammars
pub fn parse_affix(text: &str) -> Option<Modifier> {
    default_parser().parse(text)
}

/// Parse a multi-line affix with the built-in grammars
pub fn parse_affix_lines(text: &str) -> ParsedAffix {
    default_parser().parse_lines(text)
}

/// Render a modifier with the built-in grammars
pub fn render_modifier(modifier: &Modifier) -> Option<String> {
    default_parser().render(modifier)
}

// ---------------------------------------------------------------------------
// Token helpers
// ---------------------------------------------------------------------------

fn tokenize(lowered: &str) -> Vec<&str> {
    lowered
        .split_whitespace()
        .map(|t| t.trim_end_matches(&['.', ','][..]))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Unsigned decimal: digits with at most one interior dot
fn parse_decimal(s: &str) -> Option<f64> {
    if !s.starts_with(|c: char| c.is_ascii_digit()) || s.ends_with('.') {
        return None;
    }
    let mut seen_dot = false;
    for c in s.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return None,
        }
    }
    s.parse().ok()
}

fn parse_signed(s: &str) -> Option<f64> {
    match s.strip_prefix('-') {
        Some(rest) => parse_decimal(rest).map(|v| -v),
        None => parse_decimal(s.strip_prefix('+').unwrap_or(s)),
    }
}

/// `[+-]N%` as a fraction
fn parse_pct(s: &str) -> Option<f64> {
    parse_signed(s.strip_suffix('%')?).map(|v| v / 100.0)
}

/// Leading percentage followed by the optional `additional` qualifier
fn split_pct<'a, 'b>(tokens: &'a [&'b str]) -> Option<(f64, bool, &'a [&'b str])> {
    let (first, rest) = tokens.split_first()?;
    let value = parse_pct(first)?;
    match rest.split_first() {
        Some((&"additional", rest)) => Some((value, true, rest)),
        _ => Some((value, false, rest)),
    }
}

fn fmt_number(v: f64) -> String {
    let rounded = (v * 1e6).round() / 1e6;
    format!("{}", rounded)
}

fn fmt_signed(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "+" };
    format!("{}{}", sign, fmt_number(v.abs()))
}

fn fmt_pct(v: f64) -> String {
    format!("{}%", fmt_signed(v * 100.0))
}

fn additional_word(addn: bool) -> &'static str {
    if addn {
        "additional "
    } else {
        ""
    }
}

fn scope_word(scope: ModType) -> String {
    match scope {
        ModType::Global => String::new(),
        other => format!("{} ", other),
    }
}

// ---------------------------------------------------------------------------
// Matchers
// ---------------------------------------------------------------------------

/// `[+-]N% [additional] [<type>] damage`
struct DmgPctMatcher;

impl AffixMatcher for DmgPctMatcher {
    fn name(&self) -> &'static str {
        "damage"
    }

    fn parse(&self, tokens: &[&str]) -> Option<Modifier> {
        let (value, addn, rest) = split_pct(tokens)?;
        let mod_type = match rest {
            ["damage"] => ModType::Global,
            // an unknown type word fails rather than falling back to global
            [word, "damage"] => ModType::from_str(word).ok()?,
            _ => return None,
        };
        let mut m = Modifier::new(ModKind::DmgPct, value).scoped(mod_type);
        m.addn = addn;
        Some(m)
    }

    fn render(&self, m: &Modifier) -> Option<String> {
        if m.kind != ModKind::DmgPct {
            return None;
        }
        Some(format!(
            "{} {}{}damage",
            fmt_pct(m.value),
            additional_word(m.addn),
            scope_word(m.mod_type)
        ))
    }
}

/// `[+-]N% [additional] <fixed words>` for global-only percentage kinds
struct PctMatcher {
    name: &'static str,
    kind: ModKind,
    words: &'static [&'static str],
}

impl PctMatcher {
    fn new(name: &'static str, kind: ModKind, words: &'static [&'static str]) -> Self {
        Self { name, kind, words }
    }
}

impl AffixMatcher for PctMatcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn parse(&self, tokens: &[&str]) -> Option<Modifier> {
        let (value, addn, rest) = split_pct(tokens)?;
        if rest != self.words {
            return None;
        }
        let mut m = Modifier::new(self.kind, value);
        m.addn = addn;
        Some(m)
    }

    fn render(&self, m: &Modifier) -> Option<String> {
        if m.kind != self.kind || m.mod_type != ModType::Global {
            return None;
        }
        Some(format!(
            "{} {}{}",
            fmt_pct(m.value),
            additional_word(m.addn),
            self.words.join(" ")
        ))
    }
}

/// `[+-]N% [additional] [attack|spell] critical strike <rating|damage>`
struct CritMatcher {
    name: &'static str,
    kind: ModKind,
    last: &'static str,
}

impl CritMatcher {
    fn new(name: &'static str, kind: ModKind, last: &'static str) -> Self {
        Self { name, kind, last }
    }
}

impl AffixMatcher for CritMatcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn parse(&self, tokens: &[&str]) -> Option<Modifier> {
        let (value, addn, rest) = split_pct(tokens)?;
        let (mod_type, rest) = match rest.split_first() {
            Some((&"attack", rest)) => (ModType::Attack, rest),
            Some((&"spell", rest)) => (ModType::Spell, rest),
            _ => (ModType::Global, rest),
        };
        match rest {
            ["critical", "strike", last] if *last == self.last => {}
            _ => return None,
        }
        let mut m = Modifier::new(self.kind, value).scoped(mod_type);
        m.addn = addn;
        Some(m)
    }

    fn render(&self, m: &Modifier) -> Option<String> {
        if m.kind != self.kind || !self.kind.accepts_scope(m.mod_type) {
            return None;
        }
        Some(format!(
            "{} {}{}critical strike {}",
            fmt_pct(m.value),
            additional_word(m.addn),
            scope_word(m.mod_type),
            self.last
        ))
    }
}

/// `[+-]N% [max] <cold|lightning|fire|erosion|elemental|all> resistance`
struct ResistanceMatcher;

impl AffixMatcher for ResistanceMatcher {
    fn name(&self) -> &'static str {
        "resistance"
    }

    fn parse(&self, tokens: &[&str]) -> Option<Modifier> {
        let (first, rest) = tokens.split_first()?;
        let value = parse_pct(first)?;
        let (kind, word) = match rest {
            ["max", word, "resistance"] => (ModKind::MaxResPct, *word),
            [word, "resistance"] => (ModKind::ResPct, *word),
            _ => return None,
        };
        let mod_type = match word {
            "all" => ModType::Global,
            w => ModType::from_str(w).ok()?,
        };
        if !kind.accepts_scope(mod_type) {
            return None;
        }
        Some(Modifier::new(kind, value).scoped(mod_type).additional())
    }

    fn render(&self, m: &Modifier) -> Option<String> {
        let max = match m.kind {
            ModKind::ResPct => "",
            ModKind::MaxResPct => "max ",
            _ => return None,
        };
        // resistance text has no multiplicative form
        if !m.addn || !m.kind.accepts_scope(m.mod_type) {
            return None;
        }
        let word = match m.mod_type {
            ModType::Global => "all".to_string(),
            other => other.to_string(),
        };
        Some(format!("{} {}{} resistance", fmt_pct(m.value), max, word))
    }
}

/// `[+-]N <stat>` and `[+-]N% [additional] <stat>`
struct StatMatcher;

impl AffixMatcher for StatMatcher {
    fn name(&self) -> &'static str {
        "stat"
    }

    fn parse(&self, tokens: &[&str]) -> Option<Modifier> {
        if let [first, word] = tokens {
            if let Some(value) = parse_signed(first) {
                let stat = StatType::from_str(word).ok()?;
                return Some(Modifier::new(ModKind::Stat { stat }, value).additional());
            }
        }
        let (value, addn, rest) = split_pct(tokens)?;
        let [word] = rest else {
            return None;
        };
        let stat = StatType::from_str(word).ok()?;
        let mut m = Modifier::new(ModKind::StatPct { stat }, value);
        m.addn = addn;
        Some(m)
    }

    fn render(&self, m: &Modifier) -> Option<String> {
        match m.kind {
            ModKind::Stat { stat } => Some(format!("{} {}", fmt_signed(m.value), stat)),
            ModKind::StatPct { stat } => Some(format!(
                "{} {}{}",
                fmt_pct(m.value),
                additional_word(m.addn),
                stat
            )),
            _ => None,
        }
    }
}

/// `adds N - M <type> damage [to attacks|to spells]`
struct FlatDamageMatcher;

impl AffixMatcher for FlatDamageMatcher {
    fn name(&self) -> &'static str {
        "flat_damage"
    }

    fn parse(&self, tokens: &[&str]) -> Option<Modifier> {
        let ["adds", min, "-", max, word, "damage", tail @ ..] = tokens else {
            return None;
        };
        let mod_type = match tail {
            [] => ModType::Global,
            ["to", "attacks"] => ModType::Attack,
            ["to", "spells"] => ModType::Spell,
            _ => return None,
        };
        let min = parse_decimal(min)?;
        let max = parse_decimal(max)?;
        let dmg_type = DmgType::from_str(word).ok()?;
        Some(Modifier::flat_damage(dmg_type, min, max).scoped(mod_type))
    }

    fn render(&self, m: &Modifier) -> Option<String> {
        let ModKind::FlatDmg { dmg_type, min, max } = m.kind else {
            return None;
        };
        let tail = match m.mod_type {
            ModType::Global => "",
            ModType::Attack => " to attacks",
            ModType::Spell => " to spells",
            _ => return None,
        };
        Some(format!(
            "adds {} - {} {} damage{}",
            fmt_number(min),
            fmt_number(max),
            dmg_type,
            tail
        ))
    }
}

/// `[+-]N max spell burst`
struct MaxSpellBurstMatcher;

impl AffixMatcher for MaxSpellBurstMatcher {
    fn name(&self) -> &'static str {
        "max_spell_burst"
    }

    fn parse(&self, tokens: &[&str]) -> Option<Modifier> {
        let [first, "max", "spell", "burst"] = tokens else {
            return None;
        };
        let value = parse_signed(first)?;
        Some(Modifier::new(ModKind::MaxSpellBurst, value).additional())
    }

    fn render(&self, m: &Modifier) -> Option<String> {
        (m.kind == ModKind::MaxSpellBurst).then(|| format!("{} max spell burst", fmt_signed(m.value)))
    }
}

/// `ingenuity overload deals N% of spell burst damage`
struct IngenuityOverloadMatcher;

impl AffixMatcher for IngenuityOverloadMatcher {
    fn name(&self) -> &'static str {
        "ingenuity_overload"
    }

    fn parse(&self, tokens: &[&str]) -> Option<Modifier> {
        let ["ingenuity", "overload", "deals", pct, "of", "spell", "burst", "damage"] = tokens else {
            return None;
        };
        let value = parse_pct(pct)?;
        Some(Modifier::new(ModKind::IngenuityOverloadPct, value).additional())
    }

    fn render(&self, m: &Modifier) -> Option<String> {
        (m.kind == ModKind::IngenuityOverloadPct).then(|| {
            format!(
                "ingenuity overload deals {}% of spell burst damage",
                fmt_number(m.value * 100.0)
            )
        })
    }
}

/// `reaps N s of damage over time ... M s cooldown`
///
/// Anything between the reap clause and the cooldown clause is ignored.
/// Without a cooldown clause the cooldown is one second.
struct ReapMatcher;

const DEFAULT_REAP_COOLDOWN: f64 = 1.0;

impl AffixMatcher for ReapMatcher {
    fn name(&self) -> &'static str {
        "reap"
    }

    fn parse(&self, tokens: &[&str]) -> Option<Modifier> {
        let ["reaps", secs, "s", "of", "damage", "over", "time", tail @ ..] = tokens else {
            return None;
        };
        let secs = parse_decimal(secs)?;
        let cooldown = tail
            .windows(3)
            .find_map(|w| match w {
                [n, "s", "cooldown"] => parse_decimal(n),
                _ => None,
            })
            .unwrap_or(DEFAULT_REAP_COOLDOWN);
        if cooldown <= 0.0 {
            return None;
        }
        Some(Modifier::new(ModKind::Reap { cooldown }, secs).additional())
    }

    fn render(&self, m: &Modifier) -> Option<String> {
        let ModKind::Reap { cooldown } = m.kind else {
            return None;
        };
        Some(format!(
            "reaps {} s of damage over time. the effect has a {} s cooldown",
            fmt_number(m.value),
            fmt_number(cooldown)
        ))
    }
}
