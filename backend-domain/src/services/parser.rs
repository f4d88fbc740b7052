use chrono::{NaiveTime, Timelike};
use regex::{Captures, Regex};
use tracing::debug;

use crate::entities::CombatEvent;
use crate::error::ParseError;
use crate::value_objects::EventKind;

pub const HERO_PREFIX: &str = "npc_dota_hero_";
pub const UNIT_PREFIX: &str = "npc_dota_";

const ITEM_PURCHASED_PATTERN: &str =
    r"^\[(?P<time>.*)\] npc_dota_hero_(?P<actor>.*) buys item item_(?P<item>.*)$";
const HERO_KILLED_PATTERN: &str =
    r"^\[(?P<time>.*)\] npc_dota_hero_(?P<target>.*) is killed by npc_dota_hero_(?P<actor>.*)$";
const SPELL_CAST_PATTERN: &str = r"^\[(?P<time>.*)\] npc_dota_hero_(?P<actor>.*) casts ability (?P<ability>.*) \(lvl (?P<level>\d+)\) on (?P<target>.*)$";
const DAMAGE_DONE_PATTERN: &str = r"^\[(?P<time>.*)\] npc_dota_hero_(?P<actor>.*) hits npc_dota_hero_(?P<target>.*) with (?P<source>.*) for (?P<damage>\d+) damage.*$";

type BuildFn = fn(&Captures<'_>) -> Result<CombatEvent, ParseError>;

struct ParseRule {
    kind: EventKind,
    pattern: Regex,
    build: BuildFn,
}

/// Ordered rule table turning combat log lines into events.
///
/// Rules are tried in declaration order and the first pattern that matches
/// decides the line. If that rule's fields do not parse (bad time, oversized
/// number) the line yields no event; later rules are not consulted.
pub struct CombatLogParser {
    rules: Vec<ParseRule>,
}

impl CombatLogParser {
    pub fn new() -> Result<Self, ParseError> {
        let table: [(EventKind, &str, BuildFn); 4] = [
            (EventKind::ItemPurchased, ITEM_PURCHASED_PATTERN, build_item_purchased),
            (EventKind::HeroKilled, HERO_KILLED_PATTERN, build_hero_killed),
            (EventKind::SpellCast, SPELL_CAST_PATTERN, build_spell_cast),
            (EventKind::DamageDone, DAMAGE_DONE_PATTERN, build_damage_done),
        ];
        let mut rules = Vec::with_capacity(table.len());
        for (kind, pattern, build) in table {
            rules.push(ParseRule {
                kind,
                pattern: Regex::new(pattern)?,
                build,
            });
        }
        Ok(Self { rules })
    }

    pub fn classify(&self, line: &str) -> Option<CombatEvent> {
        let (rule, captures) = self
            .rules
            .iter()
            .find_map(|rule| rule.pattern.captures(line).map(|captures| (rule, captures)))?;
        (rule.build)(&captures)
            .map_err(|err| {
                debug!(kind = rule.kind.as_str(), error = %err, line, "line rejected by rule");
            })
            .ok()
    }

    /// Kinds whose pattern matches the line, ignoring field parsing.
    #[cfg(test)]
    fn matching_kinds(&self, line: &str) -> Vec<EventKind> {
        self.rules
            .iter()
            .filter(|rule| rule.pattern.is_match(line))
            .map(|rule| rule.kind)
            .collect()
    }
}

/// Converts `HH:MM:SS[.fff]` (or `HH:MM`) into milliseconds since midnight.
pub fn parse_timestamp(value: &str) -> Result<i64, ParseError> {
    let time = NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| ParseError::InvalidTimestamp(value.to_string()))?;
    // chrono encodes a leap second as nanosecond >= 1s
    if time.nanosecond() >= 1_000_000_000 {
        return Err(ParseError::InvalidTimestamp(value.to_string()));
    }
    Ok(i64::from(time.num_seconds_from_midnight()) * 1000 + i64::from(time.nanosecond() / 1_000_000))
}

/// Strips the hero prefix, or failing that the generic unit prefix.
pub fn normalize_target(raw: &str) -> &str {
    raw.strip_prefix(HERO_PREFIX)
        .or_else(|| raw.strip_prefix(UNIT_PREFIX))
        .unwrap_or(raw)
}

fn group<'a>(captures: &Captures<'a>, name: &str) -> &'a str {
    captures.name(name).map(|m| m.as_str()).unwrap_or_default()
}

fn parse_number<T: std::str::FromStr>(captures: &Captures<'_>, name: &'static str) -> Result<T, ParseError> {
    let value = group(captures, name);
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field: name,
        value: value.to_string(),
    })
}

fn build_item_purchased(captures: &Captures<'_>) -> Result<CombatEvent, ParseError> {
    Ok(CombatEvent::ItemPurchased {
        timestamp: parse_timestamp(group(captures, "time"))?,
        actor: group(captures, "actor").to_string(),
        item: group(captures, "item").to_string(),
    })
}

fn build_hero_killed(captures: &Captures<'_>) -> Result<CombatEvent, ParseError> {
    Ok(CombatEvent::HeroKilled {
        timestamp: parse_timestamp(group(captures, "time"))?,
        actor: group(captures, "actor").to_string(),
        target: group(captures, "target").to_string(),
    })
}

fn build_spell_cast(captures: &Captures<'_>) -> Result<CombatEvent, ParseError> {
    Ok(CombatEvent::SpellCast {
        timestamp: parse_timestamp(group(captures, "time"))?,
        actor: group(captures, "actor").to_string(),
        target: normalize_target(group(captures, "target")).to_string(),
        ability: group(captures, "ability").to_string(),
        ability_level: parse_number(captures, "level")?,
    })
}

fn build_damage_done(captures: &Captures<'_>) -> Result<CombatEvent, ParseError> {
    Ok(CombatEvent::DamageDone {
        timestamp: parse_timestamp(group(captures, "time"))?,
        actor: group(captures, "actor").to_string(),
        target: group(captures, "target").to_string(),
        damage: parse_number(captures, "damage")?,
    })
}
