// Aggregations over the events of a single match.
// Grouped results use BTreeMap so callers see keys in a stable order.

use std::collections::BTreeMap;

use crate::entities::{CombatEvent, DamageTally, HeroItem};

/// Kill count per killer. Heroes without kills are absent.
pub fn kills_by_hero(events: &[CombatEvent]) -> BTreeMap<String, u64> {
    let mut kills = BTreeMap::new();
    for event in events {
        if let CombatEvent::HeroKilled { actor, .. } = event {
            *kills.entry(actor.clone()).or_insert(0) += 1;
        }
    }
    kills
}

/// Every purchase by `hero`, in log order.
pub fn items_by_hero(events: &[CombatEvent], hero: &str) -> Vec<HeroItem> {
    events
        .iter()
        .filter_map(|event| match event {
            CombatEvent::ItemPurchased {
                timestamp,
                actor,
                item,
            } if actor == hero => Some(HeroItem {
                item: item.clone(),
                timestamp: *timestamp,
            }),
            _ => None,
        })
        .collect()
}

/// Cast count per ability for `hero`.
pub fn spells_by_hero(events: &[CombatEvent], hero: &str) -> BTreeMap<String, u64> {
    let mut spells = BTreeMap::new();
    for event in events {
        if let CombatEvent::SpellCast { actor, ability, .. } = event {
            if actor == hero {
                *spells.entry(ability.clone()).or_insert(0) += 1;
            }
        }
    }
    spells
}

/// Hit count and summed damage per target for `hero`.
pub fn damage_by_hero(events: &[CombatEvent], hero: &str) -> BTreeMap<String, DamageTally> {
    let mut damage = BTreeMap::<String, DamageTally>::new();
    for event in events {
        if let CombatEvent::DamageDone {
            actor,
            target,
            damage: amount,
            ..
        } = event
        {
            if actor == hero {
                damage.entry(target.clone()).or_default().record(*amount);
            }
        }
    }
    damage
}
