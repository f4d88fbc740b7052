// Event entity
// Represents one combat occurrence extracted from one log line

use serde::{Deserialize, Serialize};

use crate::value_objects::EventKind;

/// Each variant carries exactly the fields of its kind. Timestamps are
/// milliseconds since midnight of the logged day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatEvent {
    ItemPurchased {
        timestamp: i64,
        actor: String,
        item: String,
    },
    HeroKilled {
        timestamp: i64,
        /// The killer.
        actor: String,
        /// The victim.
        target: String,
    },
    SpellCast {
        timestamp: i64,
        actor: String,
        target: String,
        ability: String,
        ability_level: u32,
    },
    DamageDone {
        timestamp: i64,
        actor: String,
        target: String,
        damage: i64,
    },
}

impl CombatEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            CombatEvent::ItemPurchased { .. } => EventKind::ItemPurchased,
            CombatEvent::HeroKilled { .. } => EventKind::HeroKilled,
            CombatEvent::SpellCast { .. } => EventKind::SpellCast,
            CombatEvent::DamageDone { .. } => EventKind::DamageDone,
        }
    }

    pub fn timestamp(&self) -> i64 {
        match self {
            CombatEvent::ItemPurchased { timestamp, .. }
            | CombatEvent::HeroKilled { timestamp, .. }
            | CombatEvent::SpellCast { timestamp, .. }
            | CombatEvent::DamageDone { timestamp, .. } => *timestamp,
        }
    }

    pub fn actor(&self) -> &str {
        match self {
            CombatEvent::ItemPurchased { actor, .. }
            | CombatEvent::HeroKilled { actor, .. }
            | CombatEvent::SpellCast { actor, .. }
            | CombatEvent::DamageDone { actor, .. } => actor,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            CombatEvent::ItemPurchased { .. } => None,
            CombatEvent::HeroKilled { target, .. }
            | CombatEvent::SpellCast { target, .. }
            | CombatEvent::DamageDone { target, .. } => Some(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_purchase_has_no_target() {
        let event = CombatEvent::ItemPurchased {
            timestamp: 310_000,
            actor: "antimage".to_string(),
            item: "boots".to_string(),
        };
        assert_eq!(event.kind(), EventKind::ItemPurchased);
        assert_eq!(event.actor(), "antimage");
        assert_eq!(event.target(), None);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let event = CombatEvent::DamageDone {
            timestamp: 420_000,
            actor: "sniper".to_string(),
            target: "antimage".to_string(),
            damage: 45,
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "DAMAGE_DONE");
        assert_eq!(json["damage"], 45);
        assert!(json.get("item").is_none());
    }
}
