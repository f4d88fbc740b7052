// Event kind value object

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    ItemPurchased,
    HeroKilled,
    SpellCast,
    DamageDone,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ItemPurchased => "ITEM_PURCHASED",
            EventKind::HeroKilled => "HERO_KILLED",
            EventKind::SpellCast => "SPELL_CAST",
            EventKind::DamageDone => "DAMAGE_DONE",
        }
    }
}

impl FromStr for EventKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ITEM_PURCHASED" => Ok(EventKind::ItemPurchased),
            "HERO_KILLED" => Ok(EventKind::HeroKilled),
            "SPELL_CAST" => Ok(EventKind::SpellCast),
            "DAMAGE_DONE" => Ok(EventKind::DamageDone),
            _ => Err(ParseError::UnknownEventKind(s.to_string())),
        }
    }
}
