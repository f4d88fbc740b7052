// Report entities
// Rows returned by the match aggregation queries

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DamageTally {
    pub damage_instances: u64,
    pub total_damage: i64,
}

impl DamageTally {
    pub fn record(&mut self, damage: i64) {
        self.damage_instances += 1;
        self.total_damage = self.total_damage.saturating_add(damage);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroKills {
    pub hero: String,
    pub kills: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroItem {
    pub item: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSpells {
    pub spell: String,
    pub casts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroDamage {
    pub target: String,
    pub damage_instances: u64,
    pub total_damage: i64,
}

impl From<(String, DamageTally)> for HeroDamage {
    fn from((target, tally): (String, DamageTally)) -> Self {
        Self {
            target,
            damage_instances: tally.damage_instances,
            total_damage: tally.total_damage,
        }
    }
}
