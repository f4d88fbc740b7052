use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clickhouse::{Client, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use backend_domain::{CombatEvent, CombatMatch, EventKind, MatchId, MatchRepository, ParseError};

use crate::utils::{current_millis, millis_to_utc};

#[derive(Debug, Clone, Serialize, Row)]
struct MatchRow {
    match_id: u64,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    created_at: OffsetDateTime,
    event_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Row)]
pub struct CombatLogEntryRow {
    pub match_id: u64,
    pub seq: u32,
    pub kind: String,
    pub timestamp: i64,
    pub actor: String,
    pub target: Option<String>,
    pub item: Option<String>,
    pub ability: Option<String>,
    pub ability_level: Option<u32>,
    pub damage: Option<i64>,
}

impl CombatLogEntryRow {
    pub fn from_event(match_id: MatchId, seq: u32, event: &CombatEvent) -> Self {
        let mut row = Self {
            match_id: match_id.0,
            seq,
            kind: event.kind().as_str().to_string(),
            timestamp: event.timestamp(),
            actor: event.actor().to_string(),
            target: event.target().map(ToString::to_string),
            item: None,
            ability: None,
            ability_level: None,
            damage: None,
        };
        match event {
            CombatEvent::ItemPurchased { item, .. } => row.item = Some(item.clone()),
            CombatEvent::SpellCast {
                ability,
                ability_level,
                ..
            } => {
                row.ability = Some(ability.clone());
                row.ability_level = Some(*ability_level);
            }
            CombatEvent::DamageDone { damage, .. } => row.damage = Some(*damage),
            CombatEvent::HeroKilled { .. } => {}
        }
        row
    }

    pub fn into_event(self) -> Result<CombatEvent, ParseError> {
        let kind: EventKind = self.kind.parse()?;
        let event = match kind {
            EventKind::ItemPurchased => CombatEvent::ItemPurchased {
                timestamp: self.timestamp,
                actor: self.actor,
                item: required(self.item, kind, "item")?,
            },
            EventKind::HeroKilled => CombatEvent::HeroKilled {
                timestamp: self.timestamp,
                actor: self.actor,
                target: required(self.target, kind, "target")?,
            },
            EventKind::SpellCast => CombatEvent::SpellCast {
                timestamp: self.timestamp,
                actor: self.actor,
                target: required(self.target, kind, "target")?,
                ability: required(self.ability, kind, "ability")?,
                ability_level: required(self.ability_level, kind, "ability_level")?,
            },
            EventKind::DamageDone => CombatEvent::DamageDone {
                timestamp: self.timestamp,
                actor: self.actor,
                target: required(self.target, kind, "target")?,
                damage: required(self.damage, kind, "damage")?,
            },
        };
        Ok(event)
    }
}

fn required<T>(value: Option<T>, kind: EventKind, field: &'static str) -> Result<T, ParseError> {
    value.ok_or(ParseError::MissingField {
        kind: kind.as_str(),
        field,
    })
}

/// Matches stored in ClickHouse. Ids come from a process-local counter
/// seeded with the highest stored id when the schema is ensured.
pub struct ClickhouseMatchRepository {
    client: Client,
    database: String,
    last_id: AtomicU64,
}

impl ClickhouseMatchRepository {
    pub fn new(client: Client, database: String) -> Self {
        Self {
            client,
            database,
            last_id: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl MatchRepository for ClickhouseMatchRepository {
    async fn ensure_schema(&self) -> Result<()> {
        let create_db = format!("CREATE DATABASE IF NOT EXISTS {}", self.database);
        self.client.query(&create_db).execute().await?;

        let create_matches = r#"
CREATE TABLE IF NOT EXISTS matches (
    match_id UInt64,
    created_at DateTime64(3),
    event_count UInt32
) ENGINE = MergeTree
ORDER BY match_id
"#;
        self.client.query(create_matches).execute().await?;

        let create_entries = r#"
CREATE TABLE IF NOT EXISTS combat_log_entries (
    match_id UInt64,
    seq UInt32,
    kind String,
    timestamp Int64,
    actor String,
    target Nullable(String),
    item Nullable(String),
    ability Nullable(String),
    ability_level Nullable(UInt32),
    damage Nullable(Int64)
) ENGINE = MergeTree
ORDER BY (match_id, seq)
"#;
        self.client.query(create_entries).execute().await?;

        let stored_max: u64 = self
            .client
            .query("SELECT max(match_id) FROM matches")
            .fetch_one()
            .await?;
        self.last_id.fetch_max(stored_max, Ordering::SeqCst);
        info!(database = %self.database, last_match_id = stored_max, "clickhouse schema ready");
        Ok(())
    }

    async fn save(&self, combat_match: CombatMatch) -> Result<MatchId> {
        let match_id = MatchId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
        let event_count = u32::try_from(combat_match.len())
            .map_err(|_| anyhow!("match has too many events: {}", combat_match.len()))?;

        // entries first, so a visible match row always has its events
        let mut insert = self.client.insert("combat_log_entries")?;
        for (seq, event) in combat_match.events().iter().enumerate() {
            insert
                .write(&CombatLogEntryRow::from_event(match_id, seq as u32, event))
                .await?;
        }
        insert.end().await?;

        let mut insert = self.client.insert("matches")?;
        insert
            .write(&MatchRow {
                match_id: match_id.0,
                created_at: millis_to_utc(current_millis()),
                event_count,
            })
            .await?;
        insert.end().await?;
        Ok(match_id)
    }

    async fn find_by_id(&self, id: MatchId) -> Result<Option<CombatMatch>> {
        let found = self
            .client
            .query("SELECT match_id FROM matches WHERE match_id = ? LIMIT 1")
            .bind(id.0)
            .fetch_all::<u64>()
            .await?;
        if found.is_empty() {
            return Ok(None);
        }

        let rows = self
            .client
            .query("SELECT ?fields FROM combat_log_entries WHERE match_id = ? ORDER BY seq")
            .bind(id.0)
            .fetch_all::<CombatLogEntryRow>()
            .await?;
        let events = rows
            .into_iter()
            .map(|row| {
                let seq = row.seq;
                row.into_event()
                    .map_err(|err| anyhow!("corrupt entry {} of match {}: {}", seq, id, err))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(CombatMatch::persisted(id, events)))
    }

    async fn ping(&self) -> Result<()> {
        let _: u8 = self.client.query("SELECT toUInt8(1)").fetch_one().await?;
        Ok(())
    }
}
