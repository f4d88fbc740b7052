use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use backend_domain::{CombatMatch, MatchId, MatchRepository};

/// Process-local match store. Ids start at 1.
#[derive(Default)]
pub struct InMemoryMatchRepository {
    last_id: AtomicU64,
    matches: RwLock<HashMap<MatchId, CombatMatch>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn ensure_schema(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn save(&self, combat_match: CombatMatch) -> anyhow::Result<MatchId> {
        let id = MatchId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.matches
            .write()
            .await
            .insert(id, combat_match.with_id(id));
        Ok(id)
    }

    async fn find_by_id(&self, id: MatchId) -> anyhow::Result<Option<CombatMatch>> {
        Ok(self.matches.read().await.get(&id).cloned())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use backend_domain::CombatLogParser;

    fn parsed(raw: &str) -> CombatMatch {
        let parser = CombatLogParser::new().expect("build parser");
        CombatMatch::from_log(&parser, raw).expect("ingest").0
    }

    #[tokio::test]
    async fn ids_are_sequential_and_lookups_return_the_stored_match() {
        let repo = InMemoryMatchRepository::new();
        let first = repo
            .save(parsed("[00:05:10] npc_dota_hero_antimage buys item item_boots"))
            .await
            .expect("save");
        let second = repo
            .save(parsed("[00:06:00] npc_dota_hero_antimage is killed by npc_dota_hero_sniper"))
            .await
            .expect("save");
        assert_eq!(first, MatchId(1));
        assert_eq!(second, MatchId(2));

        let stored = repo.find_by_id(second).await.expect("find").expect("present");
        assert_eq!(stored.id(), Some(second));
        assert_eq!(stored.events()[0].actor(), "sniper");
        assert!(repo.find_by_id(MatchId(3)).await.expect("find").is_none());
    }

    #[tokio::test]
    async fn concurrent_saves_get_distinct_ids() {
        let repo = Arc::new(InMemoryMatchRepository::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.save(parsed("[00:05:10] npc_dota_hero_antimage buys item item_boots"))
                    .await
                    .expect("save")
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.expect("join"));
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}
