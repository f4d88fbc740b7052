use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::RwLock;

use backend_domain::ports::{CombatLogSource, HealthCheckService, MatchRepository};
use backend_domain::services::CombatLogParser;
use backend_domain::{CombatMatch, MatchId, RuntimeConfig};

use crate::{AppState, Metrics};

pub const SAMPLE_LOG: &str = "\
[00:05:10] npc_dota_hero_antimage buys item item_boots
[00:06:00] npc_dota_hero_antimage is killed by npc_dota_hero_sniper
[00:06:30] npc_dota_hero_sniper casts ability sniper_shrapnel (lvl 2) on npc_dota_hero_antimage
[00:07:00] npc_dota_hero_sniper hits npc_dota_hero_antimage with weapon_sniper for 45 damage
";

#[derive(Default)]
pub struct FakeMatchRepository {
    next_id: AtomicU64,
    matches: RwLock<HashMap<MatchId, CombatMatch>>,
    pub fail: AtomicBool,
}

impl FakeMatchRepository {
    pub async fn stored(&self) -> usize {
        self.matches.read().await.len()
    }
}

#[async_trait]
impl MatchRepository for FakeMatchRepository {
    async fn ensure_schema(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn save(&self, combat_match: CombatMatch) -> anyhow::Result<MatchId> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("storage offline"));
        }
        let id = MatchId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.matches.write().await.insert(id, combat_match.with_id(id));
        Ok(id)
    }

    async fn find_by_id(&self, id: MatchId) -> anyhow::Result<Option<CombatMatch>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("storage offline"));
        }
        Ok(self.matches.read().await.get(&id).cloned())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

struct AlwaysHealthy;

#[async_trait]
impl HealthCheckService for AlwaysHealthy {
    async fn check_database(&self) -> anyhow::Result<bool> {
        Ok(true)
    }
}

/// Serves logs from memory; paths missing from the map fail to read.
#[derive(Default)]
pub struct FakeLogSource {
    pub listed: Vec<PathBuf>,
    pub contents: HashMap<PathBuf, String>,
}

#[async_trait]
impl CombatLogSource for FakeLogSource {
    async fn list_logs(&self, _root: &Path) -> anyhow::Result<Vec<PathBuf>> {
        Ok(self.listed.clone())
    }

    async fn read_log(&self, path: &Path) -> anyhow::Result<String> {
        self.contents
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("no such file: {}", path.display()))
    }
}

pub fn test_state(repo: Arc<FakeMatchRepository>) -> AppState {
    AppState {
        config: RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            api_token: None,
            data_dir: None,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 5,
        },
        match_repo: repo,
        health_service: Arc::new(AlwaysHealthy),
        parser: Arc::new(CombatLogParser::new().expect("build parser")),
        metrics: Arc::new(Metrics::default()),
    }
}
