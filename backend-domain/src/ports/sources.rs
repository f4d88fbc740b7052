use std::path::{Path, PathBuf};

use async_trait::async_trait;

#[async_trait]
pub trait CombatLogSource: Send + Sync {
    /// Regular files below `root`, sorted by path.
    async fn list_logs(&self, root: &Path) -> anyhow::Result<Vec<PathBuf>>;
    async fn read_log(&self, path: &Path) -> anyhow::Result<String>;
}
