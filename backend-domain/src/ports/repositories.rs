use async_trait::async_trait;

use crate::entities::CombatMatch;
use crate::value_objects::MatchId;

#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn ensure_schema(&self) -> anyhow::Result<()>;
    /// Stores the match and returns the identifier assigned to it.
    async fn save(&self, combat_match: CombatMatch) -> anyhow::Result<MatchId>;
    async fn find_by_id(&self, id: MatchId) -> anyhow::Result<Option<CombatMatch>>;
    async fn ping(&self) -> anyhow::Result<()>;
}
