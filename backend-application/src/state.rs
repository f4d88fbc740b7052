use std::sync::Arc;

use backend_domain::ports::{HealthCheckService, MatchRepository};
use backend_domain::services::CombatLogParser;
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub match_repo: Arc<dyn MatchRepository>,
    pub health_service: Arc<dyn HealthCheckService>,
    pub parser: Arc<CombatLogParser>,
    pub metrics: Arc<Metrics>,
}
