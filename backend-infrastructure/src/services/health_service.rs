use std::sync::Arc;

use async_trait::async_trait;
use backend_domain::ports::HealthCheckService;
use backend_domain::MatchRepository;

pub struct DefaultHealthService {
    match_repo: Arc<dyn MatchRepository>,
}

impl DefaultHealthService {
    pub fn new(match_repo: Arc<dyn MatchRepository>) -> Self {
        Self { match_repo }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_database(&self) -> anyhow::Result<bool> {
        self.match_repo.ping().await.map(|_| true)
    }
}
