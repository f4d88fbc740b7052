use std::sync::Arc;

use anyhow::Result;
use clickhouse::Client;
use tracing::info;

use backend_application::{AppState, Metrics};
use backend_domain::{CombatLogParser, DbConfig, MatchRepository, StorageBackend};
use backend_infrastructure::{
    AppConfig, ClickhouseMatchRepository, DefaultHealthService, InMemoryMatchRepository,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        Self::from_config(&config).await
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();
        let db_config = config.to_db_config();

        let match_repo = build_match_repository(&db_config);
        match_repo.ensure_schema().await?;
        info!(
            storage_backend = db_config.storage_backend.as_str(),
            "match repository ready"
        );

        let state = AppState {
            config: runtime_config,
            health_service: Arc::new(DefaultHealthService::new(match_repo.clone())),
            match_repo,
            parser: Arc::new(CombatLogParser::new()?),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}

fn build_match_repository(db_config: &DbConfig) -> Arc<dyn MatchRepository> {
    match db_config.storage_backend {
        StorageBackend::Memory => Arc::new(InMemoryMatchRepository::new()),
        StorageBackend::Clickhouse => {
            let mut clickhouse = Client::default()
                .with_url(&db_config.clickhouse_url)
                .with_database(&db_config.clickhouse_database);
            if let Some(user) = &db_config.clickhouse_user {
                clickhouse = clickhouse.with_user(user);
            }
            if let Some(password) = &db_config.clickhouse_password {
                clickhouse = clickhouse.with_password(password);
            }
            Arc::new(ClickhouseMatchRepository::new(
                clickhouse,
                db_config.clickhouse_database.clone(),
            ))
        }
    }
}
