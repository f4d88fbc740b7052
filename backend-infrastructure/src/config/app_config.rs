use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{DbConfig, RuntimeConfig, StorageBackend};

use crate::config::validation::validate_storage_backend;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub storage_backend: String,
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
    pub data_dir: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            api_token: None,
            storage_backend: "memory".to_string(),
            clickhouse_url: "http://127.0.0.1:8123".to_string(),
            clickhouse_database: "combatlog".to_string(),
            clickhouse_user: None,
            clickhouse_password: None,
            data_dir: None,
            max_body_bytes: 32 * 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("COMBATLOG_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::from_toml(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    pub fn normalize(&mut self) {
        self.api_token = normalize_optional(self.api_token.take());
        self.clickhouse_user = normalize_optional(self.clickhouse_user.take());
        self.clickhouse_password = normalize_optional(self.clickhouse_password.take());
        self.data_dir = normalize_optional(self.data_dir.take());
        self.storage_backend = self.storage_backend.trim().to_lowercase();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        if let Some(data_dir) = &self.data_dir {
            self.data_dir = Some(resolve_path(base, data_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        validate_storage_backend(&self.storage_backend)?;
        if self.storage_backend == "clickhouse" && self.clickhouse_database.trim().is_empty() {
            return Err(anyhow!("clickhouse_database must not be empty"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            data_dir: self.data_dir.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            storage_backend: StorageBackend::from(self.storage_backend.as_str()),
            clickhouse_url: self.clickhouse_url.clone(),
            clickhouse_database: self.clickhouse_database.clone(),
            clickhouse_user: self.clickhouse_user.clone(),
            clickhouse_password: self.clickhouse_password.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("COMBATLOG_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("COMBATLOG_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("COMBATLOG_STORAGE_BACKEND") {
            self.storage_backend = value;
        }
        if let Ok(value) = env::var("COMBATLOG_CLICKHOUSE_URL") {
            self.clickhouse_url = value;
        }
        if let Ok(value) = env::var("COMBATLOG_CLICKHOUSE_DATABASE") {
            self.clickhouse_database = value;
        }
        if let Ok(value) = env::var("COMBATLOG_CLICKHOUSE_USER") {
            self.clickhouse_user = Some(value);
        }
        if let Ok(value) = env::var("COMBATLOG_CLICKHOUSE_PASSWORD") {
            self.clickhouse_password = Some(value);
        }
        if let Ok(value) = env::var("COMBATLOG_DATA_DIR") {
            self.data_dir = Some(value);
        }
        if let Ok(value) = env::var("COMBATLOG_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("COMBATLOG_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Some(raw.trim().to_string()),
        _ => None,
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
