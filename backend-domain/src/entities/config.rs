// Runtime configuration entities

use crate::value_objects::StorageBackend;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub data_dir: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub storage_backend: StorageBackend,
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
}
