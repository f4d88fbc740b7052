// Storage backend value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Clickhouse,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Clickhouse => "clickhouse",
        }
    }
}

impl From<&str> for StorageBackend {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "clickhouse" => StorageBackend::Clickhouse,
            _ => StorageBackend::Memory,
        }
    }
}
