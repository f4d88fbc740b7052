use anyhow::{anyhow, Result};

pub fn validate_storage_backend(value: &str) -> Result<()> {
    match value.trim().to_lowercase().as_str() {
        "memory" | "clickhouse" => Ok(()),
        "" => Err(anyhow!("storage_backend is empty")),
        other => Err(anyhow!(
            "unsupported storage_backend '{}', expected 'memory' or 'clickhouse'",
            other
        )),
    }
}
