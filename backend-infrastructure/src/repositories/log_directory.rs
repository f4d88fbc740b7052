use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use backend_domain::CombatLogSource;

/// Reads combat logs from a directory tree on the local filesystem.
pub struct LogDirectorySource;

impl LogDirectorySource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogDirectorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CombatLogSource for LogDirectorySource {
    async fn list_logs(&self, root: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(entry.path());
                } else if file_type.is_file() {
                    files.push(entry.path());
                }
            }
        }
        files.sort();
        Ok(files)
    }

    async fn read_log(&self, path: &Path) -> anyhow::Result<String> {
        let bytes = fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_regular_files_recursively_in_path_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("nested/deeper")).expect("mkdir");
        std::fs::write(dir.path().join("b.log"), "b").expect("write");
        std::fs::write(dir.path().join("a.log"), "a").expect("write");
        std::fs::write(dir.path().join("nested/deeper/c.log"), "c").expect("write");

        let source = LogDirectorySource::new();
        let files = source.list_logs(dir.path()).await.expect("list");
        let relative: Vec<PathBuf> = files
            .iter()
            .map(|path| path.strip_prefix(dir.path()).expect("prefix").to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("a.log"),
                PathBuf::from("b.log"),
                PathBuf::from("nested/deeper/c.log"),
            ]
        );
        assert_eq!(source.read_log(&files[2]).await.expect("read"), "c");
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = LogDirectorySource::new();
        assert!(source.list_logs(&dir.path().join("absent")).await.is_err());
    }
}
