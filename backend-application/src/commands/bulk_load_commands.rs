use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::commands::ingest_commands;
use crate::AppState;
use backend_domain::ports::CombatLogSource;
use backend_domain::MatchId;
use crate::AppError;

#[derive(Debug, Default)]
pub struct BulkLoadSummary {
    pub loaded: Vec<(PathBuf, MatchId)>,
    pub failed: Vec<PathBuf>,
}

/// Ingests every log below `root`, one match per file. A file that cannot be
/// read or parsed is logged and skipped.
pub async fn load_combat_logs(
    state: &AppState,
    source: &dyn CombatLogSource,
    root: &Path,
) -> Result<BulkLoadSummary, AppError> {
    let paths = source.list_logs(root).await.map_err(|err| {
        error!(root = %root.display(), "failed to list combat logs: {:?}", err);
        AppError::Internal(err)
    })?;

    let mut summary = BulkLoadSummary::default();
    for path in paths {
        let content = match source.read_log(&path).await {
            Ok(content) => content,
            Err(err) => {
                error!(path = %path.display(), "failed to read combat log: {:?}", err);
                summary.failed.push(path);
                continue;
            }
        };
        match ingest_commands::ingest_combat_log(state, &content).await {
            Ok(match_id) => summary.loaded.push((path, match_id)),
            Err(err) => {
                error!(path = %path.display(), "failed to ingest combat log: {}", err);
                summary.failed.push(path);
            }
        }
    }

    info!(
        root = %root.display(),
        loaded = summary.loaded.len(),
        failed = summary.failed.len(),
        "combat log directory loaded"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{test_state, FakeLogSource, FakeMatchRepository, SAMPLE_LOG};

    #[tokio::test]
    async fn failures_do_not_stop_the_remaining_files() {
        let repo = Arc::new(FakeMatchRepository::default());
        let state = test_state(repo.clone());
        let mut source = FakeLogSource::default();
        for name in ["a.log", "b.log", "c.log", "d.log"] {
            source.listed.push(PathBuf::from(name));
        }
        source.contents.insert(PathBuf::from("a.log"), SAMPLE_LOG.to_string());
        source.contents.insert(PathBuf::from("b.log"), "garbage".to_string());
        source.contents.insert(PathBuf::from("d.log"), SAMPLE_LOG.to_string());

        let summary = load_combat_logs(&state, &source, Path::new("data"))
            .await
            .expect("bulk load");

        let loaded: Vec<&Path> = summary.loaded.iter().map(|(path, _)| path.as_path()).collect();
        assert_eq!(loaded, vec![Path::new("a.log"), Path::new("d.log")]);
        assert_eq!(summary.failed, vec![PathBuf::from("b.log"), PathBuf::from("c.log")]);
        assert_eq!(repo.stored().await, 2);
    }

    #[tokio::test]
    async fn empty_directory_loads_nothing() {
        let state = test_state(Arc::new(FakeMatchRepository::default()));
        let summary = load_combat_logs(&state, &FakeLogSource::default(), Path::new("data"))
            .await
            .expect("bulk load");
        assert!(summary.loaded.is_empty());
        assert!(summary.failed.is_empty());
    }
}
