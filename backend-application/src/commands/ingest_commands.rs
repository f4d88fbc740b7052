use tracing::{error, info, warn};

use crate::AppState;
use backend_domain::{CombatMatch, MatchId};
use crate::AppError;

pub async fn ingest_combat_log(state: &AppState, raw: &str) -> Result<MatchId, AppError> {
    state.metrics.record_ingest_request();
    let (combat_match, stats) = match CombatMatch::from_log(&state.parser, raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            state.metrics.record_rejected_log();
            warn!("combat log rejected: {}", err);
            return Err(err.into());
        }
    };

    let event_count = combat_match.len();
    let match_id = state.match_repo.save(combat_match).await.map_err(|err| {
        state.metrics.record_ingest_error();
        error!(events = event_count, "failed to store match: {:?}", err);
        AppError::Internal(err)
    })?;

    state.metrics.record_ingest(event_count, stats.skipped);
    info!(
        match_id = %match_id,
        events = event_count,
        lines = stats.total,
        skipped = stats.skipped,
        "combat log ingested"
    );
    Ok(match_id)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{test_state, FakeMatchRepository, SAMPLE_LOG};

    #[tokio::test]
    async fn ingest_stores_match_and_returns_new_id() {
        let repo = Arc::new(FakeMatchRepository::default());
        let state = test_state(repo.clone());

        let first = ingest_combat_log(&state, SAMPLE_LOG).await.expect("ingest");
        let second = ingest_combat_log(&state, SAMPLE_LOG).await.expect("ingest");
        assert_ne!(first, second);
        assert_eq!(repo.stored().await, 2);

        let stored = state
            .match_repo
            .find_by_id(first)
            .await
            .expect("lookup")
            .expect("stored match");
        assert_eq!(stored.id(), Some(first));
        assert_eq!(stored.len(), 4);
    }

    #[tokio::test]
    async fn unparsable_log_is_rejected_without_storing() {
        let repo = Arc::new(FakeMatchRepository::default());
        let state = test_state(repo.clone());

        let err = ingest_combat_log(&state, "nothing to see\nhere\n")
            .await
            .expect_err("reject");
        assert!(matches!(err, AppError::NotParsable));
        assert_eq!(repo.stored().await, 0);
        let rendered = state.metrics.render_prometheus();
        assert!(rendered.contains("combatlog_rejected_logs_total 1\n"));
        assert!(rendered.contains("combatlog_ingest_requests_total 1\n"));
    }

    #[tokio::test]
    async fn storage_failure_is_internal() {
        let repo = Arc::new(FakeMatchRepository::default());
        repo.fail.store(true, Ordering::SeqCst);
        let state = test_state(repo);

        let err = ingest_combat_log(&state, SAMPLE_LOG).await.expect_err("fail");
        assert!(matches!(err, AppError::Internal(_)));
        let rendered = state.metrics.render_prometheus();
        assert!(rendered.contains("combatlog_ingest_requests_total 1\n"));
        assert!(rendered.contains("combatlog_ingest_errors_total 1\n"));
    }
}
