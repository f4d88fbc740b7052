use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    ingest_requests: AtomicU64,
    ingest_events: AtomicU64,
    skipped_lines: AtomicU64,
    rejected_logs: AtomicU64,
    ingest_errors: AtomicU64,
    query_requests: AtomicU64,
}

impl Metrics {
    /// Counted for every ingestion attempt, whatever its outcome.
    pub fn record_ingest_request(&self) {
        self.ingest_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ingest(&self, event_count: usize, skipped_lines: usize) {
        self.ingest_events
            .fetch_add(event_count as u64, Ordering::Relaxed);
        self.skipped_lines
            .fetch_add(skipped_lines as u64, Ordering::Relaxed);
    }

    pub fn record_rejected_log(&self) {
        self.rejected_logs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ingest_error(&self) {
        self.ingest_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_query(&self) {
        self.query_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let requests = self.ingest_requests.load(Ordering::Relaxed);
        let events = self.ingest_events.load(Ordering::Relaxed);
        let skipped = self.skipped_lines.load(Ordering::Relaxed);
        let rejected = self.rejected_logs.load(Ordering::Relaxed);
        let errors = self.ingest_errors.load(Ordering::Relaxed);
        let queries = self.query_requests.load(Ordering::Relaxed);

        format!(
            "# TYPE combatlog_ingest_requests_total counter\n\
combatlog_ingest_requests_total {}\n\
# TYPE combatlog_ingest_events_total counter\n\
combatlog_ingest_events_total {}\n\
# TYPE combatlog_skipped_lines_total counter\n\
combatlog_skipped_lines_total {}\n\
# TYPE combatlog_rejected_logs_total counter\n\
combatlog_rejected_logs_total {}\n\
# TYPE combatlog_ingest_errors_total counter\n\
combatlog_ingest_errors_total {}\n\
# TYPE combatlog_query_requests_total counter\n\
combatlog_query_requests_total {}\n",
            requests, events, skipped, rejected, errors, queries
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_recorded_counters() {
        let metrics = Metrics::default();
        for _ in 0..3 {
            metrics.record_ingest_request();
        }
        metrics.record_ingest(4, 2);
        metrics.record_ingest(1, 0);
        metrics.record_rejected_log();
        metrics.record_query();

        let rendered = metrics.render_prometheus();
        assert!(rendered.contains("combatlog_ingest_requests_total 3\n"));
        assert!(rendered.contains("combatlog_ingest_events_total 5\n"));
        assert!(rendered.contains("combatlog_skipped_lines_total 2\n"));
        assert!(rendered.contains("combatlog_rejected_logs_total 1\n"));
        assert!(rendered.contains("combatlog_ingest_errors_total 0\n"));
        assert!(rendered.contains("combatlog_query_requests_total 1\n"));
    }
}
