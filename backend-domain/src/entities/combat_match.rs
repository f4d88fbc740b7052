// Match entity
// All events parsed from one combat log

use serde::{Deserialize, Serialize};

use crate::entities::CombatEvent;
use crate::error::IngestError;
use crate::services::CombatLogParser;
use crate::value_objects::MatchId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatMatch {
    id: Option<MatchId>,
    events: Vec<CombatEvent>,
}

/// Line counts from one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub total: usize,
    pub skipped: usize,
}

impl CombatMatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a match that a repository has already stored.
    pub fn persisted(id: MatchId, events: Vec<CombatEvent>) -> Self {
        Self {
            id: Some(id),
            events,
        }
    }

    /// Scans every line of `raw` and keeps the ones the parser recognizes.
    /// A log without a single recognizable line is rejected.
    pub fn from_log(parser: &CombatLogParser, raw: &str) -> Result<(Self, LineStats), IngestError> {
        let mut combat_match = Self::new();
        let mut stats = LineStats::default();
        // `lines` covers `\n` and `\r\n`; a lone `\r` also ends a line
        for line in raw.lines().flat_map(|line| line.split('\r')) {
            stats.total += 1;
            if !combat_match.ingest_line(parser, line) {
                stats.skipped += 1;
            }
        }
        if combat_match.is_empty() {
            return Err(IngestError::NotParsable { lines: stats.total });
        }
        Ok((combat_match, stats))
    }

    /// Returns whether the line produced an event.
    pub fn ingest_line(&mut self, parser: &CombatLogParser, line: &str) -> bool {
        match parser.classify(line) {
            Some(event) => {
                self.events.push(event);
                true
            }
            None => false,
        }
    }

    pub fn id(&self) -> Option<MatchId> {
        self.id
    }

    pub fn with_id(self, id: MatchId) -> Self {
        Self {
            id: Some(id),
            events: self.events,
        }
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
