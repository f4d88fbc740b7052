use thiserror::Error;

use backend_domain::{IngestError, MatchId};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not parse any entry")]
    NotParsable,
    #[error("match {0} not found")]
    MatchNotFound(MatchId),
    #[error("no result for hero '{hero}'")]
    NoResult { hero: String },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<IngestError> for AppError {
    fn from(value: IngestError) -> Self {
        match value {
            IngestError::NotParsable { .. } => AppError::NotParsable,
        }
    }
}
