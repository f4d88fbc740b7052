use thiserror::Error;

/// Failure to turn a single log line, or a stored value, into a typed event.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),
    #[error("invalid number '{value}' for {field}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("unknown event kind '{0}'")]
    UnknownEventKind(String),
    #[error("missing {field} for {kind} event")]
    MissingField { kind: &'static str, field: &'static str },
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not parse any entry from {lines} lines")]
    NotParsable { lines: usize },
}
