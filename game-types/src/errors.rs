use thiserror::Error;

/// Recoverable lookup failures on the live game session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid category: {0}")]
    UnknownCategory(String),
    #[error("no emoji for category: {0}")]
    MissingEmoji(String),
}

/// Failures converting one raw word-source row into a `WordRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowParseError {
    #[error("invalid row format: expected at least {expected} cells, got {got}")]
    TooFewCells { expected: usize, got: usize },
    #[error("no valid categories parsed from the row")]
    NoValidCategories,
}

/// Failures choosing today's row index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("word source has no rows")]
    NoWords,
}
