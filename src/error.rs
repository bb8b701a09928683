use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Invalid rank: {0}")]
    InvalidRank(char),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Invalid card notation: {0}")]
    InvalidCardNotation(String),

    #[error("Invalid board notation: {0}")]
    InvalidBoardNotation(String),

    #[error("A hold'em hand is exactly 2 cards: {0}")]
    InvalidHandNotation(String),

    #[error("Need at least {need} cards, got {got}")]
    NotEnoughCards { need: usize, got: usize },

    #[error("Cannot deal {requested} cards, only {available} remaining")]
    NotEnoughDeck { requested: usize, available: usize },

    #[error("Duplicate card: {0}")]
    DuplicateCard(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("No seat at index {0}")]
    NoSuchSeat(usize),

    #[error("Table needs 2-9 players, got {0}")]
    InvalidPlayerCount(usize),

    #[error("Record import failed: {0}")]
    RecordImport(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type CoachResult<T> = Result<T, CoachError>;
