use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("questions document ended before a complete node record was read")]
    TruncatedDocument,

    #[error("input ended while waiting for a response to: {0}")]
    UnexpectedEof(String),

    #[error("tree node index no longer resolves in the arena")]
    DanglingNode,

    #[error("guessed leaf is not a child of the recorded parent node")]
    GraftTargetNotFound,

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
