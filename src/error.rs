use thiserror::Error;

use crate::action::ActionError;

#[derive(Error, Debug)]
pub enum ShuffleError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Action Error: {0}")]
    Action(#[from] ActionError),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ShuffleResult<T> = Result<T, ShuffleError>;
