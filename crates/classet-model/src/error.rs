use thiserror::Error;

use crate::label::Label;

#[derive(Debug, Error)]
pub enum ClassError {
    #[error("{0} not in schema.")]
    UnknownLabel(Label),
    #[error("duplicate label in schema: {0}")]
    DuplicateLabel(Label),
    #[error("malformed update instruction: {0}")]
    MalformedInstruction(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClassError>;
