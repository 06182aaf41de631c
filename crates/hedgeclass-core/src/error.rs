use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("expected {expected} scores, got {got}")]
    ScoreCount { expected: usize, got: usize },

    #[error("label table key is not an integer id: {0:?}")]
    InvalidLabelKey(String),

    #[error("unknown label id: {0}")]
    UnknownLabelId(i64),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
