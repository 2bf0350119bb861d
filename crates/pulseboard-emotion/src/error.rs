use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmotionError {
    #[error("check-in text is empty")]
    BlankInput,

    #[error("classifier returned no scores")]
    EmptyDistribution,

    #[error("classifier failure: {0}")]
    Classifier(String),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EmotionError>;
