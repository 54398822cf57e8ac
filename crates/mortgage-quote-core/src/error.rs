use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown province code: {0}")]
    UnknownProvince(String),

    #[error("Unknown term key: {0}")]
    UnknownTerm(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        QuoteError::SerializationError(e.to_string())
    }
}
