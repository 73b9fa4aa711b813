use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YtmError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for YtmError {
    fn from(e: serde_json::Error) -> Self {
        YtmError::SerializationError(e.to_string())
    }
}
