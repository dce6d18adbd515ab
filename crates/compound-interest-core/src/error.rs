use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompoundInterestError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CompoundInterestError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CompoundInterestError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(field: &str) -> Self {
        Self::invalid(field, "balance exceeds representable range")
    }
}

impl From<serde_json::Error> for CompoundInterestError {
    fn from(e: serde_json::Error) -> Self {
        CompoundInterestError::SerializationError(e.to_string())
    }
}
