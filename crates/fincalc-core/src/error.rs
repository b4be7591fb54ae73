use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinCalcError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("numeric overflow in {context}")]
    Overflow { context: String },

    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl FinCalcError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FinCalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for validation failures the caller can fix by changing inputs.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, FinCalcError::InvalidInput { .. })
    }
}

impl From<serde_json::Error> for FinCalcError {
    fn from(e: serde_json::Error) -> Self {
        FinCalcError::SerializationError(e.to_string())
    }
}
