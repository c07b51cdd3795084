use thiserror::Error;

/// Field-level validation failure surfaced to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Option<String>,
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// Failure attached to a specific form field.
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Standard failure for an absent required field.
    pub fn missing(field: &str, label: &str) -> Self {
        Self::for_field(field, format!("{label} is required"))
    }
}

/// Failures of the simulated avatar upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("An upload is already in progress")]
    InFlight,
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("File is too large ({size} bytes, limit {limit} bytes)")]
    TooLarge { size: usize, limit: usize },
    #[error("Upload failed: {0}")]
    Failed(String),
}

/// Error type that captures console-level failures.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_the_field() {
        let err = ValidationError::missing("startDate", "Start date");
        assert_eq!(err.field.as_deref(), Some("startDate"));
        assert_eq!(err.to_string(), "Start date is required");
    }

    #[test]
    fn validation_converts_into_console_error() {
        let err: ConsoleError = ValidationError::new("bad").into();
        assert!(matches!(err, ConsoleError::Validation(_)));
    }
}
