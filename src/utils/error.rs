use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API rejected the request ({status}): {body}")]
    RemoteRejectedError { status: u16, body: String },

    #[error("Malformed API response: {message}")]
    MalformedResponseError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing input: {message}")]
    IncompleteInputError { message: String },

    #[error("Unsupported image format: {path}")]
    UnsupportedImageFormatError { path: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

impl AuditError {
    /// Short message suitable for stderr, without internal detail.
    pub fn user_friendly_message(&self) -> String {
        match self {
            AuditError::ApiError(e) => format!("Could not reach the model endpoint: {}", e),
            AuditError::RemoteRejectedError { status, .. } => {
                format!("The model endpoint rejected the request (HTTP {})", status)
            }
            AuditError::MalformedResponseError { .. } => {
                "The model endpoint returned an unreadable response".to_string()
            }
            AuditError::IncompleteInputError { message } => {
                format!("Both a table and an image are required: {}", message)
            }
            AuditError::UnsupportedImageFormatError { path } => {
                format!("Only png/jpg/jpeg images are supported: {}", path)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AuditError::ApiError(_) => {
                "Check network connectivity and the endpoint URL, then re-run"
            }
            AuditError::RemoteRejectedError { status: 401, .. } => {
                "Check that OPENAI_API_KEY (or --api-key) holds a valid credential"
            }
            AuditError::RemoteRejectedError { .. } | AuditError::MalformedResponseError { .. } => {
                "Re-run the audit; the previous attempt is not retried automatically"
            }
            AuditError::IncompleteInputError { .. } => {
                "Provide the table text (file or stdin) and an image path"
            }
            AuditError::UnsupportedImageFormatError { .. } => {
                "Convert the screenshot to png or jpeg first"
            }
            AuditError::MissingConfigError { .. }
            | AuditError::InvalidConfigValueError { .. }
            | AuditError::ConfigValidationError { .. } => "Fix the configuration value and re-run",
            _ => "Re-run with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
