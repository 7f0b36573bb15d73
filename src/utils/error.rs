use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected payload: {message}")]
    PayloadError { message: String },

    #[error("Schema compile error: {message}")]
    SchemaError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AuditError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AuditError::ApiError(_) => ErrorCategory::Network,
            AuditError::SerializationError(_) | AuditError::PayloadError { .. } => {
                ErrorCategory::Data
            }
            AuditError::IoError(_)
            | AuditError::ConfigError { .. }
            | AuditError::InvalidConfigValueError { .. }
            | AuditError::MissingConfigError { .. } => ErrorCategory::Config,
            AuditError::SchemaError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AuditError::ApiError(e) => format!("Could not fetch the breach feed: {}", e),
            AuditError::IoError(e) => format!("File access failed: {}", e),
            AuditError::SerializationError(e) => {
                format!("The breach feed did not contain valid JSON: {}", e)
            }
            AuditError::PayloadError { message } => {
                format!("The breach feed had an unexpected shape: {}", message)
            }
            AuditError::SchemaError { message } => {
                format!("Internal schema problem: {}", message)
            }
            AuditError::ConfigError { message } => format!("Configuration problem: {}", message),
            AuditError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Configuration value '{}' = '{}' is invalid: {}", field, value, reason),
            AuditError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required but missing", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Network => {
                "Check your network connection and that the endpoint URL is reachable, then retry"
                    .to_string()
            }
            ErrorCategory::Data => {
                "The upstream feed may have changed format; inspect the endpoint response manually"
                    .to_string()
            }
            ErrorCategory::Config => {
                "Review the command-line flags and the config file for typos or missing values"
                    .to_string()
            }
            ErrorCategory::System => {
                "This is a bug in breach-audit itself; please report it".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
