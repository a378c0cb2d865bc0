use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimplifierError {
    #[error("Backend request failed: {0}")]
    BackendError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Capability unavailable: {reason}")]
    CapabilityUnavailable { reason: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Backend,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SimplifierError {
    pub fn processing(message: impl Into<String>) -> Self {
        Self::ProcessingError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::BackendError(_) | Self::CapabilityUnavailable { .. } => ErrorCategory::Backend,
            Self::ProcessingError { .. } | Self::SerializationError(_) => {
                ErrorCategory::Processing
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 後端失敗一律回退到規則引擎，不影響使用者
            Self::CapabilityUnavailable { .. } | Self::BackendError(_) => ErrorSeverity::Low,
            Self::ProcessingError { .. } | Self::SerializationError(_) => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Backend => "The smart rewrite backend is not available.".to_string(),
            ErrorCategory::Processing => {
                "Something went wrong processing your text. Please try again.".to_string()
            }
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingConfigError { .. } => "Add the missing field to the config file",
            Self::ConfigValidationError { .. } | Self::ConfigError { .. } => {
                "Check the TOML syntax of the config file"
            }
            Self::InvalidConfigValueError { .. } => "Fix the highlighted config value",
            Self::BackendError(_) | Self::CapabilityUnavailable { .. } => {
                "Start the backend or run with --no-backend"
            }
            Self::ProcessingError { .. } | Self::SerializationError(_) => {
                "Select the text again and retry"
            }
            Self::IoError(_) => "Check that the input file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, SimplifierError>;
