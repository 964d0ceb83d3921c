use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaritimeError {
    #[error("Unknown port code: {code}")]
    InvalidPortCode { code: String },

    #[error("Invalid coordinate {field}={value}: {reason}")]
    InvalidCoordinate {
        field: String,
        value: String,
        reason: String,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Weather service unavailable: {message}")]
    WeatherUnavailable { message: String },

    #[error("Port table error: {message}")]
    PortTableError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Network,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MaritimeError {
    pub fn invalid_coordinate(field: &str, value: f64, reason: &str) -> Self {
        MaritimeError::InvalidCoordinate {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        MaritimeError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MaritimeError::InvalidPortCode { .. }
            | MaritimeError::InvalidCoordinate { .. }
            | MaritimeError::ValidationError { .. } => ErrorCategory::Input,
            MaritimeError::ConfigError { .. }
            | MaritimeError::ConfigValidationError { .. }
            | MaritimeError::InvalidConfigValueError { .. }
            | MaritimeError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MaritimeError::ApiError(_) | MaritimeError::WeatherUnavailable { .. } => {
                ErrorCategory::Network
            }
            MaritimeError::CsvError(_)
            | MaritimeError::SerializationError(_)
            | MaritimeError::PortTableError { .. } => ErrorCategory::Data,
            MaritimeError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Network failures are the only ones worth retrying unchanged.
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Network
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MaritimeError::InvalidPortCode { .. } => {
                "Use a UN/LOCODE from `maritime-ops ports` (e.g. SGSIN, NLRTM)".to_string()
            }
            MaritimeError::InvalidCoordinate { .. } => {
                "Latitude must lie in [-90, 90] and longitude in [-180, 180]".to_string()
            }
            MaritimeError::ApiError(_) | MaritimeError::WeatherUnavailable { .. } => {
                "Check network connectivity and the weather endpoint, then retry".to_string()
            }
            MaritimeError::CsvError(_) | MaritimeError::PortTableError { .. } => {
                "Check the port table: header must be code,name,country,lat,lon".to_string()
            }
            MaritimeError::IoError(_) => "Check that the file exists and is readable".to_string(),
            MaritimeError::SerializationError(_) => {
                "The response was not valid JSON for the expected shape".to_string()
            }
            MaritimeError::ConfigError { .. }
            | MaritimeError::ConfigValidationError { .. }
            | MaritimeError::InvalidConfigValueError { .. }
            | MaritimeError::MissingConfigError { .. } => {
                "Review the TOML settings file and environment variables".to_string()
            }
            MaritimeError::ValidationError { .. } => "Correct the input and try again".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MaritimeError::InvalidPortCode { code } => {
                format!("Port '{}' not found in database", code)
            }
            MaritimeError::ApiError(_) => "Could not reach the remote service".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MaritimeError>;
