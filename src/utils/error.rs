use crate::domain::model::Region;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShippingError {
    #[error("Invalid request: {field} {reason}")]
    InvalidRequest { field: String, reason: String },

    #[error("No region code found for country: {country_code}")]
    UnknownCountry { country_code: String },

    #[error("No shipping cost found for region: {region}")]
    UnknownRegion { region: Region },

    #[error("Invalid shipping rule: {reason}")]
    InvalidRule { reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad caller input; re-prompting is reasonable.
    Input,
    /// Rate tables or mappings are inconsistent.
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ShippingError {
    pub fn invalid_request(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRequest { .. } | Self::UnknownCountry { .. } => ErrorCategory::Input,
            Self::UnknownRegion { .. }
            | Self::InvalidRule { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::CsvError(_) => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidRequest { .. } | Self::UnknownCountry { .. } => ErrorSeverity::Medium,
            Self::InvalidRule { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::CsvError(_) => ErrorSeverity::High,
            Self::UnknownRegion { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Whether the caller can sensibly retry with different input.
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidRequest { field, reason } => {
                format!("The {} you entered is not valid: {}", field, reason)
            }
            Self::UnknownCountry { country_code } => {
                format!("We do not ship to '{}'", country_code)
            }
            Self::UnknownRegion { region } => {
                format!("Shipping rates for region {} are not configured", region)
            }
            Self::InvalidRule { reason } => format!("A shipping rate is invalid: {}", reason),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::CsvError(e) => format!("Could not read the country lookup file: {}", e),
            Self::SerializationError(e) => format!("Could not render the result: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => {
                "Enter a non-blank country code and a weight greater than 0"
            }
            Self::UnknownCountry { .. } => {
                "Pick one of the listed country codes (codes are case-sensitive)"
            }
            Self::UnknownRegion { .. } => {
                "Add a [rates.<REGION>] entry for this region to the rate configuration"
            }
            Self::InvalidRule { .. } => "Rates must be non-negative finite numbers",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the configuration file and command line arguments"
            }
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::CsvError(_) => "Lookup files need 'country_code,region_code' rows",
            Self::SerializationError(_) => "Try the text output format instead",
        }
    }
}

pub type Result<T> = std::result::Result<T, ShippingError>;
