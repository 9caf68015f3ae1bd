use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Registry request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Registry returned status {status} for {context}")]
    RegistryStatusError { status: u16, context: String },

    #[error("Please enter a search term")]
    MissingSearchTerm,

    #[error("No companies found matching your search criteria")]
    NoCompaniesFound,

    #[error("Email generation service is not configured")]
    EmailNotConfigured,

    #[error("Failed to generate email: {message}")]
    EmailDraftError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Company name is required")]
    MissingCompanyName,

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, ScoutError>;

/// 錯誤嚴重度，對應 CLI 退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Network,
    Data,
    Io,
}

impl ScoutError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 查無結果不算故障
            ScoutError::NoCompaniesFound => ErrorSeverity::Low,
            ScoutError::MissingSearchTerm | ScoutError::MissingCompanyName => ErrorSeverity::Medium,
            ScoutError::ApiError(_)
            | ScoutError::RegistryStatusError { .. }
            | ScoutError::EmailDraftError { .. }
            | ScoutError::ProcessingError { .. }
            | ScoutError::SerializationError(_)
            | ScoutError::CsvError(_)
            | ScoutError::IoError(_) => ErrorSeverity::High,
            ScoutError::EmailNotConfigured
            | ScoutError::ConfigValidationError { .. }
            | ScoutError::MissingConfigError { .. }
            | ScoutError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoutError::MissingSearchTerm
            | ScoutError::MissingCompanyName
            | ScoutError::NoCompaniesFound => ErrorCategory::Input,
            ScoutError::ApiError(_) | ScoutError::RegistryStatusError { .. } => {
                ErrorCategory::Network
            }
            ScoutError::EmailNotConfigured
            | ScoutError::ConfigValidationError { .. }
            | ScoutError::MissingConfigError { .. }
            | ScoutError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ScoutError::IoError(_) => ErrorCategory::Io,
            ScoutError::CsvError(_)
            | ScoutError::SerializationError(_)
            | ScoutError::EmailDraftError { .. }
            | ScoutError::ProcessingError { .. } => ErrorCategory::Data,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScoutError::MissingSearchTerm => {
                "Pass a search term with --term or set one in the config file"
            }
            ScoutError::MissingCompanyName => "Pass the company name with --company-name",
            ScoutError::NoCompaniesFound => {
                "Try a broader search term (see --list-terms for suggestions)"
            }
            ScoutError::ApiError(_) | ScoutError::RegistryStatusError { .. } => {
                "Check network connectivity and the registry API status, then retry"
            }
            ScoutError::EmailNotConfigured => {
                "Set OPENAI_API_KEY or fill in the [email] config section"
            }
            ScoutError::MissingConfigError { .. } => {
                "Set COMPANIES_HOUSE_API_KEY or provide the value in the config file"
            }
            ScoutError::ConfigValidationError { .. }
            | ScoutError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            ScoutError::IoError(_) => "Check that the output path exists and is writable",
            _ => "Re-run with --verbose and inspect the logs",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            // 這幾類訊息直接呈現給使用者，沿用對外 API 的措辭
            ScoutError::MissingSearchTerm
            | ScoutError::MissingCompanyName
            | ScoutError::NoCompaniesFound
            | ScoutError::EmailNotConfigured => self.to_string(),
            ScoutError::MissingConfigError { field } => {
                format!("Configuration is incomplete: {} is not set", field)
            }
            other => format!("Search failed: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_a_fault() {
        let err = ScoutError::NoCompaniesFound;
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(
            err.user_friendly_message(),
            "No companies found matching your search criteria"
        );
    }

    #[test]
    fn test_missing_term_wording() {
        let err = ScoutError::MissingSearchTerm;
        assert_eq!(err.to_string(), "Please enter a search term");
        assert_eq!(err.category(), ErrorCategory::Input);
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = ScoutError::MissingConfigError {
            field: "registry.api_key".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
