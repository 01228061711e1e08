use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProspectorError {
    #[error("Registry request failed: {message}")]
    Http { message: String },

    #[error("Registry returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid search query: {message}")]
    InvalidQuery { message: String },

    #[error("Unknown extraction option: {name}")]
    UnknownExtractor { name: String },

    #[error("Unknown organization category: {name}")]
    UnknownCategory { name: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Nothing to export")]
    NothingToExport,

    #[error("Export failed: {message}")]
    Export { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Operation was cancelled by user")]
    Cancelled,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ProspectorError {
    fn user_message(&self) -> String {
        match self {
            ProspectorError::Http { message } => {
                format!("Registry request failed: {}", message)
            }
            ProspectorError::Api { status, message } => {
                format!("Registry rejected the request ({}): {}", status, message)
            }
            ProspectorError::InvalidQuery { message } => {
                format!("Invalid search query: {}", message)
            }
            ProspectorError::UnknownExtractor { name } => {
                format!("Unknown extraction option: {}", name)
            }
            ProspectorError::UnknownCategory { name } => {
                format!("Unknown organization category: {}", name)
            }
            ProspectorError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            ProspectorError::NothingToExport => "There is no data to export".to_string(),
            ProspectorError::Export { message } => {
                format!("Export failed: {}", message)
            }
            ProspectorError::Cancelled => "Operation was cancelled by user".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ProspectorError::Http { .. } => Some(
                "Check your internet connection and try again. The registry might be temporarily unavailable.".to_string(),
            ),
            ProspectorError::Api { .. } => Some(
                "The registry rejected the query. Check that statuses and phases use registry spellings (e.g. RECRUITING, PHASE2).".to_string(),
            ),
            ProspectorError::InvalidQuery { .. } => Some(
                "Provide at least one non-empty keyword, e.g.: trialscout \"CAR-T therapy\"".to_string(),
            ),
            ProspectorError::UnknownExtractor { .. } => Some(
                "Run trialscout --list-extractors to see the available extraction options.".to_string(),
            ),
            ProspectorError::UnknownCategory { .. } => Some(
                "Run trialscout --list-categories to see the organization taxonomy.".to_string(),
            ),
            ProspectorError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string(),
            ),
            ProspectorError::NothingToExport => Some(
                "The search returned no records that passed the organization filter. Broaden the keywords or relax the category filters.".to_string(),
            ),
            ProspectorError::Export { .. } => Some(
                "Ensure the output directory is writable and the file is not open in another program.".to_string(),
            ),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProspectorError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            ProspectorError::Api {
                status: status.as_u16(),
                message: error.to_string(),
            }
        } else {
            ProspectorError::Http {
                message: error.to_string(),
            }
        }
    }
}

impl From<csv::Error> for ProspectorError {
    fn from(error: csv::Error) -> Self {
        ProspectorError::Export {
            message: error.to_string(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for ProspectorError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        ProspectorError::Export {
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for ProspectorError {
    fn from(error: toml::de::Error) -> Self {
        ProspectorError::Config {
            message: error.to_string(),
        }
    }
}

impl From<url::ParseError> for ProspectorError {
    fn from(error: url::ParseError) -> Self {
        ProspectorError::Config {
            message: format!("invalid URL: {}", error),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProspectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = ProspectorError::InvalidQuery {
            message: "keyword list is empty".to_string(),
        };
        assert!(error.user_message().contains("Invalid search query"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_nothing_to_export_has_suggestion() {
        let error = ProspectorError::NothingToExport;
        assert_eq!(error.user_message(), "There is no data to export");
        assert!(error.suggestion().unwrap().contains("organization filter"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = ProspectorError::from(io_error);
        assert!(matches!(error, ProspectorError::Io(_)));
    }
}
