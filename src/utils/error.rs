use thiserror::Error;

#[derive(Error, Debug)]
pub enum FakeFileError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Template error in '{template}': {message}")]
    TemplateError { template: String, message: String },

    #[error("Cannot resolve '{path}': {reason}")]
    ResolveError { path: String, reason: String },

    #[error("{tool} failed: {message}")]
    ConverterError { tool: String, message: String },

    #[error("Invalid option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },

    #[error("Nothing to pick from: {message}")]
    EmptySource { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Resolution,
    Generation,
    Storage,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a failure of this severity; never zero.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl FakeFileError {
    pub fn invalid_option(option: &str, reason: impl Into<String>) -> Self {
        FakeFileError::InvalidOption {
            option: option.to_string(),
            reason: reason.into(),
        }
    }

    pub fn resolve(path: &str, reason: impl Into<String>) -> Self {
        FakeFileError::ResolveError {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub fn converter(tool: &str, message: impl Into<String>) -> Self {
        FakeFileError::ConverterError {
            tool: tool.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FakeFileError::ConfigError { .. }
            | FakeFileError::InvalidConfigValueError { .. }
            | FakeFileError::MissingConfigError { .. }
            | FakeFileError::TomlError(_)
            | FakeFileError::InvalidOption { .. } => ErrorCategory::Configuration,
            FakeFileError::ResolveError { .. } => ErrorCategory::Resolution,
            FakeFileError::ZipError(_)
            | FakeFileError::CsvError(_)
            | FakeFileError::SerializationError(_)
            | FakeFileError::ImageError(_)
            | FakeFileError::TemplateError { .. }
            | FakeFileError::EmptySource { .. } => ErrorCategory::Generation,
            FakeFileError::IoError(_) => ErrorCategory::Storage,
            FakeFileError::HttpError(_) | FakeFileError::ConverterError { .. } => {
                ErrorCategory::External
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Resolution => ErrorSeverity::High,
            ErrorCategory::Generation => ErrorSeverity::Medium,
            ErrorCategory::External => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Resolution => format!("Unknown provider or generator: {}", self),
            ErrorCategory::Generation => format!("Could not generate the file: {}", self),
            ErrorCategory::Storage => format!("Could not store the file: {}", self),
            ErrorCategory::External => format!("External converter failed: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FakeFileError::ResolveError { .. } => {
                "Run `fake-file list` to see the registered providers and generators"
            }
            FakeFileError::ConverterError { .. } => {
                "Make sure the external tool is installed and on PATH, or pick another generator"
            }
            FakeFileError::HttpError(_) => "Check that the text-to-speech endpoint is reachable",
            FakeFileError::IoError(_) => "Check that the storage root exists and is writable",
            FakeFileError::TemplateError { .. } => {
                "Only {{token}} placeholders known to the fake data source are allowed"
            }
            _ => match self.category() {
                ErrorCategory::Configuration => "Fix the offending option and try again",
                _ => "Re-run with --verbose for details",
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, FakeFileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = FakeFileError::resolve("fake_file::nope::Thing", "unknown module");
        assert_eq!(err.category(), ErrorCategory::Resolution);
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = FakeFileError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(err.user_friendly_message().contains("gone"));
    }

    #[test]
    fn test_every_error_exits_nonzero() {
        let errors = vec![
            FakeFileError::invalid_option("count", "must be positive"),
            FakeFileError::resolve("fake_file::nope::Thing", "unknown module"),
            FakeFileError::converter("wkhtmltopdf", "binary not found"),
            FakeFileError::EmptySource {
                message: "/tmp/empty is empty".to_string(),
            },
            FakeFileError::IoError(std::io::Error::new(std::io::ErrorKind::Other, "disk")),
        ];
        for err in errors {
            assert!(err.severity().exit_code() > 0, "{} exits with 0", err);
        }
        assert_eq!(ErrorSeverity::High.exit_code(), 1);
        assert_eq!(ErrorSeverity::Critical.exit_code(), 3);
    }

    #[test]
    fn test_converter_error_message() {
        let err = FakeFileError::converter("wkhtmltopdf", "binary not found");
        assert_eq!(err.to_string(), "wkhtmltopdf failed: binary not found");
        assert!(err.recovery_suggestion().contains("PATH"));
    }
}
