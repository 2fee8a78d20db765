//! SDK error types

use proxylint_core::ConditionError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Condition failed to tokenize or parse
    #[error("Condition error: {0}")]
    ConditionError(#[from] ConditionError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed YAML configuration
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Report serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use proxylint_core::ParseError;
    use proxylint_core::Expected;

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("unknown severity 'fatal'".to_string());
        assert_eq!(error.to_string(), "Configuration error: unknown severity 'fatal'");
    }

    #[test]
    fn test_condition_error_conversion() {
        let parse = ParseError::end_of_input(2, Expected::ClosingParenthesis);
        let error: SdkError = ConditionError::from(parse).into();
        assert_eq!(
            error.to_string(),
            "Condition error: Unexpected end of input at position 2. Expecting: CLOSING_PARENTHESIS"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let sdk_error: SdkError = io_error.into();
        assert!(sdk_error.to_string().contains("I/O error"));
        assert!(sdk_error.to_string().contains("File not found"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<Vec<String>>("{ not: [a list").unwrap_err();
        let sdk_error: SdkError = yaml_error.into();
        assert!(sdk_error.to_string().starts_with("YAML error: "));
    }

    #[test]
    fn test_error_debug_format() {
        let error = SdkError::ConfigError("test".to_string());
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("ConfigError"));
    }
}
