/// Simplified error system - one flat enum shared by every layer.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    ValidationError(String),
    RenderingError(String),
    ConfigurationError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
            AppError::ConfigurationError(msg) => write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::ValidationError(error.to_string())
    }
}

// Simple convenience type aliases
pub type ValidationResult<T> = Result<T, AppError>;
pub type RenderingResult<T> = Result<T, AppError>;
pub type ConfigResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_the_kind() {
        let err = AppError::ValidationError("duplicate rate 100".into());
        assert_eq!(err.to_string(), "Validation Error: duplicate rate 100");

        let err = AppError::ConfigurationError("bidAskWidth must be positive".into());
        assert_eq!(
            err.to_string(),
            "Configuration Error: bidAskWidth must be positive"
        );
    }

    #[test]
    fn json_errors_become_validation_errors() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: AppError = parse.unwrap_err().into();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
