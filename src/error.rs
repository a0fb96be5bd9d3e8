//! Unified error hierarchy for RacePace
//!
//! Provides structured error information for the prediction engine and the
//! surfaces that consume it, with integration into the tracing system.

use thiserror::Error;

/// Top-level error type for all RacePace operations
#[derive(Debug, Error)]
pub enum RacePaceError {
    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Calculation errors
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Time or pace input that could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering results as CSV or JSON failed
    #[error("Export error: {0}")]
    Export(String),

    /// Errors reported by an external collaborator (store, geocoder, session)
    #[error("Collaborator error: {0}")]
    Collaborator(String),
}

/// Calculation errors
#[derive(Debug, Error, PartialEq)]
pub enum CalculationError {
    /// Invalid parameter
    #[error("Invalid parameter for {calculation}: {parameter}={value}")]
    InvalidParameter {
        calculation: String,
        parameter: String,
        value: String,
    },
}

impl CalculationError {
    pub fn invalid(
        calculation: impl Into<String>,
        parameter: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        CalculationError::InvalidParameter {
            calculation: calculation.into(),
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }
}

/// Result type alias for RacePace operations
pub type Result<T> = std::result::Result<T, RacePaceError>;

impl From<csv::Error> for RacePaceError {
    fn from(err: csv::Error) -> Self {
        RacePaceError::Export(err.to_string())
    }
}

impl From<serde_json::Error> for RacePaceError {
    fn from(err: serde_json::Error) -> Self {
        RacePaceError::Export(err.to_string())
    }
}

impl RacePaceError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RacePaceError::Validation(_) => ErrorSeverity::Warning,
            RacePaceError::Parse(_) => ErrorSeverity::Warning,
            RacePaceError::Calculation(CalculationError::InvalidParameter { .. }) => {
                ErrorSeverity::Warning
            }
            RacePaceError::Configuration(_) => ErrorSeverity::Error,
            RacePaceError::Collaborator(_) => ErrorSeverity::Error,
            RacePaceError::Export(_) => ErrorSeverity::Error,
            RacePaceError::Io(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RacePaceError::Calculation(CalculationError::InvalidParameter {
                parameter,
                value,
                ..
            }) => {
                format!("The value {} for {} cannot be used. Please check your input.", value, parameter)
            }
            RacePaceError::Parse(input) => {
                format!("Could not read '{}' as a time. Use M:SS or H:MM:SS.", input)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = RacePaceError::Calculation(CalculationError::invalid(
            "weight_sensitivity",
            "weight_kg",
            0.0,
        ));
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = RacePaceError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_user_messages() {
        let err: RacePaceError = CalculationError::invalid("energy", "weight_kg", -3).into();
        assert!(err.user_message().contains("weight_kg"));
        assert!(err.to_string().contains("Invalid parameter for energy"));

        let err = RacePaceError::Parse("abc".to_string());
        assert!(err.user_message().contains("M:SS"));
    }
}
