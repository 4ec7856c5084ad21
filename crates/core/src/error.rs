use thiserror::Error;

#[derive(Debug, Error)]
pub enum EarningsError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Analysis error: {0}")]
    AnalysisError(String),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Data error: {0}")]
    DataError(String),
    #[error("Timed out after {0} ms")]
    Timeout(u64),
}

pub type Result<T> = std::result::Result<T, EarningsError>;

impl From<serde_json::Error> for EarningsError {
    fn from(err: serde_json::Error) -> Self {
        EarningsError::DataError(err.to_string())
    }
}

impl EarningsError {
    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, EarningsError::ValidationError(_) | EarningsError::DataError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EarningsError::ValidationError("transcript too short".into());
        assert_eq!(err.to_string(), "Validation error: transcript too short");
        assert_eq!(EarningsError::Timeout(250).to_string(), "Timed out after 250 ms");
    }

    #[test]
    fn test_from_serde_json() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: EarningsError = bad.into();
        assert!(matches!(err, EarningsError::DataError(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_client_error_classification() {
        assert!(!EarningsError::Timeout(10).is_client_error());
        assert!(!EarningsError::AnalysisError("join".into()).is_client_error());
    }
}
