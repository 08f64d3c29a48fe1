use thiserror::Error;

/// Error types for the scorekit library.
#[derive(Error, Debug)]
pub enum ScoreKitError {
    /// Error raised by the parameter system (validation, bounds, lookup).
    #[error("Parameter error: {0}")]
    Parameter(#[from] crate::parameters::ParameterError),

    /// Error raised by a catalogue (duplicate or missing registration).
    #[error("Catalogue error: {0}")]
    Catalogue(#[from] crate::catalogue::CatalogueError),

    /// Error during evaluation of a utility function.
    #[error("Computation error: {0}")]
    Computation(String),

    /// Invalid input data supplied to a computation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for scorekit operations.
pub type Result<T> = std::result::Result<T, ScoreKitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScoreKitError::Computation("base must be greater than 1".to_string());
        assert!(format!("{}", err).contains("base must be greater than 1"));

        let err = ScoreKitError::InvalidInput("empty values".to_string());
        assert!(format!("{}", err).contains("empty values"));
    }

    #[test]
    fn test_error_conversion() {
        let param_err = crate::parameters::ParameterError::NotFound("w1".to_string());
        let err: ScoreKitError = param_err.into();

        match err {
            ScoreKitError::Parameter(_) => (),
            _ => panic!("Expected Parameter variant"),
        }
    }
}
