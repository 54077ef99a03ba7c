//! Error types for Runway reference data.

use thiserror::Error;

use crate::identifiers::CountryId;

/// Main error type for loading and querying reference data.
#[derive(Error, Debug)]
pub enum RunwayError {
    /// Currency code is not three ASCII letters.
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// Country is not present in the catalog.
    #[error("Unknown country: {0}")]
    UnknownCountry(CountryId),

    /// A country profile failed validation.
    #[error("Configuration error in country {country}: {reason}")]
    InvalidProfile { country: CountryId, reason: String },

    /// The catalog as a whole is unusable.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Reference data could not be decoded.
    #[error("Malformed reference data: {0}")]
    MalformedData(#[from] serde_json::Error),

    /// Reference data could not be read.
    #[error("Failed to read reference data: {0}")]
    Io(#[from] std::io::Error),
}

impl RunwayError {
    /// Whether the error stems from setup rather than caller input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RunwayError::InvalidProfile { .. }
                | RunwayError::ConfigurationError(_)
                | RunwayError::MalformedData(_)
                | RunwayError::Io(_)
        )
    }

    /// Get a stable error code for reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            RunwayError::InvalidCurrency(_) => "INVALID_CURRENCY",
            RunwayError::UnknownCountry(_) => "UNKNOWN_COUNTRY",
            RunwayError::InvalidProfile { .. } => "INVALID_PROFILE",
            RunwayError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            RunwayError::MalformedData(_) => "MALFORMED_DATA",
            RunwayError::Io(_) => "IO_ERROR",
        }
    }
}

/// Result type alias for Runway reference-data operations.
pub type Result<T> = std::result::Result<T, RunwayError>;
