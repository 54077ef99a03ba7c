//! FX error types.

use runway_common::{CountryId, Currency, CurrencyPair};
use thiserror::Error;

/// Reasons a live rate lookup produced no usable rate.
///
/// These never reach the caller of [`crate::RateResolver::resolve_rate`] as
/// errors; they select the fallback path and are kept on the resolved rate
/// for disclosure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    /// Request could not be sent or the connection failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request did not complete within the I/O timeout.
    #[error("Rate lookup timed out")]
    TimedOut,

    /// Rate source answered with a non-success status.
    #[error("Rate source returned HTTP {0}")]
    Status(u16),

    /// Response body could not be understood.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Response did not contain a rate for the pair.
    #[error("Rate not available for {0}")]
    RateMissing(CurrencyPair),

    /// Response contained a rate that is zero, negative or not finite.
    #[error("Unusable rate {value} for {pair}")]
    InvalidRate { pair: CurrencyPair, value: f64 },

    /// No live source is configured, or the lookup was abandoned.
    #[error("Rate source unavailable: {0}")]
    Unavailable(String),
}

/// Errors reported to callers of the FX layer.
#[derive(Debug, Error)]
pub enum FxError {
    /// Source currency code was empty.
    #[error("Source currency must not be empty")]
    EmptyCurrency,

    /// Country has neither the requested currency nor USD in its table.
    #[error("No fallback rate for {currency} in country {country}")]
    NoFallbackRate {
        country: CountryId,
        currency: Currency,
    },

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Provider configuration is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;

/// Result type for a single live lookup.
pub type LookupResult<T> = Result<T, LookupError>;
