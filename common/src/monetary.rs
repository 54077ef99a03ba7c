//! Monetary types for the Runway planner.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, RunwayError};
use crate::identifiers::CountryId;

/// ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code, normalized to upper case.
    ///
    /// No format check is applied; use [`Currency::parse`] for untrusted input.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    /// Parse and validate a three-letter ASCII currency code.
    pub fn parse(code: &str) -> Result<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RunwayError::InvalidCurrency(code.to_string()));
        }
        Ok(Self::new(code))
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Whether the code is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Common currencies
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn vnd() -> Self {
        Self::new("VND")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> Self {
        c.0
    }
}

/// A currency pair: one unit of `base` is worth some amount of `quote`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Currency being converted from.
    pub base: Currency,
    /// Local currency the rate is expressed in.
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create a new currency pair.
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Where a resolved exchange rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    /// Supplied by the caller.
    Override,
    /// Fetched from the live rate source.
    Live,
    /// Taken from the country's static fallback table.
    Fallback,
}

impl RateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateSource::Override => "override",
            RateSource::Live => "live",
            RateSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for RateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to convert savings into a destination country's currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Currency the savings are held in.
    pub from: Currency,
    /// Destination country.
    pub country: CountryId,
    /// Amount in `from` currency.
    pub amount: f64,
    /// Rate to use instead of a lookup, if any.
    pub override_rate: Option<f64>,
}

impl ConversionRequest {
    /// Create a new conversion request.
    pub fn new(from: Currency, country: CountryId, amount: f64) -> Self {
        Self {
            from,
            country,
            amount,
            override_rate: None,
        }
    }

    /// Use a caller-supplied rate.
    pub fn with_override_rate(mut self, rate: f64) -> Self {
        self.override_rate = Some(rate);
        self
    }
}

/// Outcome of a conversion: the local amount and the rate that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Converted amount in local currency, rounded to whole units.
    pub local_amount: i64,
    /// Local currency of the destination.
    pub local_currency: Currency,
    /// Local units per one unit of the source currency.
    pub rate: f64,
    /// Where `rate` came from.
    pub source: RateSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_normalizes_case() {
        assert_eq!(Currency::new(" usd ").code(), "USD");
        assert_eq!(Currency::from("vnd"), Currency::vnd());
    }

    #[test]
    fn test_currency_parse_rejects_bad_codes() {
        assert!(Currency::parse("eur").is_ok());
        assert!(matches!(
            Currency::parse(""),
            Err(RunwayError::InvalidCurrency(_))
        ));
        assert!(Currency::parse("EURO").is_err());
        assert!(Currency::parse("U5D").is_err());
    }

    #[test]
    fn test_currency_serde_is_plain_string() {
        let json = serde_json::to_string(&Currency::usd()).unwrap();
        assert_eq!(json, "\"USD\"");

        let parsed: Currency = serde_json::from_str("\"thb\"").unwrap();
        assert_eq!(parsed.code(), "THB");
    }

    #[test]
    fn test_rate_source_serializes_lowercase() {
        let json = serde_json::to_string(&RateSource::Fallback).unwrap();
        assert_eq!(json, "\"fallback\"");
        assert_eq!(RateSource::Override.to_string(), "override");
    }

    #[test]
    fn test_conversion_request_builder() {
        let request = ConversionRequest::new(Currency::usd(), CountryId::new("vn"), 1000.0)
            .with_override_rate(24_500.0);

        assert_eq!(request.country.as_str(), "vn");
        assert_eq!(request.override_rate, Some(24_500.0));
    }
}
