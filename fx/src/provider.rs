//! Rate provider trait and implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use runway_common::CurrencyPair;
use serde::{Deserialize, Serialize};

use crate::error::{LookupError, LookupResult};

/// A rate obtained from a live source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveQuote {
    /// The currency pair.
    pub pair: CurrencyPair,
    /// Units of `pair.quote` per one unit of `pair.base`.
    pub rate: f64,
    /// Name of the provider that answered.
    pub provider: String,
    /// When the source last updated this rate.
    pub quoted_at: DateTime<Utc>,
}

impl LiveQuote {
    /// Create a quote stamped with the current time.
    pub fn new(pair: CurrencyPair, rate: f64, provider: impl Into<String>) -> Self {
        Self {
            pair,
            rate,
            provider: provider.into(),
            quoted_at: Utc::now(),
        }
    }

    /// Set the source's own update time.
    pub fn quoted_at(mut self, at: DateTime<Utc>) -> Self {
        self.quoted_at = at;
        self
    }
}

/// Trait for live FX rate sources.
///
/// Implementations report every failure as a [`LookupError`]; they do not
/// retry and do not fall back.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Get the rate for a currency pair.
    async fn get_rate(&self, pair: &CurrencyPair) -> LookupResult<LiveQuote>;
}

/// Provider with no live source; every lookup fails.
///
/// Used for offline operation, where only fallback tables are consulted.
#[derive(Debug, Clone, Default)]
pub struct UnavailableRateProvider;

#[async_trait]
impl RateProvider for UnavailableRateProvider {
    fn name(&self) -> &str {
        "OFFLINE"
    }

    async fn get_rate(&self, _pair: &CurrencyPair) -> LookupResult<LiveQuote> {
        Err(LookupError::Unavailable("offline mode".to_string()))
    }
}

/// Scripted rate provider for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct StaticRateProvider {
    name: String,
    outcomes: dashmap::DashMap<String, LookupResult<f64>>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl StaticRateProvider {
    /// Create a new provider that knows no pairs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcomes: dashmap::DashMap::new(),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Answer lookups for `pair` with `rate`.
    ///
    /// The rate is returned as-is, so unusable values can be scripted too.
    pub fn set_rate(&self, pair: &CurrencyPair, rate: f64) {
        self.outcomes.insert(pair.to_string(), Ok(rate));
    }

    /// Fail lookups for `pair` with `error`.
    pub fn set_failure(&self, pair: &CurrencyPair, error: LookupError) {
        self.outcomes.insert(pair.to_string(), Err(error));
    }

    /// Number of lookups performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateProvider for StaticRateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_rate(&self, pair: &CurrencyPair) -> LookupResult<LiveQuote> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        let outcome = self
            .outcomes
            .get(&pair.to_string())
            .map(|o| o.clone())
            .unwrap_or_else(|| Err(LookupError::RateMissing(pair.clone())));

        outcome.map(|rate| LiveQuote::new(pair.clone(), rate, self.name.clone()))
    }
}
