//! Live rate lookup over HTTP.
//!
//! Talks to an open exchange-rate API of the shape
//! `GET {base_url}/latest/{BASE}` answering
//! `{"result": "success", "base_code": "USD", "rates": {"VND": 25000.0, ...}}`.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use runway_common::{Currency, CurrencyPair};
use serde::Deserialize;
use tracing::debug;

use crate::error::{FxError, FxResult, LookupError, LookupResult};
use crate::provider::{LiveQuote, RateProvider};

/// Configuration for the HTTP rate provider.
#[derive(Debug, Clone)]
pub struct HttpRateProviderConfig {
    /// Base URL of the rate API.
    pub base_url: String,
    /// Timeout for a whole lookup.
    pub timeout: Duration,
    /// User agent sent with each request.
    pub user_agent: String,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for HttpRateProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://open.er-api.com/v6".to_string(),
            timeout: Duration::from_secs(5),
            user_agent: concat!("runway/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }
}

impl HttpRateProviderConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("RUNWAY_RATES_URL") {
            config.base_url = url;
        }

        if let Ok(ms) = std::env::var("RUNWAY_RATES_TIMEOUT_MS") {
            if let Ok(ms) = ms.parse() {
                config.timeout = Duration::from_millis(ms);
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Rate API base URL cannot be empty".to_string());
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!("Rate API base URL must be http(s): {}", self.base_url));
        }

        if self.timeout.is_zero() {
            return Err("Rate lookup timeout cannot be 0".to_string());
        }

        Ok(())
    }
}

/// Rate provider backed by an HTTP exchange-rate API.
pub struct HttpRateProvider {
    client: reqwest::Client,
    config: HttpRateProviderConfig,
}

impl HttpRateProvider {
    /// Create a new provider.
    pub fn new(config: HttpRateProviderConfig) -> FxResult<Self> {
        config.validate().map_err(FxError::Configuration)?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| FxError::HttpClient(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// The base code goes into the URL path, so only a well-formed
    /// three-letter code is accepted.
    fn endpoint(&self, pair: &CurrencyPair) -> LookupResult<String> {
        let base = Currency::parse(pair.base.code()).map_err(|_| {
            LookupError::Malformed(format!("invalid base currency code {:?}", pair.base.code()))
        })?;

        Ok(format!(
            "{}/latest/{}",
            self.config.base_url.trim_end_matches('/'),
            base.code()
        ))
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn get_rate(&self, pair: &CurrencyPair) -> LookupResult<LiveQuote> {
        let endpoint = self.endpoint(pair)?;
        debug!(endpoint = %endpoint, pair = %pair, "Requesting live rate");

        let resp = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = resp.text().await.map_err(transport_error)?;

        parse_latest_rates(&body, pair, self.name())
    }
}

fn transport_error(err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        LookupError::TimedOut
    } else {
        LookupError::Transport(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    base_code: Option<String>,
    #[serde(default)]
    time_last_update_unix: Option<i64>,
    rates: HashMap<String, serde_json::Value>,
}

/// Extract the rate for `pair` from a latest-rates payload.
pub fn parse_latest_rates(
    body: &str,
    pair: &CurrencyPair,
    provider: &str,
) -> LookupResult<LiveQuote> {
    let payload: LatestRatesResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Malformed(e.to_string()))?;

    if let Some(result) = payload.result.as_deref() {
        if result != "success" {
            return Err(LookupError::Malformed(format!(
                "rate source reported result {result:?}"
            )));
        }
    }

    if let Some(base) = payload.base_code.as_deref() {
        if !base.eq_ignore_ascii_case(pair.base.code()) {
            return Err(LookupError::Malformed(format!(
                "expected rates based on {}, got {base}",
                pair.base
            )));
        }
    }

    let value = payload
        .rates
        .get(pair.quote.code())
        .ok_or_else(|| LookupError::RateMissing(pair.clone()))?;

    let rate = value.as_f64().ok_or_else(|| {
        LookupError::Malformed(format!("rate for {} is not a number: {value}", pair.quote))
    })?;

    if !rate.is_finite() || rate <= 0.0 {
        return Err(LookupError::InvalidRate {
            pair: pair.clone(),
            value: rate,
        });
    }

    let mut quote = LiveQuote::new(pair.clone(), rate, provider);
    if let Some(at) = payload
        .time_last_update_unix
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
    {
        quote = quote.quoted_at(at);
    }

    Ok(quote)
}
