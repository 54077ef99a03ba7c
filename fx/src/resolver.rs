//! Rate resolution: override, then live lookup, then static fallback.

use std::sync::Arc;

use runway_common::{CountryProfile, Currency, CurrencyPair, RateSource};
use tracing::{debug, instrument, warn};

use crate::error::{FxError, FxResult, LookupError, LookupResult};
use crate::provider::{LiveQuote, RateProvider};

/// An exchange rate ready for conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRate {
    /// Source currency to the destination's local currency.
    pub pair: CurrencyPair,
    /// Local units per one unit of the source currency.
    pub rate: f64,
    /// Where the rate came from.
    pub source: RateSource,
    /// Why the live lookup was not used, when `source` is `Fallback`.
    pub fallback_reason: Option<LookupError>,
}

impl ResolvedRate {
    fn new(pair: CurrencyPair, rate: f64, source: RateSource) -> Self {
        Self {
            pair,
            rate,
            source,
            fallback_reason: None,
        }
    }

    /// Whether the rate came from a live lookup.
    pub fn is_live(&self) -> bool {
        self.source == RateSource::Live
    }
}

/// Whether `rate` can be used for conversion.
pub fn is_usable_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

/// Resolves rates against a live provider, falling back to country tables.
///
/// Holds no mutable state; concurrent resolutions do not interact.
#[derive(Clone)]
pub struct RateResolver {
    provider: Arc<dyn RateProvider>,
}

impl RateResolver {
    /// Create a resolver over the given provider.
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self { provider }
    }

    /// Name of the underlying live provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Resolve the rate from `from` into `profile`'s local currency.
    ///
    /// A usable `override_rate` wins without any lookup. Otherwise exactly one
    /// live lookup is attempted; any failure selects the fallback table. Only
    /// an empty `from` or a profile without the needed fallback entries is an
    /// error.
    #[instrument(skip(self, profile), fields(country = %profile.id))]
    pub async fn resolve_rate(
        &self,
        from: &Currency,
        profile: &CountryProfile,
        override_rate: Option<f64>,
    ) -> FxResult<ResolvedRate> {
        if from.is_empty() {
            return Err(FxError::EmptyCurrency);
        }

        let pair = CurrencyPair::new(from.clone(), profile.currency.clone());

        match override_rate {
            Some(rate) if is_usable_rate(rate) => {
                debug!(pair = %pair, rate, "Using override rate");
                return Ok(ResolvedRate::new(pair, rate, RateSource::Override));
            }
            Some(rate) => {
                debug!(pair = %pair, rate, "Ignoring unusable override rate");
            }
            None => {}
        }

        let outcome = self
            .provider
            .get_rate(&pair)
            .await
            .and_then(|quote| check_quote(&pair, quote));

        match outcome {
            Ok(quote) => {
                debug!(
                    provider = %quote.provider,
                    pair = %pair,
                    rate = quote.rate,
                    "Got live rate"
                );
                Ok(ResolvedRate::new(pair, quote.rate, RateSource::Live))
            }
            Err(reason) => {
                warn!(
                    provider = self.provider.name(),
                    pair = %pair,
                    error = %reason,
                    "Live rate lookup failed, using fallback table"
                );
                fallback_rate(from, profile, reason)
            }
        }
    }
}

/// Take the rate for `from` from `profile`'s static table.
///
/// Uses the entry for `from` when present and the `USD` entry otherwise.
pub fn fallback_rate(
    from: &Currency,
    profile: &CountryProfile,
    reason: LookupError,
) -> FxResult<ResolvedRate> {
    let rate = profile
        .fallback_rate(from)
        .ok_or_else(|| FxError::NoFallbackRate {
            country: profile.id.clone(),
            currency: from.clone(),
        })?;

    if !profile.has_direct_fallback(from) {
        debug!(
            country = %profile.id,
            currency = %from,
            "No fallback entry for currency, using USD entry"
        );
    }

    let pair = CurrencyPair::new(from.clone(), profile.currency.clone());
    let mut resolved = ResolvedRate::new(pair, rate, RateSource::Fallback);
    resolved.fallback_reason = Some(reason);
    Ok(resolved)
}

/// Reject quotes for another pair or with unusable rates.
fn check_quote(pair: &CurrencyPair, quote: LiveQuote) -> LookupResult<LiveQuote> {
    if quote.pair != *pair {
        return Err(LookupError::Malformed(format!(
            "asked for {pair}, got {}",
            quote.pair
        )));
    }

    if !is_usable_rate(quote.rate) {
        return Err(LookupError::InvalidRate {
            pair: pair.clone(),
            value: quote.rate,
        });
    }

    Ok(quote)
}
