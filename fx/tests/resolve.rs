//! Resolution paths exercised through the public API.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use runway_common::{CountryCatalog, CountryId, CountryProfile, Currency, CurrencyPair, RateSource};
use runway_fx::{
    HttpRateProvider, HttpRateProviderConfig, LookupError, RateProvider, RateResolver,
    StaticRateProvider, UnavailableRateProvider,
};

fn profile(id: &str) -> CountryProfile {
    CountryCatalog::builtin()
        .unwrap()
        .require(&CountryId::new(id))
        .unwrap()
        .clone()
}

fn local_provider(port: u16, timeout: Duration) -> HttpRateProvider {
    HttpRateProvider::new(HttpRateProviderConfig {
        base_url: format!("http://127.0.0.1:{port}"),
        timeout,
        use_system_proxy: false,
        ..Default::default()
    })
    .unwrap()
}

/// A port that was just bound and released, so nothing listens on it.
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn unreachable_rate_api_falls_back() {
    let provider = local_provider(closed_port(), Duration::from_millis(500));
    let resolver = RateResolver::new(Arc::new(provider));

    let resolved = resolver
        .resolve_rate(&Currency::usd(), &profile("th"), None)
        .await
        .unwrap();

    assert_eq!(resolved.source, RateSource::Fallback);
    assert_eq!(resolved.rate, 36.0);
    assert!(matches!(resolved.fallback_reason, Some(LookupError::Transport(_))));
}

#[tokio::test]
async fn stalled_rate_api_times_out_and_falls_back() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    // Accept the connection and never answer.
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        drop(socket);
    });

    let provider = local_provider(port, Duration::from_millis(200));
    let pair = CurrencyPair::new(Currency::usd(), Currency::vnd());
    assert_eq!(provider.get_rate(&pair).await.unwrap_err(), LookupError::TimedOut);

    let resolver = RateResolver::new(Arc::new(provider));
    let resolved = resolver
        .resolve_rate(&Currency::usd(), &profile("vn"), None)
        .await
        .unwrap();

    assert_eq!(resolved.source, RateSource::Fallback);
    assert_eq!(resolved.rate, 24_500.0);
    assert_eq!(resolved.fallback_reason, Some(LookupError::TimedOut));

    server.abort();
}

#[tokio::test]
async fn offline_provider_uses_tables_for_every_country() {
    let resolver = RateResolver::new(Arc::new(UnavailableRateProvider));
    let catalog = CountryCatalog::builtin().unwrap();

    for country in catalog.iter() {
        let resolved = resolver
            .resolve_rate(&Currency::usd(), country, None)
            .await
            .unwrap();

        assert_eq!(resolved.source, RateSource::Fallback);
        assert_eq!(Some(resolved.rate), country.fallback_rate(&Currency::usd()));
    }
}

#[tokio::test]
async fn concurrent_resolutions_do_not_interfere() {
    let provider = Arc::new(StaticRateProvider::new("test"));
    provider.set_rate(&CurrencyPair::new(Currency::usd(), Currency::vnd()), 26_000.0);
    provider.set_failure(
        &CurrencyPair::new(Currency::usd(), Currency::new("THB")),
        LookupError::TimedOut,
    );
    let resolver = RateResolver::new(provider.clone());
    let vn = profile("vn");
    let th = profile("th");

    let usd = Currency::usd();
    let (live, fallback) = tokio::join!(
        resolver.resolve_rate(&usd, &vn, None),
        resolver.resolve_rate(&usd, &th, None),
    );

    let live = live.unwrap();
    let fallback = fallback.unwrap();
    assert_eq!((live.source, live.rate), (RateSource::Live, 26_000.0));
    assert_eq!((fallback.source, fallback.rate), (RateSource::Fallback, 36.0));
    assert_eq!(provider.calls(), 2);
}

proptest! {
    #[test]
    fn usable_override_is_returned_exactly(rate in 1e-6f64..1e9) {
        let provider = Arc::new(StaticRateProvider::new("test"));
        let resolver = RateResolver::new(provider.clone());
        let vn = profile("vn");

        let resolved = tokio_test::block_on(
            resolver.resolve_rate(&Currency::eur(), &vn, Some(rate)),
        )
        .unwrap();

        prop_assert_eq!(resolved.rate, rate);
        prop_assert_eq!(resolved.source, RateSource::Override);
        prop_assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn failed_lookup_always_yields_configured_fallback(code in "[A-Z]{3}") {
        let resolver = RateResolver::new(Arc::new(UnavailableRateProvider));
        let vn = profile("vn");
        let from = Currency::new(code);

        let resolved = tokio_test::block_on(resolver.resolve_rate(&from, &vn, None)).unwrap();

        let expected = vn
            .fallback_rates
            .get(&from)
            .copied()
            .unwrap_or(24_500.0);
        prop_assert_eq!(resolved.rate, expected);
        prop_assert_eq!(resolved.source, RateSource::Fallback);
    }
}
