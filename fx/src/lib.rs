//! Runway FX
//!
//! Exchange rate resolution for the Runway planner.
//!
//! # Features
//!
//! - Caller-supplied override rates, used without any lookup
//! - Live lookup through a pluggable [`RateProvider`]
//! - Static per-country fallback tables when the lookup fails for any reason
//! - A source tag on every resolved rate
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use runway_fx::{HttpRateProvider, HttpRateProviderConfig, RateResolver};
//! use runway_common::{CountryCatalog, CountryId, Currency};
//!
//! let catalog = CountryCatalog::builtin()?;
//! let vietnam = catalog.require(&CountryId::new("vn"))?;
//!
//! let provider = HttpRateProvider::new(HttpRateProviderConfig::from_env())?;
//! let resolver = RateResolver::new(Arc::new(provider));
//!
//! let resolved = resolver.resolve_rate(&Currency::usd(), vietnam, None).await?;
//! println!("{} via {}", resolved.rate, resolved.source);
//! ```

pub mod error;
pub mod http;
pub mod provider;
pub mod resolver;

pub use error::{FxError, FxResult, LookupError, LookupResult};
pub use http::{parse_latest_rates, HttpRateProvider, HttpRateProviderConfig};
pub use provider::{LiveQuote, RateProvider, UnavailableRateProvider};
pub use resolver::{fallback_rate, is_usable_rate, RateResolver, ResolvedRate};

#[cfg(any(test, feature = "test-utils"))]
pub use provider::StaticRateProvider;
