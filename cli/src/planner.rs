//! Ties rate resolution and budget arithmetic together for one request.

use std::sync::Arc;

use runway_budget::{calculate_longevity, convert, lifestyle_amount, preset_amount, LongevityResult};
use runway_common::{
    ConversionRequest, ConversionResult, CountryCatalog, CountryId, CountryProfile, Currency,
    RunwayError,
};
use runway_fx::{FxError, RateResolver, ResolvedRate};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

use crate::session::Session;

/// Errors that stop a plan from being produced.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Catalog(#[from] RunwayError),

    #[error(transparent)]
    Fx(#[from] FxError),

    #[error("Country {country} has no preset {preset:?}")]
    UnknownPreset { country: CountryId, preset: String },
}

pub type PlanResult<T> = Result<T, PlanError>;

/// How the monthly cost is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum MonthlyCost {
    /// A lifestyle tier; unknown tiers resolve to the standard tier.
    Lifestyle(String),
    /// A regional preset, which must exist.
    Preset(String),
    /// A figure in local currency.
    Explicit(f64),
}

impl MonthlyCost {
    /// The session's selected lifestyle tier.
    pub fn from_session(session: &Session) -> Self {
        MonthlyCost::Lifestyle(session.lifestyle().to_string())
    }
}

/// Where the monthly figure in a plan came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum MonthlyBasis {
    Lifestyle(String),
    Preset(String),
    Explicit,
}

/// A complete runway calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub country: CountryId,
    pub country_name: String,
    pub from: Currency,
    pub amount: f64,
    pub conversion: ConversionResult,
    /// Why the live rate was not used, if it was not.
    pub fallback_reason: Option<String>,
    pub monthly_cost: f64,
    pub monthly_basis: MonthlyBasis,
    pub longevity: LongevityResult,
}

/// Resolve the monthly cost for `profile`.
pub fn monthly_cost(profile: &CountryProfile, cost: &MonthlyCost) -> PlanResult<(f64, MonthlyBasis)> {
    match cost {
        MonthlyCost::Lifestyle(tier) => {
            let effective = if profile.lifestyle(tier).is_some() {
                tier.clone()
            } else {
                runway_common::STANDARD_TIER.to_string()
            };
            Ok((
                lifestyle_amount(profile, tier) as f64,
                MonthlyBasis::Lifestyle(effective),
            ))
        }
        MonthlyCost::Preset(name) => preset_amount(profile, name)
            .map(|amount| (amount as f64, MonthlyBasis::Preset(name.clone())))
            .ok_or_else(|| PlanError::UnknownPreset {
                country: profile.id.clone(),
                preset: name.clone(),
            }),
        MonthlyCost::Explicit(amount) => Ok((*amount, MonthlyBasis::Explicit)),
    }
}

/// Runs conversion and longevity calculations against a catalog.
#[derive(Clone)]
pub struct Planner {
    catalog: Arc<CountryCatalog>,
    resolver: RateResolver,
}

impl Planner {
    pub fn new(catalog: Arc<CountryCatalog>, resolver: RateResolver) -> Self {
        Self { catalog, resolver }
    }

    pub fn catalog(&self) -> &CountryCatalog {
        &self.catalog
    }

    /// Convert the requested savings into the destination's currency.
    pub async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> PlanResult<(ConversionResult, ResolvedRate)> {
        let profile = self.catalog.require(&request.country)?;

        let resolved = self
            .resolver
            .resolve_rate(&request.from, profile, request.override_rate)
            .await?;

        let result = ConversionResult {
            local_amount: convert(request.amount, resolved.rate),
            local_currency: profile.currency.clone(),
            rate: resolved.rate,
            source: resolved.source,
        };

        Ok((result, resolved))
    }

    /// Convert the savings and compute how long they last.
    #[instrument(skip(self, request), fields(country = %request.country, from = %request.from))]
    pub async fn plan(&self, request: &ConversionRequest, cost: &MonthlyCost) -> PlanResult<Plan> {
        let profile = self.catalog.require(&request.country)?;
        let (monthly, basis) = monthly_cost(profile, cost)?;

        let (conversion, resolved) = self.convert(request).await?;
        let longevity = calculate_longevity(conversion.local_amount as f64, monthly);

        info!(
            rate = conversion.rate,
            source = %conversion.source,
            local_amount = conversion.local_amount,
            months = longevity.months,
            valid = longevity.valid,
            "Computed runway"
        );

        Ok(Plan {
            country: profile.id.clone(),
            country_name: profile.name.clone(),
            from: request.from.clone(),
            amount: request.amount,
            conversion,
            fallback_reason: resolved.fallback_reason.map(|reason| reason.to_string()),
            monthly_cost: monthly,
            monthly_basis: basis,
            longevity,
        })
    }
}
