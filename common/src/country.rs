//! Destination country profiles and the catalog that holds them.
//!
//! Profiles are immutable reference data. A catalog validates every profile
//! when it is built, so a missing `USD` fallback rate or a missing
//! `"standard"` lifestyle tier is reported at load time and never during a
//! calculation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, RunwayError};
use crate::identifiers::CountryId;
use crate::monetary::Currency;

/// Lifestyle tier used when a requested tier is absent.
pub const STANDARD_TIER: &str = "standard";

/// Fallback-table entry used when the requested currency has none.
pub const DEFAULT_FALLBACK_CURRENCY: &str = "USD";

const BUILTIN_COUNTRIES: &str = include_str!("../data/countries.json");

/// Reference data for one destination country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    /// Country identifier.
    pub id: CountryId,
    /// Display name.
    pub name: String,
    /// Local currency.
    pub currency: Currency,
    /// Lifestyle tier name to monthly cost in local currency.
    pub lifestyles: BTreeMap<String, i64>,
    /// Regional preset name to monthly cost in local currency.
    #[serde(default)]
    pub presets: BTreeMap<String, i64>,
    /// Foreign currency to local units per one foreign unit.
    pub fallback_rates: BTreeMap<Currency, f64>,
}

impl CountryProfile {
    /// Monthly cost for a lifestyle tier, if configured.
    pub fn lifestyle(&self, tier: &str) -> Option<i64> {
        self.lifestyles.get(tier).copied()
    }

    /// Monthly cost for a regional preset, if configured.
    pub fn preset(&self, name: &str) -> Option<i64> {
        self.presets.get(name).copied()
    }

    /// Names of the configured lifestyle tiers.
    pub fn lifestyle_names(&self) -> impl Iterator<Item = &str> {
        self.lifestyles.keys().map(String::as_str)
    }

    /// Names of the configured regional presets.
    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Static rate for `from`, falling back to the `USD` entry.
    pub fn fallback_rate(&self, from: &Currency) -> Option<f64> {
        self.fallback_rates
            .get(from)
            .or_else(|| {
                self.fallback_rates
                    .get(&Currency::new(DEFAULT_FALLBACK_CURRENCY))
            })
            .copied()
    }

    /// Whether the fallback table has an entry for exactly `from`.
    pub fn has_direct_fallback(&self, from: &Currency) -> bool {
        self.fallback_rates.contains_key(from)
    }

    /// Validate the profile.
    pub fn validate(&self) -> Result<()> {
        if !self.id.is_valid() {
            return Err(self.invalid(format!("invalid country id {:?}", self.id.as_str())));
        }

        if Currency::parse(self.currency.code()).is_err() {
            return Err(self.invalid(format!("invalid local currency {:?}", self.currency.code())));
        }

        if !self.lifestyles.contains_key(STANDARD_TIER) {
            return Err(self.invalid(format!("missing {STANDARD_TIER:?} lifestyle tier")));
        }

        for (tier, cost) in &self.lifestyles {
            if *cost < 0 {
                return Err(self.invalid(format!("lifestyle tier {tier:?} has negative cost")));
            }
        }

        for (preset, cost) in &self.presets {
            if *cost < 0 {
                return Err(self.invalid(format!("preset {preset:?} has negative cost")));
            }
        }

        if !self
            .fallback_rates
            .contains_key(&Currency::new(DEFAULT_FALLBACK_CURRENCY))
        {
            return Err(self.invalid(format!(
                "missing {DEFAULT_FALLBACK_CURRENCY} fallback rate"
            )));
        }

        for (currency, rate) in &self.fallback_rates {
            if Currency::parse(currency.code()).is_err() {
                return Err(self.invalid(format!("invalid fallback currency {:?}", currency.code())));
            }
            if !rate.is_finite() || *rate <= 0.0 {
                return Err(self.invalid(format!("fallback rate for {currency} must be positive")));
            }
        }

        Ok(())
    }

    fn invalid(&self, reason: String) -> RunwayError {
        RunwayError::InvalidProfile {
            country: self.id.clone(),
            reason,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    countries: Vec<CountryProfile>,
}

/// Validated, read-only set of country profiles.
#[derive(Debug, Clone, Default)]
pub struct CountryCatalog {
    profiles: BTreeMap<CountryId, CountryProfile>,
}

impl CountryCatalog {
    /// Build a catalog, validating every profile.
    pub fn from_profiles(profiles: impl IntoIterator<Item = CountryProfile>) -> Result<Self> {
        let mut map = BTreeMap::new();

        for profile in profiles {
            profile.validate()?;
            let id = profile.id.clone();
            if map.insert(id.clone(), profile).is_some() {
                return Err(RunwayError::ConfigurationError(format!(
                    "duplicate country id {id}"
                )));
            }
        }

        if map.is_empty() {
            return Err(RunwayError::ConfigurationError(
                "catalog contains no countries".to_string(),
            ));
        }

        Ok(Self { profiles: map })
    }

    /// Parse a catalog from its JSON form: `{"countries": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_profiles(file.countries)
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;

        info!(
            path = %path.display(),
            countries = catalog.len(),
            "Loaded country catalog"
        );

        Ok(catalog)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        let catalog = Self::from_json(BUILTIN_COUNTRIES)?;
        debug!(countries = catalog.len(), "Loaded built-in country catalog");
        Ok(catalog)
    }

    /// Get a profile by ID.
    pub fn get(&self, id: &CountryId) -> Option<&CountryProfile> {
        self.profiles.get(id)
    }

    /// Get a profile by ID, or report it unknown.
    pub fn require(&self, id: &CountryId) -> Result<&CountryProfile> {
        self.get(id)
            .ok_or_else(|| RunwayError::UnknownCountry(id.clone()))
    }

    /// All country IDs, in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &CountryId> {
        self.profiles.keys()
    }

    /// All profiles, in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &CountryProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
