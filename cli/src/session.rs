//! What the user currently has selected.
//!
//! Selection lives here, in the client, and is passed explicitly into every
//! calculation as a resolved profile and tier name.

use runway_common::{CountryCatalog, CountryId, CountryProfile, Result, STANDARD_TIER};

/// Selected destination and lifestyle tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    country: CountryId,
    lifestyle: String,
}

impl Session {
    /// Start a session for `country`, checking it exists in `catalog`.
    pub fn new(catalog: &CountryCatalog, country: CountryId) -> Result<Self> {
        catalog.require(&country)?;
        Ok(Self {
            country,
            lifestyle: STANDARD_TIER.to_string(),
        })
    }

    /// Switch destination, keeping the lifestyle tier.
    pub fn select_country(&mut self, catalog: &CountryCatalog, country: CountryId) -> Result<()> {
        catalog.require(&country)?;
        self.country = country;
        Ok(())
    }

    /// Switch lifestyle tier. Unknown tiers resolve to the standard tier at
    /// calculation time.
    pub fn select_lifestyle(&mut self, tier: impl Into<String>) {
        self.lifestyle = tier.into();
    }

    pub fn country(&self) -> &CountryId {
        &self.country
    }

    pub fn lifestyle(&self) -> &str {
        &self.lifestyle
    }

    /// The selected country's profile.
    pub fn profile<'a>(&self, catalog: &'a CountryCatalog) -> Result<&'a CountryProfile> {
        catalog.require(&self.country)
    }
}
