//! Monthly cost lookup from country profiles.

use runway_common::{CountryProfile, STANDARD_TIER};

/// Monthly cost of lifestyle `tier` in `profile`'s local currency.
///
/// An unknown tier falls back to the `"standard"` tier; a profile with no
/// standard tier yields `0`. Never fails.
pub fn lifestyle_amount(profile: &CountryProfile, tier: &str) -> i64 {
    profile
        .lifestyle(tier)
        .or_else(|| profile.lifestyle(STANDARD_TIER))
        .unwrap_or(0)
}

/// Monthly cost of regional preset `name`, if the profile offers it.
///
/// Presets are quick-fill shortcuts and have no default.
pub fn preset_amount(profile: &CountryProfile, name: &str) -> Option<i64> {
    profile.preset(name)
}
