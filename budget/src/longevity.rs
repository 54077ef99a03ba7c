//! How long savings last at a monthly spending rate.
//!
//! Days beyond the last whole month are approximated with a fixed 30-day
//! month: daily burn is `monthly / 30` regardless of calendar month length.
//! This is a deliberate simplification of the runway figure.

use serde::{Deserialize, Serialize};

/// Days in the notional month used for the daily burn rate.
pub const DAYS_PER_MONTH: f64 = 30.0;

pub const MONTHS_PER_YEAR: i64 = 12;

/// Floor for the daily burn rate, so a degenerate monthly figure cannot
/// divide by zero. Only affects `days_approx`.
const MIN_DAILY_BURN: f64 = 1e-9;

/// Runway of a budget at a monthly cost, in local currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LongevityResult {
    /// Whole months covered. Negative only for a negative budget.
    pub months: i64,
    /// Whole years covered, `floor(months / 12)`.
    pub years: i64,
    /// Balance left after the whole months are spent.
    pub remainder: i64,
    /// Additional days the remainder covers at the same daily burn.
    pub days_approx: i64,
    /// False for the sentinel produced by unusable inputs.
    pub valid: bool,
}

impl LongevityResult {
    /// Sentinel for unusable inputs: nothing is covered and the budget is
    /// reported back untouched (or as `0` if it is not finite).
    pub fn invalid(budget: f64) -> Self {
        let remainder = if budget.is_finite() {
            budget.round() as i64
        } else {
            0
        };

        Self {
            months: 0,
            years: 0,
            remainder,
            days_approx: 0,
            valid: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Months left over after whole years, for "1 year 3 months" displays.
    pub fn months_after_years(&self) -> i64 {
        self.months - self.years * MONTHS_PER_YEAR
    }
}

/// Compute how long `budget` lasts when spending `monthly` per month.
///
/// Both figures are in the same local currency. Returns the invalid sentinel
/// for non-finite input or `monthly <= 0`. The same applies when the
/// whole-month count does not fit in an `i64`.
///
/// A negative budget is accepted: months is the floor of a negative
/// quotient, i.e. already out of money, and the remainder stays in
/// `[0, monthly)`.
pub fn calculate_longevity(budget: f64, monthly: f64) -> LongevityResult {
    if !budget.is_finite() || !monthly.is_finite() || monthly <= 0.0 {
        return LongevityResult::invalid(budget);
    }

    // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
    let whole_months = (budget / monthly).floor();
    if !(whole_months >= i64::MIN as f64 && whole_months < i64::MAX as f64) {
        return LongevityResult::invalid(budget);
    }

    let months = whole_months as i64;
    let years = months.div_euclid(MONTHS_PER_YEAR);

    let remainder = (budget - whole_months * monthly).round();

    let daily_burn = (monthly / DAYS_PER_MONTH).max(MIN_DAILY_BURN);
    let days = (remainder / daily_burn).floor();
    let days_approx = if days.is_finite() && days > 0.0 {
        days as i64
    } else {
        0
    };

    LongevityResult {
        months,
        years,
        remainder: remainder as i64,
        days_approx,
        valid: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MONTHLY: f64 = 25_000_000.0;

    #[test]
    fn test_exact_year() {
        let result = calculate_longevity(300_000_000.0, MONTHLY);

        assert!(result.is_valid());
        assert_eq!(result.months, 12);
        assert_eq!(result.years, 1);
        assert_eq!(result.remainder, 0);
        assert_eq!(result.days_approx, 0);
    }

    #[test]
    fn test_year_with_remainder() {
        let result = calculate_longevity(310_000_000.0, MONTHLY);

        assert_eq!(result.months, 12);
        assert_eq!(result.years, 1);
        assert_eq!(result.remainder, 10_000_000);
        assert_eq!(result.days_approx, 12);
        assert_eq!(result.months_after_years(), 0);
    }

    #[test]
    fn test_zero_budget() {
        let result = calculate_longevity(0.0, MONTHLY);

        assert!(result.is_valid());
        assert_eq!(
            (result.months, result.years, result.remainder, result.days_approx),
            (0, 0, 0, 0)
        );
    }

    #[test]
    fn test_zero_monthly_is_invalid() {
        for budget in [0.0, 1.0, 310_000_000.0, -5.0] {
            let result = calculate_longevity(budget, 0.0);

            assert!(!result.is_valid());
            assert_eq!((result.months, result.years, result.days_approx), (0, 0, 0));
            assert_eq!(result.remainder, budget as i64);
        }
    }

    #[test]
    fn test_negative_monthly_is_invalid() {
        let result = calculate_longevity(100.0, -10.0);
        assert_eq!(result, LongevityResult::invalid(100.0));
    }

    #[test]
    fn test_non_finite_inputs_are_invalid() {
        let result = calculate_longevity(f64::NAN, MONTHLY);
        assert!(!result.is_valid());
        assert_eq!(result.remainder, 0);

        let result = calculate_longevity(f64::INFINITY, MONTHLY);
        assert!(!result.is_valid());
        assert_eq!(result.remainder, 0);

        let result = calculate_longevity(1_000.4, f64::NAN);
        assert!(!result.is_valid());
        assert_eq!(result.remainder, 1_000);
    }

    #[test]
    fn test_quotient_overflow_is_invalid() {
        let result = calculate_longevity(1e308, 1e-10);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_month_count_beyond_i64_is_invalid() {
        let result = calculate_longevity(1e300, 1.0);
        assert!(!result.is_valid());
        assert_eq!(result.months, 0);

        let result = calculate_longevity(-1e300, 1.0);
        assert!(!result.is_valid());

        // 2^63 months does not fit; one step below does.
        assert!(!calculate_longevity(9_223_372_036_854_775_808.0, 1.0).is_valid());
        assert!(calculate_longevity(4_611_686_018_427_387_904.0, 1.0).is_valid());
    }

    #[test]
    fn test_negative_budget_is_already_out_of_money() {
        let result = calculate_longevity(-10_000_000.0, MONTHLY);

        assert!(result.is_valid());
        assert_eq!(result.months, -1);
        assert_eq!(result.years, -1);
        assert_eq!(result.remainder, 15_000_000);
        assert_eq!(result.days_approx, 18);
    }

    #[test]
    fn test_multi_year_breakdown() {
        let result = calculate_longevity(50_000.0, 1_200.0);

        assert_eq!(result.months, 41);
        assert_eq!(result.years, 3);
        assert_eq!(result.months_after_years(), 5);
        assert_eq!(result.remainder, 800);
        assert_eq!(result.days_approx, 20);
    }

    #[test]
    fn test_tiny_monthly_cost() {
        let result = calculate_longevity(1.0, 1e-12);

        assert!(result.is_valid());
        assert!(result.days_approx >= 0);
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(calculate_longevity(310_000_000.0, MONTHLY)).unwrap();

        assert_eq!(json["months"], 12);
        assert_eq!(json["days_approx"], 12);
        assert_eq!(json["valid"], true);
    }

    proptest! {
        #[test]
        fn months_and_remainder_rebuild_budget(
            budget in 0.0f64..1e12,
            monthly in 1.0f64..1e9,
        ) {
            let result = calculate_longevity(budget, monthly);

            prop_assert!(result.is_valid());
            let rebuilt = result.months as f64 * monthly + result.remainder as f64;
            prop_assert!((rebuilt - budget).abs() <= 1.0);
            prop_assert!(result.remainder >= 0);
            prop_assert!((result.remainder as f64) < monthly + 1.0);
            prop_assert_eq!(result.years, result.months.div_euclid(12));
            prop_assert!(result.days_approx >= 0);
            prop_assert!(result.days_approx <= 45);
        }

        #[test]
        fn unusable_monthly_always_yields_sentinel(
            budget in any::<f64>(),
            monthly in prop_oneof![
                Just(0.0),
                Just(f64::NAN),
                Just(f64::INFINITY),
                Just(f64::NEG_INFINITY),
                -1e12f64..=0.0,
            ],
        ) {
            let result = calculate_longevity(budget, monthly);

            prop_assert!(!result.is_valid());
            prop_assert_eq!(result.months, 0);
            prop_assert_eq!(result.years, 0);
            prop_assert_eq!(result.days_approx, 0);
        }
    }
}
