//! Rendering plans for the terminal.

use std::fmt::Write;

use clap::ValueEnum;
use runway_common::{CountryCatalog, RateSource};

use crate::planner::{MonthlyBasis, Plan};

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Group digits in threes: `310000000` becomes `310,000,000`.
pub fn group_digits(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Render a plan in the requested format.
pub fn render_plan(plan: &Plan, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(plan),
        OutputFormat::Text => Ok(render_plan_text(plan)),
    }
}

fn render_plan_text(plan: &Plan) -> String {
    let local = &plan.conversion.local_currency;
    let mut out = String::new();

    let _ = writeln!(out, "Destination:  {} ({})", plan.country_name, local);
    let _ = writeln!(
        out,
        "Savings:      {} {} = {} {}",
        plan.amount, plan.from, group_digits(plan.conversion.local_amount), local
    );

    let source = match plan.conversion.source {
        RateSource::Live => "live rate".to_string(),
        RateSource::Override => "your rate".to_string(),
        RateSource::Fallback => match &plan.fallback_reason {
            Some(reason) => format!("offline estimate; {reason}"),
            None => "offline estimate".to_string(),
        },
    };
    let _ = writeln!(
        out,
        "Rate:         1 {} = {} {} ({})",
        plan.from, plan.conversion.rate, local, source
    );

    let basis = match &plan.monthly_basis {
        MonthlyBasis::Lifestyle(tier) => format!("{tier} lifestyle"),
        MonthlyBasis::Preset(name) => format!("{name} preset"),
        MonthlyBasis::Explicit => "your figure".to_string(),
    };
    let _ = writeln!(
        out,
        "Monthly cost: {} {} ({})",
        group_digits(plan.monthly_cost.round() as i64),
        local,
        basis
    );

    let runway = &plan.longevity;
    if !runway.is_valid() {
        let _ = writeln!(out, "Runway:       cannot be computed; monthly cost must be positive");
        return out;
    }

    let _ = writeln!(
        out,
        "Runway:       {} ({}, {}) and about {}",
        plural(runway.months, "month"),
        plural(runway.years, "year"),
        plural(runway.months_after_years(), "month"),
        plural(runway.days_approx, "day")
    );
    let _ = writeln!(
        out,
        "Left over:    {} {} after whole months",
        group_digits(runway.remainder),
        local
    );

    out
}

/// Render the catalog as a table of countries, tiers and presets.
pub fn render_countries(catalog: &CountryCatalog) -> String {
    let mut out = String::new();

    for profile in catalog.iter() {
        let _ = writeln!(out, "{} - {} ({})", profile.id, profile.name, profile.currency);
        for (tier, cost) in &profile.lifestyles {
            let _ = writeln!(out, "  lifestyle {:<18} {:>14}", tier, group_digits(*cost));
        }
        for (preset, cost) in &profile.presets {
            let _ = writeln!(out, "  preset    {:<18} {:>14}", preset, group_digits(*cost));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use runway_budget::calculate_longevity;
    use runway_common::{ConversionResult, CountryId, Currency};

    fn make_plan(monthly: f64, source: RateSource) -> Plan {
        Plan {
            country: CountryId::new("vn"),
            country_name: "Vietnam".to_string(),
            from: Currency::usd(),
            amount: 12_400.0,
            conversion: ConversionResult {
                local_amount: 310_000_000,
                local_currency: Currency::vnd(),
                rate: 25_000.0,
                source,
            },
            fallback_reason: None,
            monthly_cost: monthly,
            monthly_basis: MonthlyBasis::Lifestyle("standard".to_string()),
            longevity: calculate_longevity(310_000_000.0, monthly),
        }
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(310_000_000), "310,000,000");
        assert_eq!(group_digits(-24_500), "-24,500");
        assert_eq!(group_digits(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_text_report() {
        let text = render_plan(&make_plan(25_000_000.0, RateSource::Live), OutputFormat::Text).unwrap();

        assert!(text.contains("Vietnam (VND)"));
        assert!(text.contains("310,000,000 VND"));
        assert!(text.contains("live rate"));
        assert!(text.contains("12 months (1 year, 0 months) and about 12 days"));
        assert!(text.contains("10,000,000 VND after whole months"));
    }

    #[test]
    fn test_text_report_invalid_runway() {
        let text = render_plan(&make_plan(0.0, RateSource::Fallback), OutputFormat::Text).unwrap();

        assert!(text.contains("offline estimate"));
        assert!(text.contains("cannot be computed"));
    }

    #[test]
    fn test_json_report() {
        let json = render_plan(&make_plan(25_000_000.0, RateSource::Override), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["country"], "vn");
        assert_eq!(value["conversion"]["source"], "override");
        assert_eq!(value["monthly_basis"]["kind"], "lifestyle");
        assert_eq!(value["longevity"]["days_approx"], 12);
    }

    #[test]
    fn test_render_countries() {
        let catalog = CountryCatalog::builtin().unwrap();
        let text = render_countries(&catalog);

        assert!(text.contains("vn - Vietnam (VND)"));
        assert!(text.contains("ho-chi-minh-city"));
    }
}
