//! Runway Budget Engine
//!
//! Pure arithmetic for the Runway planner: converting savings at a known
//! rate, resolving a monthly cost from a country profile, and computing how
//! long the savings last.
//!
//! Nothing here performs I/O or keeps state between calls. Rates arrive as
//! plain numbers; see `runway-fx` for obtaining them.
//!
//! # Example
//!
//! ```rust
//! use runway_budget::{calculate_longevity, convert};
//!
//! let local = convert(12_653.0, 24_500.0);
//! let runway = calculate_longevity(local as f64, 25_000_000.0);
//!
//! assert_eq!(runway.years, 1);
//! assert_eq!(runway.months, 12);
//! ```

pub mod conversion;
pub mod lifestyle;
pub mod longevity;

pub use conversion::convert;
pub use lifestyle::{lifestyle_amount, preset_amount};
pub use longevity::{calculate_longevity, LongevityResult, DAYS_PER_MONTH, MONTHS_PER_YEAR};
