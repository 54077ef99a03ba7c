//! Runway client
//!
//! Presentation layer for the Runway planner: owns the user's selection,
//! parses raw input, runs the calculation core and renders the results.

pub mod config;
pub mod planner;
pub mod report;
pub mod session;

pub use config::CliConfig;
pub use planner::{monthly_cost, MonthlyBasis, MonthlyCost, Plan, PlanError, Planner};
pub use report::{group_digits, render_countries, render_plan, OutputFormat};
pub use session::Session;
