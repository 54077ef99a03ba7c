//! Runway Common Types
//!
//! This crate contains the reference data and shared types used across the
//! Runway planner: currencies, country profiles, conversion request and
//! result types, and boundary parsing of user input.

pub mod identifiers;
pub mod monetary;
pub mod country;
pub mod input;
pub mod error;

pub use identifiers::*;
pub use monetary::*;
pub use country::*;
pub use input::*;
pub use error::*;
