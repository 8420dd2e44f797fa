//! # Configuration Module
//!
//! Centralizes the numeric limits, type codes and widths used by the table
//! engine. Constants that depend on each other live next to each other and the
//! relationships are enforced through compile-time assertions.
//!
//! ## Module Organization
//!
//! - [`constants`]: All numeric configuration values with dependency documentation

pub mod constants;
pub use constants::*;
