//! # Core Types
//!
//! Layer 0 of the calculation engine. Every calculator crate builds on the
//! pieces defined here:
//!
//! - `ValidationError`: the single `invalid_input` failure kind.
//! - `numeric`: safe division, half-away-from-zero rounding, input assertions.
//! - `Calculator`: the validate-then-compute contract.
//! - `ratio`: threshold bands and payback helpers for the ratio calculators.

pub mod calculator;
pub mod enums;
pub mod error;
pub mod numeric;
pub mod ratio;

// Re-export the core types to provide a clean public API.
pub use calculator::Calculator;
pub use enums::{CalculatorId, RoiRating};
pub use error::ValidationError;
pub use ratio::{payback_months, Bands};
