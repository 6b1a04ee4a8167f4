//! # Project Analytics
//!
//! Standard project-evaluation metrics over a projected monthly cash-flow
//! series: ROI, NPV, IRR and payback period, plus best/base/worst scenario
//! analysis.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   settings or output formats. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** `StandardMetricsCalculator` takes a
//!   `StandardMetricsInput` and produces a `StandardMetricsResult`. The IRR
//!   solver is bounded, so every call terminates.
//!
//! ## Public API
//!
//! - `StandardMetricsCalculator`: the `Calculator` implementation.
//! - `StandardMetricsInput` / `StandardMetricsResult` / `ProjectedMonth`: its data.
//! - `internal_rate_of_return` / `net_present_value`: the underlying solver.
//! - `ScenarioAnalysis`: the three-scenario wrapper.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod irr;
pub mod report;
pub mod scenario;

// Re-export the key components to create a clean, public-facing API.
pub use engine::StandardMetricsCalculator;
pub use irr::{internal_rate_of_return, net_present_value, IrrEstimate};
pub use report::{ProjectedMonth, StandardMetricsInput, StandardMetricsResult};
pub use scenario::{ScenarioAnalysis, ScenarioMultipliers};
