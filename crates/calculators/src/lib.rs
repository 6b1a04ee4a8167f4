//! # Business Calculators
//!
//! The small-business calculators built on the `Calculator` contract from
//! `core-types`, plus a tagged request/report pair that routes any request to
//! the right calculator.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   settings or terminals. It depends only on `core-types` and `analytics`.
//! - **One Shape:** Every calculator validates first, computes with the shared
//!   numeric helpers, and returns a fresh, rounded result. The four ratio
//!   calculators additionally share `Bands` classification and
//!   `payback_months`.
//! - **Extensibility:** Adding a calculator means adding a module that implements
//!   `Calculator`, a `CalculatorId` variant, and a `CalculationRequest` /
//!   `CalculationReport` variant handled in `evaluate`.

// Declare all the modules that constitute this crate.
pub mod break_even;
pub mod cash_flow;
pub mod cohort;
pub mod dispatch;
pub mod employee_roi;
pub mod loan;
pub mod marketing_roi;
pub mod pricing;
pub mod saas_metrics;

// Re-export the key components to create a clean, public-facing API.
pub use break_even::{BreakEvenAdvice, BreakEvenCalculator, BreakEvenInput, BreakEvenResult};
pub use cash_flow::{
    AlertSeverity, CashFlowAlert, CashFlowCalculator, CashFlowInput, CashFlowResult, MonthlyForecast,
};
pub use cohort::{CohortCalculator, CohortInput, CohortProfitability, CohortResult};
pub use dispatch::{evaluate, CalculationReport, CalculationRequest};
pub use employee_roi::{EmployeeRoiCalculator, EmployeeRoiInput, EmployeeRoiResult};
pub use loan::{AmortizationRow, LoanCalculator, LoanInput, LoanResult};
pub use marketing_roi::{MarketingRoiCalculator, MarketingRoiInput, MarketingRoiResult};
pub use pricing::{MarketPosition, PricingCalculator, PricingInput, PricingResult};
pub use saas_metrics::{SaasMetricsCalculator, SaasMetricsInput, SaasMetricsResult, UnitEconomicsHealth};

// Re-export the contract so callers need only this crate.
pub use core_types::{Calculator, CalculatorId, RoiRating, ValidationError};
