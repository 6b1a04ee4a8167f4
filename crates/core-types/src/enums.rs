use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies each calculator in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorId {
    StandardMetrics,
    BreakEven,
    Loan,
    CashFlow,
    Pricing,
    EmployeeRoi,
    MarketingRoi,
    SaasMetrics,
    CohortMetrics,
}

impl CalculatorId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorId::StandardMetrics => "standard_metrics",
            CalculatorId::BreakEven => "break_even",
            CalculatorId::Loan => "loan",
            CalculatorId::CashFlow => "cash_flow",
            CalculatorId::Pricing => "pricing",
            CalculatorId::EmployeeRoi => "employee_roi",
            CalculatorId::MarketingRoi => "marketing_roi",
            CalculatorId::SaasMetrics => "saas_metrics",
            CalculatorId::CohortMetrics => "cohort_metrics",
        }
    }
}

impl fmt::Display for CalculatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative reading of a return-on-investment percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiRating {
    Positive,
    Neutral,
    Negative,
}
