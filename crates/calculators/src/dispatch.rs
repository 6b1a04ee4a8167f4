use crate::break_even::{BreakEvenCalculator, BreakEvenInput, BreakEvenResult};
use crate::cash_flow::{CashFlowCalculator, CashFlowInput, CashFlowResult};
use crate::cohort::{CohortCalculator, CohortInput, CohortResult};
use crate::employee_roi::{EmployeeRoiCalculator, EmployeeRoiInput, EmployeeRoiResult};
use crate::loan::{LoanCalculator, LoanInput, LoanResult};
use crate::marketing_roi::{MarketingRoiCalculator, MarketingRoiInput, MarketingRoiResult};
use crate::pricing::{PricingCalculator, PricingInput, PricingResult};
use crate::saas_metrics::{SaasMetricsCalculator, SaasMetricsInput, SaasMetricsResult};
use analytics::{StandardMetricsCalculator, StandardMetricsInput, StandardMetricsResult};
use core_types::{Calculator, CalculatorId, ValidationError};
use serde::{Deserialize, Serialize};

/// A calculation request for any calculator, tagged by `calculator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationRequest {
    StandardMetrics(StandardMetricsInput),
    BreakEven(BreakEvenInput),
    Loan(LoanInput),
    CashFlow(CashFlowInput),
    Pricing(PricingInput),
    EmployeeRoi(EmployeeRoiInput),
    MarketingRoi(MarketingRoiInput),
    SaasMetrics(SaasMetricsInput),
    CohortMetrics(CohortInput),
}

/// The result matching a `CalculationRequest`, tagged the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationReport {
    StandardMetrics(StandardMetricsResult),
    BreakEven(BreakEvenResult),
    Loan(LoanResult),
    CashFlow(CashFlowResult),
    Pricing(PricingResult),
    EmployeeRoi(EmployeeRoiResult),
    MarketingRoi(MarketingRoiResult),
    SaasMetrics(SaasMetricsResult),
    CohortMetrics(CohortResult),
}

impl CalculationRequest {
    pub fn id(&self) -> CalculatorId {
        match self {
            CalculationRequest::StandardMetrics(_) => CalculatorId::StandardMetrics,
            CalculationRequest::BreakEven(_) => CalculatorId::BreakEven,
            CalculationRequest::Loan(_) => CalculatorId::Loan,
            CalculationRequest::CashFlow(_) => CalculatorId::CashFlow,
            CalculationRequest::Pricing(_) => CalculatorId::Pricing,
            CalculationRequest::EmployeeRoi(_) => CalculatorId::EmployeeRoi,
            CalculationRequest::MarketingRoi(_) => CalculatorId::MarketingRoi,
            CalculationRequest::SaasMetrics(_) => CalculatorId::SaasMetrics,
            CalculationRequest::CohortMetrics(_) => CalculatorId::CohortMetrics,
        }
    }
}

/// Routes a request to its calculator.
///
/// The match is exhaustive, so adding a calculator to `CalculationRequest`
/// without handling it here is a compile error.
pub fn evaluate(request: &CalculationRequest) -> Result<CalculationReport, ValidationError> {
    tracing::info!(calculator = %request.id(), "evaluating request");

    let report = match request {
        CalculationRequest::StandardMetrics(input) => {
            CalculationReport::StandardMetrics(StandardMetricsCalculator::new().calculate(input)?)
        }
        CalculationRequest::BreakEven(input) => {
            CalculationReport::BreakEven(BreakEvenCalculator::new().calculate(input)?)
        }
        CalculationRequest::Loan(input) => CalculationReport::Loan(LoanCalculator::new().calculate(input)?),
        CalculationRequest::CashFlow(input) => {
            CalculationReport::CashFlow(CashFlowCalculator::new().calculate(input)?)
        }
        CalculationRequest::Pricing(input) => {
            CalculationReport::Pricing(PricingCalculator::new().calculate(input)?)
        }
        CalculationRequest::EmployeeRoi(input) => {
            CalculationReport::EmployeeRoi(EmployeeRoiCalculator::new().calculate(input)?)
        }
        CalculationRequest::MarketingRoi(input) => {
            CalculationReport::MarketingRoi(MarketingRoiCalculator::new().calculate(input)?)
        }
        CalculationRequest::SaasMetrics(input) => {
            CalculationReport::SaasMetrics(SaasMetricsCalculator::new().calculate(input)?)
        }
        CalculationRequest::CohortMetrics(input) => {
            CalculationReport::CohortMetrics(CohortCalculator::new().calculate(input)?)
        }
    };

    Ok(report)
}
