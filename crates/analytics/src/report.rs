use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Project parameters for the standard ROI/NPV/IRR analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardMetricsInput {
    /// Up-front outlay, recovered from monthly net cash flow.
    pub initial_investment: Decimal,
    /// Annual discount rate in percent, applied monthly for NPV.
    pub discount_rate: Decimal,
    /// Projection horizon in months.
    pub project_duration: u32,
    pub yearly_revenue: Decimal,
    /// Annual revenue growth in percent, compounded once per project year.
    pub revenue_growth: Decimal,
    pub operating_costs: Decimal,
    pub maintenance_costs: Decimal,
    /// Revenue scaling for best/worst-case scenarios. Treated as 1.0 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<Decimal>,
}

/// One month of the projected cash-flow series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedMonth {
    pub month: u32,
    pub revenue: Decimal,
    pub costs: Decimal,
    pub net_cash_flow: Decimal,
    /// Running total seeded at minus the initial investment.
    pub cumulative: Decimal,
}

/// The output of the `StandardMetricsCalculator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardMetricsResult {
    /// Percent.
    pub roi: Decimal,
    pub npv: Decimal,
    /// Annualized internal rate of return, percent. A best-effort estimate.
    pub irr: Decimal,
    /// False when the solver stopped without meeting the NPV tolerance.
    pub irr_converged: bool,
    /// Months until the investment is recovered, or the full horizon if it never is.
    pub payback_period: Decimal,
    pub payback_reached: bool,
    pub total_revenue: Decimal,
    pub total_costs: Decimal,
    pub total_net_cash_flow: Decimal,
    pub monthly_cash_flows: Vec<ProjectedMonth>,
}
