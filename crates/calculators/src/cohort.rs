use core_types::numeric::{
    assert_count_range, assert_positive, assert_range, round, safe_divide, to_f64, CURRENCY_DP,
    PERCENT_DP, UNITS_DP,
};
use core_types::{Bands, Calculator, CalculatorId, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortProfitability {
    High,
    Low,
    Unprofitable,
}

/// Cohort ROI bands, percent.
pub const COHORT_ROI_BANDS: Bands<CohortProfitability> = Bands::new(
    &[(50.0, CohortProfitability::High), (0.0, CohortProfitability::Low)],
    CohortProfitability::Unprofitable,
);
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;
pub const MAX_HORIZON_MONTHS: u32 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortInput {
    /// Customers acquired together.
    pub cohort_size: u32,
    /// Total spent acquiring the cohort.
    pub acquisition_cost: Decimal,
    pub average_order_value: Decimal,
    /// Orders per active customer per month.
    pub orders_per_month: Decimal,
    /// Percent of active customers still buying the following month.
    pub monthly_retention_rate: Decimal,
    pub contribution_margin_pct: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortMonth {
    pub month: u32,
    pub active_customers: Decimal,
    pub revenue: Decimal,
    pub cumulative_contribution: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortResult {
    /// Contribution over the horizon relative to acquisition cost, percent.
    pub roi: Decimal,
    pub profitability: CohortProfitability,
    pub total_revenue: Decimal,
    pub total_contribution: Decimal,
    pub revenue_per_customer: Decimal,
    pub contribution_per_customer: Decimal,
    pub acquisition_cost_per_customer: Decimal,
    pub retained_customers_at_end: Decimal,
    /// First month whose cumulative contribution covers the acquisition cost.
    pub payback_month: Option<u32>,
    pub monthly: Vec<CohortMonth>,
}

/// Profitability of one acquisition cohort under geometric retention decay.
#[derive(Debug, Default, Clone, Copy)]
pub struct CohortCalculator;

impl CohortCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl Calculator for CohortCalculator {
    type Input = CohortInput;
    type Output = CohortResult;

    fn id(&self) -> CalculatorId {
        CalculatorId::CohortMetrics
    }

    fn validate(&self, input: &CohortInput) -> Result<(), ValidationError> {
        assert_count_range(input.cohort_size, 1, u32::MAX, "cohort_size")?;
        assert_positive(input.acquisition_cost, "acquisition_cost")?;
        assert_positive(input.average_order_value, "average_order_value")?;
        assert_positive(input.orders_per_month, "orders_per_month")?;
        assert_range(
            input.monthly_retention_rate,
            Decimal::ZERO,
            Decimal::ONE_HUNDRED,
            "monthly_retention_rate",
        )?;
        assert_range(
            input.contribution_margin_pct,
            Decimal::ZERO,
            Decimal::ONE_HUNDRED,
            "contribution_margin_pct",
        )?;
        if let Some(months) = input.horizon_months {
            assert_count_range(months, 1, MAX_HORIZON_MONTHS, "horizon_months")?;
        }
        Ok(())
    }

    fn compute(&self, input: &CohortInput) -> CohortResult {
        let size = input.cohort_size as f64;
        let acquisition_cost = to_f64(input.acquisition_cost);
        let revenue_per_active = to_f64(input.average_order_value) * to_f64(input.orders_per_month);
        let retention = to_f64(input.monthly_retention_rate) / 100.0;
        let margin = to_f64(input.contribution_margin_pct) / 100.0;
        let horizon = input.horizon_months.unwrap_or(DEFAULT_HORIZON_MONTHS);

        let mut active = size;
        let mut total_revenue = 0.0;
        let mut cumulative_contribution = 0.0;
        let mut payback_month = None;
        let mut monthly = Vec::with_capacity(horizon as usize);

        for month in 1..=horizon {
            if month > 1 {
                active *= retention;
            }
            let revenue = active * revenue_per_active;
            total_revenue += revenue;
            cumulative_contribution += revenue * margin;
            if payback_month.is_none() && cumulative_contribution >= acquisition_cost {
                payback_month = Some(month);
            }
            monthly.push(CohortMonth {
                month,
                active_customers: round(active, UNITS_DP),
                revenue: round(revenue, CURRENCY_DP),
                cumulative_contribution: round(cumulative_contribution, CURRENCY_DP),
            });
        }

        let roi = safe_divide(cumulative_contribution - acquisition_cost, acquisition_cost, 0.0) * 100.0;
        let (roi, profitability) = COHORT_ROI_BANDS.round_and_classify(roi, PERCENT_DP);

        tracing::debug!(%roi, ?profitability, ?payback_month, horizon, "cohort evaluated");

        CohortResult {
            roi,
            profitability,
            total_revenue: round(total_revenue, CURRENCY_DP),
            total_contribution: round(cumulative_contribution, CURRENCY_DP),
            revenue_per_customer: round(safe_divide(total_revenue, size, 0.0), CURRENCY_DP),
            contribution_per_customer: round(safe_divide(cumulative_contribution, size, 0.0), CURRENCY_DP),
            acquisition_cost_per_customer: round(safe_divide(acquisition_cost, size, 0.0), CURRENCY_DP),
            retained_customers_at_end: round(active, UNITS_DP),
            payback_month,
            monthly,
        }
    }
}
