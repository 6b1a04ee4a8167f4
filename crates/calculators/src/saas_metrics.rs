use core_types::numeric::{
    assert_count_range, assert_positive, assert_range, round, round_opt, safe_divide, to_f64,
    CURRENCY_DP, MONTHS_DP, PERCENT_DP,
};
use core_types::{payback_months, Bands, Calculator, CalculatorId, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitEconomicsHealth {
    Healthy,
    Viable,
    Risky,
}

/// LTV/CAC bands: 3x or better is healthy, below 1x loses money per customer.
pub const LTV_CAC_BANDS: Bands<UnitEconomicsHealth> = Bands::new(
    &[(3.0, UnitEconomicsHealth::Healthy), (1.0, UnitEconomicsHealth::Viable)],
    UnitEconomicsHealth::Risky,
);
pub const RULE_OF_40_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaasMetricsInput {
    pub monthly_recurring_revenue: Decimal,
    pub customer_count: u32,
    /// Percent of customers lost per month, in `(0, 100]`.
    pub monthly_churn_rate: Decimal,
    pub customer_acquisition_cost: Decimal,
    pub gross_margin_pct: Decimal,
    /// Year-over-year revenue growth, percent.
    pub revenue_growth_rate: Decimal,
    /// Operating profit margin, percent. Negative while burning cash.
    pub profit_margin: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaasMetricsResult {
    pub ltv_to_cac: Decimal,
    pub health: UnitEconomicsHealth,
    pub average_revenue_per_user: Decimal,
    pub annual_recurring_revenue: Decimal,
    pub customer_lifetime_months: Decimal,
    pub customer_lifetime_value: Decimal,
    /// Months of gross profit per customer needed to recover its acquisition cost.
    pub cac_payback_months: Option<Decimal>,
    pub rule_of_40_score: Decimal,
    pub meets_rule_of_40: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SaasMetricsCalculator;

impl SaasMetricsCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl Calculator for SaasMetricsCalculator {
    type Input = SaasMetricsInput;
    type Output = SaasMetricsResult;

    fn id(&self) -> CalculatorId {
        CalculatorId::SaasMetrics
    }

    fn validate(&self, input: &SaasMetricsInput) -> Result<(), ValidationError> {
        assert_positive(input.monthly_recurring_revenue, "monthly_recurring_revenue")?;
        assert_count_range(input.customer_count, 1, u32::MAX, "customer_count")?;
        assert_positive(input.monthly_churn_rate, "monthly_churn_rate")?;
        assert_range(input.monthly_churn_rate, Decimal::ZERO, Decimal::ONE_HUNDRED, "monthly_churn_rate")?;
        assert_positive(input.customer_acquisition_cost, "customer_acquisition_cost")?;
        assert_range(input.gross_margin_pct, Decimal::ZERO, Decimal::ONE_HUNDRED, "gross_margin_pct")?;
        assert_range(
            input.revenue_growth_rate,
            Decimal::from(-100),
            Decimal::from(1000),
            "revenue_growth_rate",
        )?;
        assert_range(
            input.profit_margin,
            Decimal::from(-100),
            Decimal::ONE_HUNDRED,
            "profit_margin",
        )
    }

    fn compute(&self, input: &SaasMetricsInput) -> SaasMetricsResult {
        let mrr = to_f64(input.monthly_recurring_revenue);
        let churn = to_f64(input.monthly_churn_rate) / 100.0;
        let margin = to_f64(input.gross_margin_pct) / 100.0;
        let cac = to_f64(input.customer_acquisition_cost);

        let arpu = safe_divide(mrr, input.customer_count as f64, 0.0);
        let lifetime_months = safe_divide(1.0, churn, 0.0);
        let monthly_gross_profit = arpu * margin;
        let ltv = monthly_gross_profit * lifetime_months;
        let ltv_to_cac = safe_divide(ltv, cac, 0.0);
        let rule_of_40 = round(
            to_f64(input.revenue_growth_rate) + to_f64(input.profit_margin),
            PERCENT_DP,
        );
        let payback = payback_months(cac, monthly_gross_profit);
        let (ltv_to_cac, health) = LTV_CAC_BANDS.round_and_classify(ltv_to_cac, PERCENT_DP);

        tracing::debug!(%ltv_to_cac, ?health, %rule_of_40, ?payback, "SaaS metrics evaluated");

        SaasMetricsResult {
            ltv_to_cac,
            health,
            average_revenue_per_user: round(arpu, CURRENCY_DP),
            annual_recurring_revenue: round(mrr * 12.0, CURRENCY_DP),
            customer_lifetime_months: round(lifetime_months, MONTHS_DP),
            customer_lifetime_value: round(ltv, CURRENCY_DP),
            cac_payback_months: round_opt(payback, MONTHS_DP),
            meets_rule_of_40: to_f64(rule_of_40) >= RULE_OF_40_THRESHOLD,
            rule_of_40_score: rule_of_40,
        }
    }
}
