use core_types::numeric::{
    assert_count_range, assert_non_negative, assert_positive, assert_range, round, round_opt,
    safe_divide, to_f64, CURRENCY_DP, MONTHS_DP, PERCENT_DP,
};
use core_types::{payback_months, Bands, Calculator, CalculatorId, RoiRating, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Campaign ROI bands, percent.
pub const MARKETING_ROI_BANDS: Bands<RoiRating> =
    Bands::new(&[(50.0, RoiRating::Positive), (0.0, RoiRating::Neutral)], RoiRating::Negative);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingRoiInput {
    pub campaign_cost: Decimal,
    /// Revenue attributed to the campaign.
    pub revenue_generated: Decimal,
    /// When supplied, ROI is measured on gross profit instead of revenue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_margin_pct: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_customers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_lifetime_value: Option<Decimal>,
    /// Campaign length, enables the payback estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingRoiResult {
    pub roi: Decimal,
    pub rating: RoiRating,
    pub gross_profit: Decimal,
    pub net_return: Decimal,
    /// Return on ad spend: revenue per unit of cost.
    pub roas: Decimal,
    pub cost_per_acquisition: Option<Decimal>,
    pub ltv_to_cac: Option<Decimal>,
    pub payback_months: Option<Decimal>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MarketingRoiCalculator;

impl MarketingRoiCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl Calculator for MarketingRoiCalculator {
    type Input = MarketingRoiInput;
    type Output = MarketingRoiResult;

    fn id(&self) -> CalculatorId {
        CalculatorId::MarketingRoi
    }

    fn validate(&self, input: &MarketingRoiInput) -> Result<(), ValidationError> {
        assert_positive(input.campaign_cost, "campaign_cost")?;
        assert_non_negative(input.revenue_generated, "revenue_generated")?;
        if let Some(margin) = input.gross_margin_pct {
            assert_range(margin, Decimal::ZERO, Decimal::ONE_HUNDRED, "gross_margin_pct")?;
        }
        if let Some(customers) = input.new_customers {
            assert_count_range(customers, 1, u32::MAX, "new_customers")?;
        }
        if let Some(ltv) = input.customer_lifetime_value {
            assert_positive(ltv, "customer_lifetime_value")?;
        }
        if let Some(months) = input.campaign_months {
            assert_count_range(months, 1, u32::MAX, "campaign_months")?;
        }
        Ok(())
    }

    fn compute(&self, input: &MarketingRoiInput) -> MarketingRoiResult {
        let cost = to_f64(input.campaign_cost);
        let revenue = to_f64(input.revenue_generated);
        let gross_profit = match input.gross_margin_pct {
            Some(margin) => revenue * to_f64(margin) / 100.0,
            None => revenue,
        };

        let net_return = gross_profit - cost;
        let roi = safe_divide(net_return, cost, 0.0) * 100.0;
        let cost_per_acquisition = input.new_customers.map(|n| safe_divide(cost, n as f64, 0.0));
        let ltv_to_cac = cost_per_acquisition
            .zip(input.customer_lifetime_value)
            .map(|(cac, ltv)| safe_divide(to_f64(ltv), cac, 0.0));
        let payback = input
            .campaign_months
            .and_then(|months| payback_months(cost, gross_profit / months as f64));
        let (roi, rating) = MARKETING_ROI_BANDS.round_and_classify(roi, PERCENT_DP);

        tracing::debug!(%roi, ?rating, net_return, ?payback, "marketing ROI evaluated");

        MarketingRoiResult {
            roi,
            rating,
            gross_profit: round(gross_profit, CURRENCY_DP),
            net_return: round(net_return, CURRENCY_DP),
            roas: round(safe_divide(revenue, cost, 0.0), PERCENT_DP),
            cost_per_acquisition: round_opt(cost_per_acquisition, CURRENCY_DP),
            ltv_to_cac: round_opt(ltv_to_cac, PERCENT_DP),
            payback_months: round_opt(payback, MONTHS_DP),
        }
    }
}
