use core_types::numeric::{
    assert_below, assert_non_negative, assert_positive, round, safe_divide, to_f64, CURRENCY_DP,
    PERCENT_DP,
};
use core_types::{Calculator, CalculatorId, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const PREMIUM_MULTIPLIER: f64 = 1.25;
pub const COMPETITIVE_MULTIPLIER: f64 = 1.0;
pub const PENETRATION_MULTIPLIER: f64 = 0.85;
/// Half-width of the recommended price band.
pub const PRICE_RANGE_SPREAD: f64 = 0.10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    pub cost_per_unit: Decimal,
    /// Target gross margin as a percent of price, in `[0, 100)`.
    pub desired_margin: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: Decimal,
    /// Gross margin realized at this price, percent of price.
    pub margin_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStrategies {
    pub premium: PricePoint,
    pub competitive: PricePoint,
    pub penetration: PricePoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: Decimal,
    pub high: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPosition {
    Above,
    Below,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorComparison {
    pub competitor_price: Decimal,
    /// Recommended price minus competitor price.
    pub difference: Decimal,
    pub percentage_diff: Decimal,
    pub position: MarketPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub recommended_price: Decimal,
    pub gross_profit_per_unit: Decimal,
    pub markup_percentage: Decimal,
    pub price_strategies: PriceStrategies,
    pub recommended_price_range: PriceRange,
    pub competitor_comparison: Option<CompetitorComparison>,
}

/// Cost-plus pricing with strategy variants.
#[derive(Debug, Default, Clone, Copy)]
pub struct PricingCalculator;

impl PricingCalculator {
    pub fn new() -> Self {
        Self
    }

    /// `cost / (1 - margin)`, or `None` when the price is too large to represent.
    ///
    /// Evaluated in `Decimal`: in `f64` a margin a hair under 100% collapses to
    /// exactly 100%.
    fn target_price(input: &PricingInput) -> Option<Decimal> {
        let retained = Decimal::ONE - input.desired_margin / Decimal::ONE_HUNDRED;
        input.cost_per_unit.checked_div(retained)
    }

    fn price_point(price: f64, cost: f64) -> PricePoint {
        PricePoint {
            price: round(price, CURRENCY_DP),
            margin_pct: round(safe_divide(price - cost, price, 0.0) * 100.0, PERCENT_DP),
        }
    }
}

impl Calculator for PricingCalculator {
    type Input = PricingInput;
    type Output = PricingResult;

    fn id(&self) -> CalculatorId {
        CalculatorId::Pricing
    }

    fn validate(&self, input: &PricingInput) -> Result<(), ValidationError> {
        assert_positive(input.cost_per_unit, "cost_per_unit")?;
        assert_non_negative(input.desired_margin, "desired_margin")?;
        // A 100% margin would need an infinite price.
        assert_below(input.desired_margin, Decimal::ONE_HUNDRED, "desired_margin")?;
        if Self::target_price(input).is_none() {
            return Err(ValidationError::invalid_input(
                "desired_margin",
                format!("implies a price too large to represent (got {})", input.desired_margin),
            ));
        }
        if let Some(price) = input.competitor_price {
            assert_positive(price, "competitor_price")?;
        }
        Ok(())
    }

    fn compute(&self, input: &PricingInput) -> PricingResult {
        let cost = to_f64(input.cost_per_unit);
        let price = Self::target_price(input).map_or(cost, to_f64);
        let gross_profit = price - cost;
        let markup = safe_divide(gross_profit, cost, 0.0) * 100.0;

        let competitor_comparison = input.competitor_price.map(|competitor| {
            let competitor = to_f64(competitor);
            let difference = price - competitor;
            CompetitorComparison {
                competitor_price: round(competitor, CURRENCY_DP),
                difference: round(difference, CURRENCY_DP),
                percentage_diff: round(safe_divide(difference, competitor, 0.0) * 100.0, PERCENT_DP),
                position: if difference > 0.0 { MarketPosition::Above } else { MarketPosition::Below },
            }
        });

        tracing::debug!(price, markup, "pricing computed");

        PricingResult {
            recommended_price: round(price, CURRENCY_DP),
            gross_profit_per_unit: round(gross_profit, CURRENCY_DP),
            markup_percentage: round(markup, PERCENT_DP),
            price_strategies: PriceStrategies {
                premium: Self::price_point(price * PREMIUM_MULTIPLIER, cost),
                competitive: Self::price_point(price * COMPETITIVE_MULTIPLIER, cost),
                penetration: Self::price_point(price * PENETRATION_MULTIPLIER, cost),
            },
            recommended_price_range: PriceRange {
                low: round(price * (1.0 - PRICE_RANGE_SPREAD), CURRENCY_DP),
                high: round(price * (1.0 + PRICE_RANGE_SPREAD), CURRENCY_DP),
            },
            competitor_comparison,
        }
    }
}
