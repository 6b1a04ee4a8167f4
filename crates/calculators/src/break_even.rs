use core_types::numeric::{
    assert_count_range, assert_positive, round, round_opt, safe_divide, to_f64, CURRENCY_DP,
    PERCENT_DP, UNITS_DP,
};
use core_types::{Calculator, CalculatorId, ValidationError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PERIOD_MONTHS: u32 = 12;

// Margin-of-safety bands, percent.
const THIN_MARGIN_OF_SAFETY: Decimal = dec!(10);
const HEALTHY_MARGIN_OF_SAFETY: Decimal = dec!(25);
// Contribution-margin bands, percent of price.
const LOW_CONTRIBUTION_MARGIN: Decimal = dec!(30);
const STRONG_CONTRIBUTION_MARGIN: Decimal = dec!(60);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub fixed_costs: Decimal,
    pub price_per_unit: Decimal,
    pub variable_cost_per_unit: Decimal,
    /// Enables the margin-of-safety figures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_sales_units: Option<Decimal>,
    /// Length of the period the fixed costs cover. Defaults to 12.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    pub contribution_margin_per_unit: Decimal,
    /// Percent of price.
    pub contribution_margin_ratio: Decimal,
    pub break_even_units: Decimal,
    pub break_even_revenue: Decimal,
    pub break_even_units_per_month: Decimal,
    pub break_even_revenue_per_month: Decimal,
    // Present only when current sales were supplied.
    pub margin_of_safety_units: Option<Decimal>,
    pub margin_of_safety_pct: Option<Decimal>,
    pub is_above_break_even: Option<bool>,
    pub recommendations: Vec<BreakEvenAdvice>,
}

/// Advisory derived from the result thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "advice", rename_all = "snake_case")]
pub enum BreakEvenAdvice {
    BelowBreakEven { shortfall_units: Decimal },
    ThinMarginOfSafety,
    ModerateMarginOfSafety,
    HealthyMarginOfSafety,
    LowContributionMargin,
    StrongContributionMargin,
}

impl fmt::Display for BreakEvenAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakEvenAdvice::BelowBreakEven { shortfall_units } => write!(
                f,
                "Sales are below break-even; sell {shortfall_units} more units to cover fixed costs"
            ),
            BreakEvenAdvice::ThinMarginOfSafety => {
                f.write_str("Margin of safety is under 10%; a small sales dip would cause a loss")
            }
            BreakEvenAdvice::ModerateMarginOfSafety => {
                f.write_str("Margin of safety is moderate; keep building sales volume")
            }
            BreakEvenAdvice::HealthyMarginOfSafety => {
                f.write_str("Margin of safety is healthy at 25% or more")
            }
            BreakEvenAdvice::LowContributionMargin => f.write_str(
                "Contribution margin is under 30% of price; review pricing or variable costs",
            ),
            BreakEvenAdvice::StrongContributionMargin => {
                f.write_str("Contribution margin is above 60% of price; volume growth pays off quickly")
            }
        }
    }
}

/// Ordered advice for a break-even result: margin of safety first, then
/// contribution margin.
pub fn recommendations(result: &BreakEvenResult) -> Vec<BreakEvenAdvice> {
    let mut advice = Vec::new();

    if let (Some(pct), Some(units)) = (result.margin_of_safety_pct, result.margin_of_safety_units) {
        if pct < Decimal::ZERO {
            advice.push(BreakEvenAdvice::BelowBreakEven { shortfall_units: units.abs() });
        } else if pct < THIN_MARGIN_OF_SAFETY {
            advice.push(BreakEvenAdvice::ThinMarginOfSafety);
        } else if pct < HEALTHY_MARGIN_OF_SAFETY {
            advice.push(BreakEvenAdvice::ModerateMarginOfSafety);
        } else {
            advice.push(BreakEvenAdvice::HealthyMarginOfSafety);
        }
    }

    if result.contribution_margin_ratio < LOW_CONTRIBUTION_MARGIN {
        advice.push(BreakEvenAdvice::LowContributionMargin);
    } else if result.contribution_margin_ratio > STRONG_CONTRIBUTION_MARGIN {
        advice.push(BreakEvenAdvice::StrongContributionMargin);
    }

    advice
}

/// Unit and revenue break-even point with margin of safety.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreakEvenCalculator;

impl BreakEvenCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Price minus variable cost, exact in `Decimal`.
    fn margin_per_unit(input: &BreakEvenInput) -> Decimal {
        input.price_per_unit - input.variable_cost_per_unit
    }
}

impl Calculator for BreakEvenCalculator {
    type Input = BreakEvenInput;
    type Output = BreakEvenResult;

    fn id(&self) -> CalculatorId {
        CalculatorId::BreakEven
    }

    fn validate(&self, input: &BreakEvenInput) -> Result<(), ValidationError> {
        assert_positive(input.fixed_costs, "fixed_costs")?;
        assert_positive(input.price_per_unit, "price_per_unit")?;
        assert_positive(input.variable_cost_per_unit, "variable_cost_per_unit")?;
        // Break-even is undefined without a positive contribution margin.
        if input.price_per_unit <= input.variable_cost_per_unit {
            return Err(ValidationError::invalid_input(
                "price_per_unit",
                format!(
                    "must exceed variable_cost_per_unit ({} <= {})",
                    input.price_per_unit, input.variable_cost_per_unit
                ),
            ));
        }
        // The break-even point must itself be representable.
        let margin = Self::margin_per_unit(input);
        let break_even_revenue = input
            .fixed_costs
            .checked_div(margin)
            .and_then(|units| units.checked_mul(input.price_per_unit));
        if break_even_revenue.is_none() {
            return Err(ValidationError::invalid_input(
                "price_per_unit",
                format!("contribution margin of {margin} per unit puts break-even beyond the representable range"),
            ));
        }
        if let Some(units) = input.current_sales_units {
            assert_positive(units, "current_sales_units")?;
        }
        if let Some(months) = input.period_months {
            assert_count_range(months, 1, u32::MAX, "period_months")?;
        }
        Ok(())
    }

    fn compute(&self, input: &BreakEvenInput) -> BreakEvenResult {
        let fixed_costs = to_f64(input.fixed_costs);
        let price = to_f64(input.price_per_unit);
        let period = input.period_months.unwrap_or(DEFAULT_PERIOD_MONTHS) as f64;

        // Subtracting in f64 would cancel a margin finer than its precision to zero.
        let margin_per_unit = to_f64(Self::margin_per_unit(input));
        let margin_ratio = safe_divide(margin_per_unit, price, 0.0);
        let break_even_units = safe_divide(fixed_costs, margin_per_unit, 0.0);
        let break_even_revenue = break_even_units * price;

        let current = input.current_sales_units.map(to_f64);
        let safety_units = current.map(|units| units - break_even_units);
        let safety_pct = current
            .zip(safety_units)
            .map(|(units, safety)| safe_divide(safety, units, 0.0) * 100.0);

        tracing::debug!(break_even_units, break_even_revenue, margin_ratio, "break-even computed");

        let mut result = BreakEvenResult {
            contribution_margin_per_unit: round(margin_per_unit, CURRENCY_DP),
            contribution_margin_ratio: round(margin_ratio * 100.0, PERCENT_DP),
            break_even_units: round(break_even_units, UNITS_DP),
            break_even_revenue: round(break_even_revenue, CURRENCY_DP),
            break_even_units_per_month: round(break_even_units / period, UNITS_DP),
            break_even_revenue_per_month: round(break_even_revenue / period, CURRENCY_DP),
            margin_of_safety_units: round_opt(safety_units, UNITS_DP),
            margin_of_safety_pct: round_opt(safety_pct, PERCENT_DP),
            is_above_break_even: current.map(|units| units >= break_even_units),
            recommendations: Vec::new(),
        };
        result.recommendations = recommendations(&result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> BreakEvenInput {
        BreakEvenInput {
            fixed_costs: dec!(10000),
            price_per_unit: dec!(50),
            variable_cost_per_unit: dec!(25),
            current_sales_units: None,
            period_months: None,
        }
    }

    #[test]
    fn reference_scenario() {
        let result = BreakEvenCalculator::new().calculate(&input()).unwrap();
        assert_eq!(result.break_even_units, dec!(400));
        assert_eq!(result.break_even_revenue, dec!(20000));
        assert_eq!(result.contribution_margin_per_unit, dec!(25));
        assert_eq!(result.contribution_margin_ratio, dec!(50));
        assert_eq!(result.break_even_revenue_per_month, dec!(1666.67));
        assert_eq!(result.break_even_units_per_month, dec!(33));
    }

    #[test]
    fn margin_of_safety_absent_without_current_sales() {
        let result = BreakEvenCalculator::new().calculate(&input()).unwrap();
        assert_eq!(result.margin_of_safety_units, None);
        assert_eq!(result.margin_of_safety_pct, None);
        assert_eq!(result.is_above_break_even, None);
        // Only the contribution-margin band applies, and 50% sits in neither extreme.
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn margin_of_safety_with_current_sales() {
        let mut input = input();
        input.current_sales_units = Some(dec!(500));
        let result = BreakEvenCalculator::new().calculate(&input).unwrap();

        assert_eq!(result.margin_of_safety_units, Some(dec!(100)));
        assert_eq!(result.margin_of_safety_pct, Some(dec!(20)));
        assert_eq!(result.is_above_break_even, Some(true));
        assert_eq!(result.recommendations, vec![BreakEvenAdvice::ModerateMarginOfSafety]);
    }

    #[test]
    fn below_break_even_advises_shortfall() {
        let mut input = input();
        input.current_sales_units = Some(dec!(300));
        input.variable_cost_per_unit = dec!(40);
        // Margin 10 per unit, break-even 1000 units, 20% contribution ratio.
        let result = BreakEvenCalculator::new().calculate(&input).unwrap();

        assert_eq!(result.is_above_break_even, Some(false));
        assert_eq!(
            result.recommendations,
            vec![
                BreakEvenAdvice::BelowBreakEven { shortfall_units: dec!(700) },
                BreakEvenAdvice::LowContributionMargin,
            ]
        );
        assert!(result.recommendations[0].to_string().contains("700"));
    }

    #[test]
    fn price_must_exceed_variable_cost() {
        let mut input = input();
        input.variable_cost_per_unit = dec!(50);
        let err = BreakEvenCalculator::new().calculate(&input).unwrap_err();
        assert_eq!(err.field(), "price_per_unit");
        assert_eq!(err.kind(), "invalid_input");
    }

    #[test]
    fn margin_of_safety_bands() {
        // Price 50, variable cost 25: the 50% contribution margin adds no advice.
        let cases = [
            (dec!(10000), dec!(300), vec![BreakEvenAdvice::BelowBreakEven { shortfall_units: dec!(100) }]),
            (dec!(10000), dec!(400), vec![BreakEvenAdvice::ThinMarginOfSafety]),
            (dec!(9001), dec!(400), vec![BreakEvenAdvice::ThinMarginOfSafety]),
            (dec!(9000), dec!(400), vec![BreakEvenAdvice::ModerateMarginOfSafety]),
            (dec!(7502.5), dec!(400), vec![BreakEvenAdvice::ModerateMarginOfSafety]),
            (dec!(7500), dec!(400), vec![BreakEvenAdvice::HealthyMarginOfSafety]),
        ];

        for (fixed_costs, current, expected) in cases {
            let input = BreakEvenInput {
                fixed_costs,
                current_sales_units: Some(current),
                ..input()
            };
            let result = BreakEvenCalculator::new().calculate(&input).unwrap();
            assert_eq!(
                result.recommendations, expected,
                "fixed costs {fixed_costs}, margin of safety {:?}",
                result.margin_of_safety_pct
            );
        }
    }

    #[test]
    fn contribution_margin_bands() {
        // Price 50: variable cost 35 is exactly 30%, 20 is exactly 60%.
        let cases = [
            (dec!(35.01), vec![BreakEvenAdvice::LowContributionMargin]),
            (dec!(35), vec![]),
            (dec!(20), vec![]),
            (dec!(19.99), vec![BreakEvenAdvice::StrongContributionMargin]),
        ];

        for (variable_cost_per_unit, expected) in cases {
            let input = BreakEvenInput { variable_cost_per_unit, ..input() };
            let result = BreakEvenCalculator::new().calculate(&input).unwrap();
            assert_eq!(
                result.recommendations, expected,
                "contribution margin {}",
                result.contribution_margin_ratio
            );
        }
    }

    #[test]
    fn safety_advice_precedes_margin_advice() {
        let input = BreakEvenInput {
            variable_cost_per_unit: dec!(10),
            current_sales_units: Some(dec!(200)),
            ..input()
        };
        // 80% contribution margin, break-even at 250 units.
        let result = BreakEvenCalculator::new().calculate(&input).unwrap();
        assert_eq!(
            result.recommendations,
            vec![
                BreakEvenAdvice::BelowBreakEven { shortfall_units: dec!(50) },
                BreakEvenAdvice::StrongContributionMargin,
            ]
        );
    }

    #[test]
    fn margin_below_f64_precision_still_breaks_even() {
        let input = BreakEvenInput {
            fixed_costs: dec!(10000),
            price_per_unit: Decimal::ONE + Decimal::new(1, 19),
            variable_cost_per_unit: Decimal::ONE,
            current_sales_units: Some(dec!(10)),
            period_months: None,
        };
        let result = BreakEvenCalculator::new().calculate(&input).unwrap();

        assert!(result.break_even_units > dec!(10000000000000000000000));
        assert_eq!(result.is_above_break_even, Some(false));
        assert!(result.margin_of_safety_pct.unwrap() < Decimal::ZERO);

        let costs = result.break_even_units * input.variable_cost_per_unit + input.fixed_costs;
        let revenue = result.break_even_units * input.price_per_unit;
        assert!((costs - revenue).abs() <= dec!(0.01), "{costs} vs {revenue}");
    }

    #[test]
    fn unrepresentable_break_even_is_rejected() {
        let input = BreakEvenInput {
            fixed_costs: dec!(100000000000000000000),
            price_per_unit: Decimal::ONE + Decimal::new(1, 28),
            variable_cost_per_unit: Decimal::ONE,
            current_sales_units: None,
            period_months: None,
        };
        let err = BreakEvenCalculator::new().calculate(&input).unwrap_err();
        assert_eq!(err.field(), "price_per_unit");
    }

    #[test]
    fn custom_period_scales_monthly_figures() {
        let mut input = input();
        input.period_months = Some(4);
        let result = BreakEvenCalculator::new().calculate(&input).unwrap();
        assert_eq!(result.break_even_units_per_month, dec!(100));
        assert_eq!(result.break_even_revenue_per_month, dec!(5000));
    }
}
