use core_types::numeric::{
    assert_count_range, assert_non_negative, assert_positive, assert_range, round, round_opt,
    safe_divide, to_f64, CURRENCY_DP, MONTHS_DP, PERCENT_DP,
};
use core_types::{payback_months, Bands, Calculator, CalculatorId, RoiRating, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// First-year ROI bands, percent.
pub const EMPLOYEE_ROI_BANDS: Bands<RoiRating> =
    Bands::new(&[(20.0, RoiRating::Positive), (0.0, RoiRating::Neutral)], RoiRating::Negative);
pub const MAX_RAMP_UP_MONTHS: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRoiInput {
    pub annual_salary: Decimal,
    /// Benefits and payroll taxes as a percent of salary.
    pub benefits_pct: Decimal,
    pub recruitment_cost: Decimal,
    pub training_cost: Decimal,
    pub equipment_cost: Decimal,
    /// Revenue or savings attributable to the hire at full productivity.
    pub expected_annual_value: Decimal,
    /// Months at half productivity before full output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ramp_up_months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRoiResult {
    /// First-year ROI, percent.
    pub roi: Decimal,
    pub rating: RoiRating,
    pub total_first_year_cost: Decimal,
    pub first_year_value: Decimal,
    pub net_benefit: Decimal,
    pub value_to_cost_ratio: Decimal,
    pub monthly_cost: Decimal,
    /// Months of recurring surplus needed to recover the one-time costs.
    /// `None` when the hire never produces a recurring surplus.
    pub payback_months: Option<Decimal>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmployeeRoiCalculator;

impl EmployeeRoiCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl Calculator for EmployeeRoiCalculator {
    type Input = EmployeeRoiInput;
    type Output = EmployeeRoiResult;

    fn id(&self) -> CalculatorId {
        CalculatorId::EmployeeRoi
    }

    fn validate(&self, input: &EmployeeRoiInput) -> Result<(), ValidationError> {
        assert_positive(input.annual_salary, "annual_salary")?;
        assert_range(input.benefits_pct, Decimal::ZERO, Decimal::ONE_HUNDRED, "benefits_pct")?;
        assert_non_negative(input.recruitment_cost, "recruitment_cost")?;
        assert_non_negative(input.training_cost, "training_cost")?;
        assert_non_negative(input.equipment_cost, "equipment_cost")?;
        assert_positive(input.expected_annual_value, "expected_annual_value")?;
        if let Some(months) = input.ramp_up_months {
            assert_count_range(months, 0, MAX_RAMP_UP_MONTHS, "ramp_up_months")?;
        }
        Ok(())
    }

    fn compute(&self, input: &EmployeeRoiInput) -> EmployeeRoiResult {
        let recurring_cost = to_f64(input.annual_salary) * (1.0 + to_f64(input.benefits_pct) / 100.0);
        let one_time_cost =
            to_f64(input.recruitment_cost) + to_f64(input.training_cost) + to_f64(input.equipment_cost);
        let total_cost = recurring_cost + one_time_cost;

        let annual_value = to_f64(input.expected_annual_value);
        let ramp_up = input.ramp_up_months.unwrap_or(0) as f64;
        let first_year_value = annual_value / 12.0 * (12.0 - ramp_up / 2.0);

        let net_benefit = first_year_value - total_cost;
        let roi = safe_divide(net_benefit, total_cost, 0.0) * 100.0;
        let payback = payback_months(one_time_cost, (annual_value - recurring_cost) / 12.0);
        let (roi, rating) = EMPLOYEE_ROI_BANDS.round_and_classify(roi, PERCENT_DP);

        tracing::debug!(%roi, ?rating, total_cost, ?payback, "employee ROI evaluated");

        EmployeeRoiResult {
            roi,
            rating,
            total_first_year_cost: round(total_cost, CURRENCY_DP),
            first_year_value: round(first_year_value, CURRENCY_DP),
            net_benefit: round(net_benefit, CURRENCY_DP),
            value_to_cost_ratio: round(safe_divide(first_year_value, total_cost, 0.0), PERCENT_DP),
            monthly_cost: round(recurring_cost / 12.0, CURRENCY_DP),
            payback_months: round_opt(payback, MONTHS_DP),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn hire() -> EmployeeRoiInput {
        EmployeeRoiInput {
            annual_salary: dec!(60000),
            benefits_pct: dec!(20),
            recruitment_cost: dec!(5000),
            training_cost: dec!(3000),
            equipment_cost: dec!(2000),
            expected_annual_value: dec!(120000),
            ramp_up_months: Some(4),
        }
    }

    #[test]
    fn first_year_roi_accounts_for_ramp_up() {
        let result = EmployeeRoiCalculator::new().calculate(&hire()).unwrap();

        assert_eq!(result.total_first_year_cost, dec!(82000));
        assert_eq!(result.first_year_value, dec!(100000));
        assert_eq!(result.net_benefit, dec!(18000));
        assert_eq!(result.roi, dec!(21.95));
        assert_eq!(result.rating, RoiRating::Positive);
        assert_eq!(result.value_to_cost_ratio, dec!(1.22));
        assert_eq!(result.monthly_cost, dec!(6000));
        assert_eq!(result.payback_months, Some(dec!(2.5)));
    }

    #[test]
    fn unprofitable_hire_has_no_payback() {
        let mut input = hire();
        input.expected_annual_value = dec!(50000);
        let result = EmployeeRoiCalculator::new().calculate(&input).unwrap();

        assert_eq!(result.rating, RoiRating::Negative);
        assert_eq!(result.payback_months, None);
    }

    #[test]
    fn modest_return_is_neutral() {
        let mut input = hire();
        input.ramp_up_months = None;
        input.expected_annual_value = dec!(90000);
        // 90000 value against 82000 cost: 9.76%.
        let result = EmployeeRoiCalculator::new().calculate(&input).unwrap();
        assert_eq!(result.rating, RoiRating::Neutral);
    }

    #[test]
    fn rating_agrees_with_reported_roi_at_band_edge() {
        let input = EmployeeRoiInput {
            annual_salary: dec!(100000),
            benefits_pct: dec!(0),
            recruitment_cost: dec!(0),
            training_cost: dec!(0),
            equipment_cost: dec!(0),
            expected_annual_value: dec!(119996),
            ramp_up_months: None,
        };
        // 19.996% rounds to the 20% Positive threshold.
        let result = EmployeeRoiCalculator::new().calculate(&input).unwrap();
        assert_eq!(result.roi, dec!(20.00));
        assert_eq!(result.rating, RoiRating::Positive);
    }

    #[test]
    fn rejects_excessive_ramp_up() {
        let mut input = hire();
        input.ramp_up_months = Some(13);
        let err = EmployeeRoiCalculator::new().calculate(&input).unwrap_err();
        assert_eq!(err.field(), "ramp_up_months");
    }
}
