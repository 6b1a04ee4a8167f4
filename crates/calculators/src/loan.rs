use core_types::numeric::{
    assert_count_range, assert_non_negative, assert_positive, round, safe_divide, to_f64,
    CURRENCY_DP, PERCENT_DP,
};
use core_types::{Calculator, CalculatorId, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Debt service below this share of disposable income counts as affordable.
pub const AFFORDABILITY_THRESHOLD_PCT: f64 = 40.0;
/// Reported ratio when there is no disposable income to service the debt.
const NO_DISPOSABLE_INCOME_RATIO_PCT: f64 = 100.0;
pub const MAX_TERM_MONTHS: u32 = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Decimal,
    /// Nominal annual rate in percent, compounded monthly.
    pub annual_interest_rate: Decimal,
    pub term_months: u32,
    // Affordability is assessed only when both are supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_revenue: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_expenses: Option<Decimal>,
}

/// One month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_payment: Decimal,
    pub total_payment: Decimal,
    pub total_interest: Decimal,
    /// `(1 + i)^12 - 1`, percent.
    pub effective_annual_rate: Decimal,
    /// Payment as a percentage of monthly revenue minus expenses.
    pub debt_service_ratio: Option<Decimal>,
    pub is_affordable: Option<bool>,
    pub cushion_after_payment: Option<Decimal>,
    pub schedule: Vec<AmortizationRow>,
}

/// Fixed-rate amortizing loan.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoanCalculator;

impl LoanCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Level payment for `principal` over `term` months at monthly rate `rate`.
    pub fn monthly_payment(principal: f64, rate: f64, term: u32) -> f64 {
        if rate == 0.0 {
            // The annuity formula divides by zero here.
            return principal / term as f64;
        }
        principal * rate / (1.0 - (1.0 + rate).powi(-(term as i32)))
    }

    /// Builds the month-by-month schedule. The final row repays whatever
    /// balance remains, so it always closes at exactly zero.
    fn schedule(&self, principal: f64, rate: f64, term: u32, payment: f64) -> Vec<AmortizationRow> {
        let mut balance = principal;
        let mut rows = Vec::with_capacity(term as usize);

        for month in 1..=term {
            let interest = balance * rate;
            let (principal_portion, row_payment) = if month == term {
                (balance, balance + interest)
            } else {
                (payment - interest, payment)
            };
            balance = (balance - principal_portion).max(0.0);
            if month == term {
                balance = 0.0;
            }

            rows.push(AmortizationRow {
                month,
                payment: round(row_payment, CURRENCY_DP),
                principal: round(principal_portion, CURRENCY_DP),
                interest: round(interest, CURRENCY_DP),
                balance: round(balance, CURRENCY_DP),
            });
        }

        rows
    }
}

impl Calculator for LoanCalculator {
    type Input = LoanInput;
    type Output = LoanResult;

    fn id(&self) -> CalculatorId {
        CalculatorId::Loan
    }

    fn validate(&self, input: &LoanInput) -> Result<(), ValidationError> {
        assert_positive(input.principal, "principal")?;
        assert_non_negative(input.annual_interest_rate, "annual_interest_rate")?;
        assert_count_range(input.term_months, 1, MAX_TERM_MONTHS, "term_months")?;
        if let Some(revenue) = input.monthly_revenue {
            assert_positive(revenue, "monthly_revenue")?;
        }
        if let Some(expenses) = input.monthly_expenses {
            assert_non_negative(expenses, "monthly_expenses")?;
        }
        Ok(())
    }

    fn compute(&self, input: &LoanInput) -> LoanResult {
        let principal = to_f64(input.principal);
        let rate = to_f64(input.annual_interest_rate) / 100.0 / 12.0;
        let term = input.term_months;

        let payment = Self::monthly_payment(principal, rate, term);
        let total_payment = payment * term as f64;
        let total_interest = total_payment - principal;
        let effective_annual_rate = ((1.0 + rate).powi(12) - 1.0) * 100.0;

        let affordability = input
            .monthly_revenue
            .zip(input.monthly_expenses)
            .map(|(revenue, expenses)| {
                let disposable = to_f64(revenue) - to_f64(expenses);
                let ratio = round(
                    if disposable > 0.0 {
                        safe_divide(payment, disposable, 1.0) * 100.0
                    } else {
                        NO_DISPOSABLE_INCOME_RATIO_PCT
                    },
                    PERCENT_DP,
                );
                // Judged on the reported ratio.
                (ratio, to_f64(ratio) < AFFORDABILITY_THRESHOLD_PCT, disposable - payment)
            });

        tracing::debug!(payment, total_interest, term, "loan amortized");

        LoanResult {
            monthly_payment: round(payment, CURRENCY_DP),
            total_payment: round(total_payment, CURRENCY_DP),
            total_interest: round(total_interest, CURRENCY_DP),
            effective_annual_rate: round(effective_annual_rate, PERCENT_DP),
            debt_service_ratio: affordability.map(|(ratio, _, _)| ratio),
            is_affordable: affordability.map(|(_, affordable, _)| affordable),
            cushion_after_payment: affordability.map(|(_, _, cushion)| round(cushion, CURRENCY_DP)),
            schedule: self.schedule(principal, rate, term, payment),
        }
    }
}
