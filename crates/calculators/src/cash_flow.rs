use core_types::numeric::{assert_positive, assert_range, round, to_f64, CURRENCY_DP};
use core_types::{Calculator, CalculatorId, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FORECAST_MONTHS: u32 = 12;
/// A deficit this close is critical rather than a warning.
pub const CRITICAL_DEFICIT_MONTHS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowInput {
    pub starting_cash: Decimal,
    pub monthly_revenue: Decimal,
    pub monthly_expenses: Decimal,
    /// Month-over-month revenue growth in percent. May be negative.
    pub expected_growth_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyForecast {
    pub month: u32,
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub net_cash: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "alert", rename_all = "snake_case")]
pub enum CashFlowAlert {
    ImminentDeficit { month: u32 },
    DeficitAhead { month: u32 },
    NegativeNetCash,
    ShrinkingBalance,
    /// Still solvent, but the low point would not cover one month of expenses.
    ThinReserve,
}

impl CashFlowAlert {
    pub fn severity(&self) -> AlertSeverity {
        match self {
            CashFlowAlert::ImminentDeficit { .. } => AlertSeverity::Critical,
            CashFlowAlert::DeficitAhead { .. }
            | CashFlowAlert::NegativeNetCash
            | CashFlowAlert::ShrinkingBalance => AlertSeverity::Warning,
            CashFlowAlert::ThinReserve => AlertSeverity::Info,
        }
    }
}

impl fmt::Display for CashFlowAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CashFlowAlert::ImminentDeficit { month } => {
                write!(f, "Cash runs out in month {month}; act immediately")
            }
            CashFlowAlert::DeficitAhead { month } => {
                write!(f, "Cash is projected to run out in month {month}")
            }
            CashFlowAlert::NegativeNetCash => {
                f.write_str("Expenses exceed revenue; the business is burning cash")
            }
            CashFlowAlert::ShrinkingBalance => {
                f.write_str("Cash balance ends the year lower than it started")
            }
            CashFlowAlert::ThinReserve => {
                f.write_str("Lowest projected balance is below one month of expenses")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowResult {
    pub ending_cash: Decimal,
    pub total_net_cash: Decimal,
    /// First month with a negative balance; `None` means no deficit within the horizon.
    pub months_until_deficit: Option<u32>,
    /// Lowest balance over the horizon.
    pub minimum_cash_reserve: Decimal,
    pub is_healthy: bool,
    pub alerts: Vec<CashFlowAlert>,
    pub forecast: Vec<MonthlyForecast>,
}

/// 12-month rolling cash projection.
#[derive(Debug, Default, Clone, Copy)]
pub struct CashFlowCalculator;

impl CashFlowCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl Calculator for CashFlowCalculator {
    type Input = CashFlowInput;
    type Output = CashFlowResult;

    fn id(&self) -> CalculatorId {
        CalculatorId::CashFlow
    }

    fn validate(&self, input: &CashFlowInput) -> Result<(), ValidationError> {
        assert_positive(input.starting_cash, "starting_cash")?;
        assert_positive(input.monthly_revenue, "monthly_revenue")?;
        assert_positive(input.monthly_expenses, "monthly_expenses")?;
        assert_range(
            input.expected_growth_rate,
            Decimal::from(-100),
            Decimal::from(1000),
            "expected_growth_rate",
        )
    }

    fn compute(&self, input: &CashFlowInput) -> CashFlowResult {
        let starting_cash = to_f64(input.starting_cash);
        let revenue = to_f64(input.monthly_revenue);
        let expenses = to_f64(input.monthly_expenses);
        let growth = 1.0 + to_f64(input.expected_growth_rate) / 100.0;

        let mut balance = starting_cash;
        let mut minimum = f64::INFINITY;
        let mut total_net = 0.0;
        let mut months_until_deficit = None;
        let mut first_net = 0.0;
        let mut forecast = Vec::with_capacity(FORECAST_MONTHS as usize);

        for month in 1..=FORECAST_MONTHS {
            let month_revenue = revenue * growth.powi(month as i32 - 1);
            let net = month_revenue - expenses;
            if month == 1 {
                first_net = net;
            }
            balance += net;
            total_net += net;
            minimum = minimum.min(balance);
            if balance < 0.0 && months_until_deficit.is_none() {
                months_until_deficit = Some(month);
            }

            forecast.push(MonthlyForecast {
                month,
                revenue: round(month_revenue, CURRENCY_DP),
                expenses: round(expenses, CURRENCY_DP),
                net_cash: round(net, CURRENCY_DP),
                balance: round(balance, CURRENCY_DP),
            });
        }

        // --- Alerts ---
        let mut alerts = Vec::new();
        match months_until_deficit {
            Some(month) if month <= CRITICAL_DEFICIT_MONTHS => {
                alerts.push(CashFlowAlert::ImminentDeficit { month })
            }
            Some(month) => alerts.push(CashFlowAlert::DeficitAhead { month }),
            None => {}
        }
        if first_net < 0.0 {
            alerts.push(CashFlowAlert::NegativeNetCash);
        }
        if balance < starting_cash {
            alerts.push(CashFlowAlert::ShrinkingBalance);
        }
        if months_until_deficit.is_none() && minimum < expenses {
            alerts.push(CashFlowAlert::ThinReserve);
        }

        tracing::debug!(ending_cash = balance, ?months_until_deficit, alerts = alerts.len(), "cash flow forecast");

        CashFlowResult {
            ending_cash: round(balance, CURRENCY_DP),
            total_net_cash: round(total_net, CURRENCY_DP),
            months_until_deficit,
            minimum_cash_reserve: round(minimum, CURRENCY_DP),
            is_healthy: months_until_deficit.is_none(),
            alerts,
            forecast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input() -> CashFlowInput {
        CashFlowInput {
            starting_cash: dec!(10000),
            monthly_revenue: dec!(8000),
            monthly_expenses: dec!(7000),
            expected_growth_rate: dec!(0),
        }
    }

    #[test]
    fn flat_growth_accumulates_linearly() {
        let result = CashFlowCalculator::new().calculate(&input()).unwrap();

        assert_eq!(result.forecast.len(), 12);
        assert_eq!(result.forecast[0].balance, dec!(11000));
        assert_eq!(result.ending_cash, dec!(22000));
        assert_eq!(result.total_net_cash, dec!(12000));
        assert_eq!(result.minimum_cash_reserve, dec!(11000));
        assert!(result.is_healthy);
        assert!(result.alerts.is_empty());
    }

    #[test]
    fn balances_chain_through_net_cash() {
        let mut input = input();
        input.expected_growth_rate = dec!(3);
        let result = CashFlowCalculator::new().calculate(&input).unwrap();

        let mut previous = input.starting_cash;
        for row in &result.forecast {
            assert!((row.balance - (previous + row.net_cash)).abs() <= dec!(0.02));
            previous = row.balance;
        }
        assert!(result.forecast[11].revenue > result.forecast[0].revenue);
    }

    #[test]
    fn early_deficit_is_critical() {
        let mut input = input();
        input.monthly_expenses = dec!(12000);
        // Burning 4000 a month from 10000: negative in month 3.
        let result = CashFlowCalculator::new().calculate(&input).unwrap();

        assert_eq!(result.months_until_deficit, Some(3));
        assert!(!result.is_healthy);
        assert_eq!(result.minimum_cash_reserve, dec!(-38000));
        assert_eq!(
            result.alerts,
            vec![
                CashFlowAlert::ImminentDeficit { month: 3 },
                CashFlowAlert::NegativeNetCash,
                CashFlowAlert::ShrinkingBalance,
            ]
        );
        assert_eq!(result.alerts[0].severity(), AlertSeverity::Critical);
    }

    #[test]
    fn late_deficit_is_a_warning() {
        let mut input = input();
        input.monthly_expenses = dec!(9000);
        // Burning 1000 a month from 10000: negative in month 11.
        let result = CashFlowCalculator::new().calculate(&input).unwrap();

        assert_eq!(result.months_until_deficit, Some(11));
        assert_eq!(result.alerts[0], CashFlowAlert::DeficitAhead { month: 11 });
        assert_eq!(result.alerts[0].severity(), AlertSeverity::Warning);
    }

    #[test]
    fn thin_reserve_is_informational() {
        let mut input = input();
        input.starting_cash = dec!(3000);
        input.monthly_revenue = dec!(6900);
        // Loses 100 a month: lowest balance 1800, below 7000 of expenses.
        let result = CashFlowCalculator::new().calculate(&input).unwrap();

        assert!(result.is_healthy);
        assert!(result.alerts.contains(&CashFlowAlert::ThinReserve));
        assert!(result.alerts.contains(&CashFlowAlert::ShrinkingBalance));
    }

    #[test]
    fn rejects_non_positive_cash() {
        let mut input = input();
        input.starting_cash = dec!(0);
        let err = CashFlowCalculator::new().calculate(&input).unwrap_err();
        assert_eq!(err.field(), "starting_cash");
    }
}
