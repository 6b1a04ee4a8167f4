use crate::irr::{internal_rate_of_return, net_present_value};
use crate::report::{ProjectedMonth, StandardMetricsInput, StandardMetricsResult};
use core_types::numeric::{
    assert_count_range, assert_positive, assert_range, round, safe_divide, to_f64, CURRENCY_DP,
    MONTHS_DP, PERCENT_DP,
};
use core_types::{Calculator, CalculatorId, ValidationError};
use rust_decimal::Decimal;

pub const MAX_PROJECT_DURATION_MONTHS: u32 = 600;

/// A stateless calculator for the standard project metrics: ROI, NPV, IRR
/// and payback period over a projected monthly cash-flow series.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardMetricsCalculator;

/// The unrounded monthly series the metrics are derived from.
struct Projection {
    revenue: Vec<f64>,
    costs: Vec<f64>,
    net: Vec<f64>,
}

impl StandardMetricsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Builds the monthly revenue, cost and net series.
    ///
    /// Growth compounds once per project year; costs are flat.
    fn project(&self, input: &StandardMetricsInput) -> Projection {
        let months = input.project_duration as usize;
        let yearly_revenue = to_f64(input.yearly_revenue);
        let growth = to_f64(input.revenue_growth) / 100.0;
        let multiplier = input.multiplier.map(to_f64).unwrap_or(1.0);
        let monthly_costs = (to_f64(input.operating_costs) + to_f64(input.maintenance_costs)) / 12.0;

        let mut projection = Projection {
            revenue: Vec::with_capacity(months),
            costs: Vec::with_capacity(months),
            net: Vec::with_capacity(months),
        };

        for month in 0..months {
            let year = (month / 12) as i32;
            let growth_factor = (1.0 + growth).powi(year);
            let monthly_revenue = yearly_revenue * growth_factor * multiplier / 12.0;
            projection.revenue.push(monthly_revenue);
            projection.costs.push(monthly_costs);
            projection.net.push(monthly_revenue - monthly_costs);
        }

        projection
    }

    /// Months until the cumulative position first turns non-negative, linearly
    /// interpolated inside that month. `None` if it never does.
    fn payback_period(&self, initial_investment: f64, net: &[f64]) -> Option<f64> {
        let mut cumulative = -initial_investment;
        for (month, cash_flow) in net.iter().enumerate() {
            let previous = cumulative;
            cumulative += cash_flow;
            if previous < 0.0 && cumulative >= 0.0 {
                let fraction = safe_divide(-previous, *cash_flow, 0.0);
                return Some(month as f64 + fraction);
            }
        }
        None
    }
}

impl Calculator for StandardMetricsCalculator {
    type Input = StandardMetricsInput;
    type Output = StandardMetricsResult;

    fn id(&self) -> CalculatorId {
        CalculatorId::StandardMetrics
    }

    fn validate(&self, input: &StandardMetricsInput) -> Result<(), ValidationError> {
        assert_positive(input.initial_investment, "initial_investment")?;
        assert_range(input.discount_rate, Decimal::ZERO, Decimal::ONE_HUNDRED, "discount_rate")?;
        assert_count_range(input.project_duration, 1, MAX_PROJECT_DURATION_MONTHS, "project_duration")?;
        assert_positive(input.yearly_revenue, "yearly_revenue")?;
        assert_range(
            input.revenue_growth,
            Decimal::from(-100),
            Decimal::from(1000),
            "revenue_growth",
        )?;
        assert_positive(input.operating_costs, "operating_costs")?;
        assert_positive(input.maintenance_costs, "maintenance_costs")?;
        if let Some(multiplier) = input.multiplier {
            assert_positive(multiplier, "multiplier")?;
        }
        Ok(())
    }

    fn compute(&self, input: &StandardMetricsInput) -> StandardMetricsResult {
        let initial_investment = to_f64(input.initial_investment);
        let projection = self.project(input);

        let total_revenue: f64 = projection.revenue.iter().sum();
        let total_costs: f64 = projection.costs.iter().sum();
        let total_net: f64 = projection.net.iter().sum();

        // --- ROI and NPV ---
        let roi = safe_divide(total_net - initial_investment, initial_investment, 0.0) * 100.0;
        let monthly_discount_rate = to_f64(input.discount_rate) / 100.0 / 12.0;
        let npv = net_present_value(initial_investment, &projection.net, monthly_discount_rate);

        // --- Payback ---
        let payback = self.payback_period(initial_investment, &projection.net);
        let payback_period = payback.unwrap_or(input.project_duration as f64);

        // --- IRR ---
        let estimate = internal_rate_of_return(initial_investment, &projection.net);

        tracing::debug!(
            months = input.project_duration,
            roi,
            npv,
            irr_monthly = estimate.monthly_rate,
            irr_iterations = estimate.iterations,
            "standard metrics computed"
        );

        let mut cumulative = -initial_investment;
        let monthly_cash_flows = projection
            .net
            .iter()
            .enumerate()
            .map(|(index, net)| {
                cumulative += net;
                ProjectedMonth {
                    month: index as u32 + 1,
                    revenue: round(projection.revenue[index], CURRENCY_DP),
                    costs: round(projection.costs[index], CURRENCY_DP),
                    net_cash_flow: round(*net, CURRENCY_DP),
                    cumulative: round(cumulative, CURRENCY_DP),
                }
            })
            .collect();

        StandardMetricsResult {
            roi: round(roi, PERCENT_DP),
            npv: round(npv, CURRENCY_DP),
            irr: round(estimate.annual_rate_pct(), PERCENT_DP),
            irr_converged: estimate.converged,
            payback_period: round(payback_period, MONTHS_DP),
            payback_reached: payback.is_some(),
            total_revenue: round(total_revenue, CURRENCY_DP),
            total_costs: round(total_costs, CURRENCY_DP),
            total_net_cash_flow: round(total_net, CURRENCY_DP),
            monthly_cash_flows,
        }
    }
}
