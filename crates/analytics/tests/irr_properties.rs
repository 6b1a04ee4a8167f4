use analytics::irr::IRR_MAX_ITERATIONS;
use analytics::{
    internal_rate_of_return, net_present_value, StandardMetricsCalculator, StandardMetricsInput,
};
use core_types::Calculator;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Monthly flows that repay the outlay within the horizon: one sign change.
fn repaying_series() -> impl Strategy<Value = (f64, Vec<f64>)> {
    (1_000.0f64..1_000_000.0, 6usize..240, 1.05f64..5.0, -0.02f64..0.02).prop_map(
        |(initial, months, coverage, drift)| {
            let level = initial * coverage / months as f64;
            let flows = (0..months)
                .map(|m| level * (1.0 + drift).powi((m / 12) as i32))
                .collect();
            (initial, flows)
        },
    )
}

proptest! {
    #[test]
    fn npv_at_irr_is_zero((initial, flows) in repaying_series()) {
        prop_assume!(flows.iter().sum::<f64>() > initial);

        let estimate = internal_rate_of_return(initial, &flows);
        prop_assert!(estimate.converged);
        let npv = net_present_value(initial, &flows, estimate.monthly_rate);
        prop_assert!(npv.abs() < 1e-2, "NPV at IRR was {}", npv);
    }

    #[test]
    fn solver_always_terminates_with_finite_rate(
        initial in 1.0f64..1e7,
        flows in proptest::collection::vec(-1e5f64..1e5, 0..120),
    ) {
        let estimate = internal_rate_of_return(initial, &flows);
        prop_assert!(estimate.monthly_rate.is_finite());
        prop_assert!(estimate.iterations <= IRR_MAX_ITERATIONS);
    }

    #[test]
    fn zero_discount_npv_equals_roi_numerator(
        investment in 1_000u32..500_000,
        revenue in 10_000u32..1_000_000,
        growth in -50i32..50,
        operating in 1_000u32..400_000,
        maintenance in 100u32..50_000,
        months in 1u32..120,
    ) {
        let input = StandardMetricsInput {
            initial_investment: Decimal::from(investment),
            discount_rate: Decimal::ZERO,
            project_duration: months,
            yearly_revenue: Decimal::from(revenue),
            revenue_growth: Decimal::from(growth),
            operating_costs: Decimal::from(operating),
            maintenance_costs: Decimal::from(maintenance),
            multiplier: None,
        };
        let result = StandardMetricsCalculator::new().calculate(&input).unwrap();
        let numerator = result.total_net_cash_flow - input.initial_investment;
        prop_assert!((result.npv - numerator).abs() <= Decimal::new(1, 2));
        prop_assert_eq!(result.monthly_cash_flows.len(), months as usize);
    }
}
