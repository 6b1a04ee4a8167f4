//! Net present value and a bounded Newton-Raphson internal-rate-of-return solver
//! over monthly cash flows.
//!
//! Cash flow `t` (1-based) is discounted by `(1 + r)^t`; the initial investment
//! sits at `t = 0` and is never discounted.

/// Monthly seed rate (10% a year).
pub const IRR_INITIAL_GUESS: f64 = 0.10 / 12.0;
/// Absolute NPV below which the rate counts as a root.
pub const IRR_TOLERANCE: f64 = 1e-4;
pub const IRR_MAX_ITERATIONS: u32 = 100;
/// A flatter NPV curve than this stops the search instead of dividing by it.
pub const IRR_MIN_DERIVATIVE: f64 = 1e-10;
/// Monthly rates outside this interval are treated as divergence.
pub const IRR_RATE_BOUNDS: (f64, f64) = (-0.99, 10.0);

/// Outcome of the root search. Always usable, even when `converged` is false.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrEstimate {
    pub monthly_rate: f64,
    pub iterations: u32,
    pub converged: bool,
}

impl IrrEstimate {
    /// The monthly rate compounded over twelve months, in percent.
    pub fn annual_rate_pct(&self) -> f64 {
        ((1.0 + self.monthly_rate).powi(12) - 1.0) * 100.0
    }
}

/// NPV of `cash_flows` at `monthly_rate`, starting from `-initial_investment`.
pub fn net_present_value(initial_investment: f64, cash_flows: &[f64], monthly_rate: f64) -> f64 {
    npv_with_derivative(initial_investment, cash_flows, monthly_rate).0
}

fn npv_with_derivative(initial_investment: f64, cash_flows: &[f64], rate: f64) -> (f64, f64) {
    let base = 1.0 + rate;
    let mut npv = -initial_investment;
    let mut derivative = 0.0;
    let mut discount = 1.0;

    for (index, cash_flow) in cash_flows.iter().enumerate() {
        let period = (index + 1) as f64;
        discount *= base;
        npv += cash_flow / discount;
        derivative -= period * cash_flow / (discount * base);
    }

    (npv, derivative)
}

/// Searches for the monthly rate at which the NPV of the series is zero.
///
/// The loop exits on the first of:
/// - `|NPV| < IRR_TOLERANCE` (converged),
/// - `|dNPV/dr| < IRR_MIN_DERIVATIVE` (current estimate kept),
/// - the rate leaving `IRR_RATE_BOUNDS` (reset to the seed),
/// - `IRR_MAX_ITERATIONS` updates (last estimate kept).
///
/// Series with several sign changes can have more than one root, or none;
/// the estimate is then only an approximation.
pub fn internal_rate_of_return(initial_investment: f64, cash_flows: &[f64]) -> IrrEstimate {
    let (lower, upper) = IRR_RATE_BOUNDS;
    let mut rate = IRR_INITIAL_GUESS;

    for iteration in 0..IRR_MAX_ITERATIONS {
        let (npv, derivative) = npv_with_derivative(initial_investment, cash_flows, rate);

        if npv.abs() < IRR_TOLERANCE {
            return IrrEstimate { monthly_rate: rate, iterations: iteration, converged: true };
        }

        if derivative.abs() < IRR_MIN_DERIVATIVE {
            tracing::debug!(rate, npv, "IRR search stopped on a flat NPV curve");
            return IrrEstimate { monthly_rate: rate, iterations: iteration, converged: false };
        }

        rate -= npv / derivative;

        // A NaN rate fails `contains` as well.
        if !(lower..=upper).contains(&rate) {
            tracing::warn!(rate, "IRR search diverged, falling back to the seed rate");
            return IrrEstimate {
                monthly_rate: IRR_INITIAL_GUESS,
                iterations: iteration + 1,
                converged: false,
            };
        }
    }

    let converged = net_present_value(initial_investment, cash_flows, rate).abs() < IRR_TOLERANCE;
    if !converged {
        tracing::warn!(rate, "IRR search hit the iteration cap");
    }
    IrrEstimate { monthly_rate: rate, iterations: IRR_MAX_ITERATIONS, converged }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npv_at_zero_rate_is_undiscounted_sum() {
        let flows = [300.0, 400.0, 500.0];
        assert!((net_present_value(1000.0, &flows, 0.0) - 200.0).abs() < 1e-12);
    }

    #[test]
    fn finds_known_single_period_rate() {
        // 1000 out, 1100 back after one month: exactly 10% a month.
        let estimate = internal_rate_of_return(1000.0, &[1100.0]);
        assert!(estimate.converged);
        assert!((estimate.monthly_rate - 0.10).abs() < 1e-6);
        assert!(estimate.iterations <= IRR_MAX_ITERATIONS);
    }

    #[test]
    fn level_annuity_matches_npv_root() {
        let flows = vec![250.0; 48];
        let estimate = internal_rate_of_return(8000.0, &flows);
        assert!(estimate.converged);
        let npv = net_present_value(8000.0, &flows, estimate.monthly_rate);
        assert!(npv.abs() < 1e-2, "NPV at IRR was {npv}");
    }

    #[test]
    fn annualization_compounds_monthly() {
        let estimate = IrrEstimate { monthly_rate: 0.01, iterations: 0, converged: true };
        let expected = (1.01f64.powi(12) - 1.0) * 100.0;
        assert!((estimate.annual_rate_pct() - expected).abs() < 1e-12);
    }

    #[test]
    fn flat_series_stops_without_dividing_by_zero() {
        let estimate = internal_rate_of_return(1000.0, &[]);
        assert!(!estimate.converged);
        assert_eq!(estimate.monthly_rate, IRR_INITIAL_GUESS);
        assert_eq!(estimate.iterations, 0);
    }

    #[test]
    fn divergence_resets_to_seed() {
        // Inflows that never repay the outlay push the rate below -99%.
        let estimate = internal_rate_of_return(1_000_000.0, &[1.0, 1.0, 1.0]);
        assert!(!estimate.converged);
        assert!(estimate.monthly_rate.is_finite());
        assert!(estimate.iterations <= IRR_MAX_ITERATIONS);
    }
}
