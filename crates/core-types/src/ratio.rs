//! Shared shape of the ratio calculators (employee ROI, marketing ROI, SaaS
//! metrics, cohort metrics): a primary ratio classified against fixed bands,
//! plus an optional payback-style time metric.

use crate::numeric::{round, safe_divide, to_f64};
use rust_decimal::Decimal;

/// Descending thresholds mapped to labels.
///
/// A value is given the label of the first threshold it meets or exceeds,
/// or `otherwise` when it meets none of them.
#[derive(Debug, Clone, Copy)]
pub struct Bands<L: Copy + 'static> {
    thresholds: &'static [(f64, L)],
    otherwise: L,
}

impl<L: Copy + 'static> Bands<L> {
    pub const fn new(thresholds: &'static [(f64, L)], otherwise: L) -> Self {
        Self { thresholds, otherwise }
    }

    pub fn classify(&self, value: f64) -> L {
        self.thresholds
            .iter()
            .find(|(threshold, _)| value >= *threshold)
            .map(|(_, label)| *label)
            .unwrap_or(self.otherwise)
    }

    /// Rounds `value` to `decimals` places and labels the rounded figure, so
    /// the label always agrees with the number reported beside it.
    pub fn round_and_classify(&self, value: f64, decimals: u32) -> (Decimal, L) {
        let rounded = round(value, decimals);
        (rounded, self.classify(to_f64(rounded)))
    }
}

/// Months needed for `monthly_benefit` to cover `cost`.
///
/// `None` when the benefit is not positive, i.e. the cost is never recovered.
pub fn payback_months(cost: f64, monthly_benefit: f64) -> Option<f64> {
    if monthly_benefit <= 0.0 {
        return None;
    }
    Some(safe_divide(cost, monthly_benefit, 0.0))
}
