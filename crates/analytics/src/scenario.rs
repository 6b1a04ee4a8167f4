use crate::engine::StandardMetricsCalculator;
use crate::report::{StandardMetricsInput, StandardMetricsResult};
use core_types::numeric::assert_positive;
use core_types::{Calculator, ValidationError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BEST_CASE_MULTIPLIER: Decimal = dec!(1.2);
pub const DEFAULT_WORST_CASE_MULTIPLIER: Decimal = dec!(0.8);

/// Revenue multipliers for the optimistic and pessimistic variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMultipliers {
    pub best_case: Decimal,
    pub worst_case: Decimal,
}

impl Default for ScenarioMultipliers {
    fn default() -> Self {
        Self {
            best_case: DEFAULT_BEST_CASE_MULTIPLIER,
            worst_case: DEFAULT_WORST_CASE_MULTIPLIER,
        }
    }
}

/// The same project evaluated under three revenue assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAnalysis {
    pub worst: StandardMetricsResult,
    pub base: StandardMetricsResult,
    pub best: StandardMetricsResult,
}

impl ScenarioAnalysis {
    /// Runs the standard metrics three times, overriding only `multiplier`.
    ///
    /// The base case keeps the input's own multiplier (1.0 when absent); the
    /// best and worst cases replace it.
    pub fn run(
        input: &StandardMetricsInput,
        multipliers: ScenarioMultipliers,
    ) -> Result<Self, ValidationError> {
        assert_positive(multipliers.best_case, "best_case")?;
        assert_positive(multipliers.worst_case, "worst_case")?;
        if multipliers.worst_case > multipliers.best_case {
            return Err(ValidationError::invalid_input(
                "worst_case",
                format!(
                    "must not exceed best_case ({} > {})",
                    multipliers.worst_case, multipliers.best_case
                ),
            ));
        }

        let calculator = StandardMetricsCalculator::new();
        let base = calculator.calculate(input)?;

        let with_multiplier = |multiplier: Decimal| StandardMetricsInput {
            multiplier: Some(multiplier),
            ..input.clone()
        };
        let worst = calculator.calculate(&with_multiplier(multipliers.worst_case))?;
        let best = calculator.calculate(&with_multiplier(multipliers.best_case))?;

        Ok(Self { worst, base, best })
    }
}
