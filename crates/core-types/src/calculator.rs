use crate::enums::CalculatorId;
use crate::error::ValidationError;

/// The contract every concrete calculator implements.
///
/// Implementations are stateless: `compute` reads only its input, so one
/// instance can serve any number of unrelated calls, from any thread.
/// The `Send + Sync` bounds let callers share a single instance freely.
pub trait Calculator: Send + Sync {
    type Input;
    type Output;

    fn id(&self) -> CalculatorId;

    /// Checks every field in declaration order and fails on the first violation.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Pure arithmetic over an already validated input.
    ///
    /// Every numeric field of the output has been rounded through
    /// [`crate::numeric::round`].
    fn compute(&self, input: &Self::Input) -> Self::Output;

    /// The single entry point: validate, then compute.
    ///
    /// # Returns
    ///
    /// * `Ok(Output)` - a fresh result value holding no reference to `input`.
    /// * `Err(ValidationError)` - the first input field that failed validation.
    fn calculate(&self, input: &Self::Input) -> Result<Self::Output, ValidationError> {
        if let Err(e) = self.validate(input) {
            tracing::debug!(calculator = %self.id(), error = %e, "input rejected");
            return Err(e);
        }
        let output = self.compute(input);
        tracing::debug!(calculator = %self.id(), "calculation complete");
        Ok(output)
    }
}
