use crate::error::NeuraGradError;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers are responsible for updating model parameters based on their gradients.
pub trait Optimizer {
    /// Performs a single optimization step.
    ///
    /// Applies the update rule to every managed parameter using its
    /// accumulated gradient.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the step was successful, or a `NeuraGradError` otherwise
    /// (`MissingGradient` when called before any backward pass).
    fn step(&mut self) -> Result<(), NeuraGradError>;

    /// Resets the gradients of all managed parameters to zero.
    ///
    /// Must be called between steps; otherwise gradients from different
    /// batches accumulate into each other.
    fn zero_grad(&mut self) -> Result<(), NeuraGradError>;

    /// Current learning rate.
    fn learning_rate(&self) -> f64;
}
