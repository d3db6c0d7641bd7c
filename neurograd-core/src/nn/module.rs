use crate::autograd::{Graph, NodeId};
use crate::error::NeuraGradError;
use crate::nn::parameter::ParamRef;
use std::fmt::Debug;

/// The base trait for all neural network modules (layers, containers, etc.).
///
/// Modules own their parameters; a forward pass records operations on the
/// caller's [`Graph`], so the same module serves training (gradients enabled)
/// and inference (gradients disabled) without any global switch.
pub trait Module: Debug + Send + Sync {
    /// Performs a forward pass of the module.
    ///
    /// # Arguments
    /// * `graph`: The graph to record operations on.
    /// * `input`: Node holding the module's input, shape `(batch, features)`.
    ///
    /// # Returns
    /// The node holding the module's output, or a `NeuraGradError` if the
    /// input shape does not fit the module.
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, NeuraGradError>;

    /// Returns all learnable parameters of the module, including those of
    /// sub-modules, in a stable order.
    fn parameters(&self) -> Vec<ParamRef>;

    /// Returns all learnable parameters along with hierarchical names
    /// (e.g. "0.weight", "0.bias").
    fn named_parameters(&self) -> Vec<(String, ParamRef)>;

    /// Returns the direct child modules.
    /// For modules that do not contain other modules, this is empty.
    fn children(&self) -> Vec<&dyn Module> {
        Vec::new()
    }

    /// Returns the direct child modules along with their names.
    fn named_children(&self) -> Vec<(String, &dyn Module)> {
        Vec::new()
    }
}
