use crate::autograd::{Graph, NodeId};
use crate::error::NeuraGradError;
use crate::nn::module::Module;
use crate::nn::parameter::ParamRef;

/// Layer that applies the Rectified Linear Unit (ReLU) activation function.
///
/// This layer does not have any learnable parameters.
#[derive(Debug, Default, Clone)]
pub struct ReLU {}

impl ReLU {
    /// Creates a new ReLU layer.
    pub fn new() -> Self {
        ReLU {}
    }
}

impl Module for ReLU {
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, NeuraGradError> {
        graph.relu(input)
    }

    fn parameters(&self) -> Vec<ParamRef> {
        Vec::new() // ReLU has no parameters
    }

    fn named_parameters(&self) -> Vec<(String, ParamRef)> {
        Vec::new()
    }
}
