use crate::autograd::{Graph, NodeId};
use crate::error::NeuraGradError;
use crate::nn::module::Module;
use crate::nn::parameter::ParamRef;

/// Applies `log(softmax(x))` along the last axis of a `(batch, classes)` input.
///
/// Computed as `x - max - log(sum(exp(x - max)))` per row, so large logits do
/// not overflow. Only the last axis is supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSoftmax {
    /// Informational: both accepted values name the last axis, which is what
    /// `forward` always normalises.
    dim: isize,
}

impl LogSoftmax {
    /// Creates a layer normalising over the last axis.
    pub fn new() -> Self {
        LogSoftmax { dim: -1 }
    }

    /// Creates a layer for an explicit axis. For 2-D inputs only `-1` and `1`
    /// (both the last axis) are accepted.
    pub fn with_dim(dim: isize) -> Result<Self, NeuraGradError> {
        if dim != -1 && dim != 1 {
            return Err(NeuraGradError::InvalidConfiguration(format!(
                "LogSoftmax only supports the last axis of a 2-D input, got dim={}",
                dim
            )));
        }
        Ok(LogSoftmax { dim })
    }

    pub fn dim(&self) -> isize {
        self.dim
    }
}

impl Default for LogSoftmax {
    fn default() -> Self {
        LogSoftmax::new()
    }
}

impl Module for LogSoftmax {
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, NeuraGradError> {
        graph.log_softmax(input)
    }

    fn parameters(&self) -> Vec<ParamRef> {
        Vec::new()
    }

    fn named_parameters(&self) -> Vec<(String, ParamRef)> {
        Vec::new()
    }
}
