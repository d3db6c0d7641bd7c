use crate::autograd::{Graph, NodeId};
use crate::error::NeuraGradError;
use crate::nn::losses::Loss;

/// Negative log-likelihood over log-probabilities, averaged over the batch.
///
/// `loss = -(1/N) * sum_i input[i, targets[i]]`. The input is expected to come
/// from a `LogSoftmax` layer.
#[derive(Debug, Default, Clone)]
pub struct NLLLoss {}

impl NLLLoss {
    pub fn new() -> Self {
        NLLLoss {}
    }
}

impl Loss for NLLLoss {
    fn forward(
        &self,
        graph: &mut Graph,
        input: NodeId,
        targets: &[usize],
    ) -> Result<NodeId, NeuraGradError> {
        graph.nll_loss(input, targets)
    }
}
