use crate::autograd::{Graph, NodeId};
use crate::error::NeuraGradError;
use crate::nn::losses::Loss;

/// Fused log-softmax and negative log-likelihood over raw logits.
///
/// Numerically equivalent to `LogSoftmax` followed by `NLLLoss`, with a single
/// backward rule `(softmax(x) - onehot(targets)) / N`. Use it with a model
/// whose last layer emits logits rather than log-probabilities.
#[derive(Debug, Default, Clone)]
pub struct CrossEntropyLoss {}

impl CrossEntropyLoss {
    pub fn new() -> Self {
        CrossEntropyLoss {}
    }
}

impl Loss for CrossEntropyLoss {
    fn forward(
        &self,
        graph: &mut Graph,
        input: NodeId,
        targets: &[usize],
    ) -> Result<NodeId, NeuraGradError> {
        graph.cross_entropy(input, targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::nn::losses::NLLLoss;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_uniform_logits_give_log_classes() -> Result<(), NeuraGradError> {
        let mut graph = Graph::new();
        let logits = graph.leaf(Array::zeros(&[2, 5])?);
        let loss = CrossEntropyLoss::new().forward(&mut graph, logits, &[3, 1])?;
        assert_abs_diff_eq!(graph.value(loss)?.item()?, (5.0f64).ln(), epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_matches_log_softmax_nll() -> Result<(), NeuraGradError> {
        let data = Array::new(vec![2.0, -1.0, 0.5, 0.0, 3.0, 1.0], vec![2, 3])?;
        let mut graph = Graph::no_grad();
        let x = graph.constant(data);
        let fused = CrossEntropyLoss::new().forward(&mut graph, x, &[0, 2])?;
        let logp = graph.log_softmax(x)?;
        let unfused = NLLLoss::new().forward(&mut graph, logp, &[0, 2])?;
        assert_abs_diff_eq!(
            graph.value(fused)?.item()?,
            graph.value(unfused)?.item()?,
            epsilon = 1e-12
        );
        Ok(())
    }
}
