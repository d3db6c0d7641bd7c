use crate::array::Array;
use crate::autograd::node::{Node, NodeId};
use crate::error::NeuraGradError;

/// Tagged differentiable operation with fixed-arity parent references.
///
/// Every non-leaf [`Node`] carries exactly one `Op`. The forward value is
/// computed by [`Op::forward`] when the op is recorded, and the local gradient
/// rule is dispatched by [`Op::backward`] during the reverse sweep.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// `A . B` for 2-D operands.
    MatMul { a: NodeId, b: NodeId },
    /// Transpose of a 2-D operand.
    Transpose { x: NodeId },
    /// `X + b` with the 1-D bias broadcast across the batch axis.
    AddBias { x: NodeId, bias: NodeId },
    /// `max(0, X)` element-wise.
    Relu { x: NodeId },
    /// Row-wise log-softmax over the last axis.
    LogSoftmax { x: NodeId },
    /// `-mean_i logp[i, targets[i]]`.
    NllLoss { logp: NodeId, targets: Vec<usize> },
    /// Fused `nll_loss(log_softmax(logits))`.
    CrossEntropy { logits: NodeId, targets: Vec<usize> },
    /// Sum of all elements, producing a scalar.
    Sum { x: NodeId },
}

impl Op {
    /// Short op name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Op::MatMul { .. } => "matmul",
            Op::Transpose { .. } => "transpose",
            Op::AddBias { .. } => "add_bias",
            Op::Relu { .. } => "relu",
            Op::LogSoftmax { .. } => "log_softmax",
            Op::NllLoss { .. } => "nll_loss",
            Op::CrossEntropy { .. } => "cross_entropy",
            Op::Sum { .. } => "sum",
        }
    }

    /// Parent nodes in argument order.
    pub fn parents(&self) -> Vec<NodeId> {
        match self {
            Op::MatMul { a, b } => vec![*a, *b],
            Op::AddBias { x, bias } => vec![*x, *bias],
            Op::Transpose { x } | Op::Relu { x } | Op::LogSoftmax { x } | Op::Sum { x } => {
                vec![*x]
            }
            Op::NllLoss { logp, .. } => vec![*logp],
            Op::CrossEntropy { logits, .. } => vec![*logits],
        }
    }

    /// Computes the forward value from the parents' values.
    ///
    /// Parent ids must already be validated against `nodes`.
    pub(crate) fn forward(&self, nodes: &[Node]) -> Result<Array, NeuraGradError> {
        let val = |id: &NodeId| value_of(nodes, *id);
        match self {
            Op::MatMul { a, b } => val(a).matmul(val(b)),
            Op::Transpose { x } => val(x).transpose(),
            Op::AddBias { x, bias } => val(x).add_bias(val(bias)),
            Op::Relu { x } => Ok(val(x).relu()),
            Op::LogSoftmax { x } => val(x).log_softmax_rows(),
            Op::NllLoss { logp, targets } => {
                let logp = val(logp);
                let (_, classes) = check_targets(logp, targets, "nll_loss")?;
                let picked: f64 = targets
                    .iter()
                    .enumerate()
                    .map(|(i, &t)| logp.data()[i * classes + t])
                    .sum();
                Ok(Array::scalar(-picked / targets.len() as f64))
            }
            Op::CrossEntropy { logits, targets } => {
                let logits = val(logits);
                check_targets(logits, targets, "cross_entropy")?;
                let logp = logits.log_softmax_rows()?;
                let classes = logp.shape()[1];
                let picked: f64 = targets
                    .iter()
                    .enumerate()
                    .map(|(i, &t)| logp.data()[i * classes + t])
                    .sum();
                Ok(Array::scalar(-picked / targets.len() as f64))
            }
            Op::Sum { x } => Ok(Array::scalar(val(x).sum_all())),
        }
    }

    /// Applies the local gradient rule.
    ///
    /// `output` is the value of the node carrying this op and `grad` the
    /// gradient flowing into it. Returns one `(parent, gradient)` pair per
    /// parent, in the order of [`Op::parents`].
    pub(crate) fn backward(
        &self,
        nodes: &[Node],
        output: &Array,
        grad: &Array,
    ) -> Result<Vec<(NodeId, Array)>, NeuraGradError> {
        let val = |id: &NodeId| value_of(nodes, *id);
        match self {
            Op::MatMul { a, b } => {
                // dA = g . B^T, dB = A^T . g
                let grad_a = grad.matmul(&val(b).transpose()?)?;
                let grad_b = val(a).transpose()?.matmul(grad)?;
                Ok(vec![(*a, grad_a), (*b, grad_b)])
            }
            Op::Transpose { x } => Ok(vec![(*x, grad.transpose()?)]),
            Op::AddBias { x, bias } => Ok(vec![(*x, grad.clone()), (*bias, grad.sum_cols()?)]),
            Op::Relu { x } => Ok(vec![(*x, grad.mul(&val(x).relu_mask())?)]),
            Op::LogSoftmax { x } => {
                // dX = g - softmax(X) * rowsum(g); softmax(X) = exp(output)
                let (_, cols) = output.dims2("log_softmax backward")?;
                let row_sums = grad.sum_rows()?;
                let mut dx = grad.clone();
                for ((dx_row, out_row), &s) in dx
                    .data_mut()
                    .chunks_exact_mut(cols)
                    .zip(output.data().chunks_exact(cols))
                    .zip(row_sums.data().iter())
                {
                    for (d, &y) in dx_row.iter_mut().zip(out_row.iter()) {
                        *d -= y.exp() * s;
                    }
                }
                Ok(vec![(*x, dx)])
            }
            Op::NllLoss { logp, targets } => {
                let upstream = grad.item()?;
                let logp_value = val(logp);
                let (_, classes) = logp_value.dims2("nll_loss backward")?;
                let scale = -upstream / targets.len() as f64;
                let mut dlogp = logp_value.zeros_like();
                for (i, &t) in targets.iter().enumerate() {
                    dlogp.data_mut()[i * classes + t] = scale;
                }
                Ok(vec![(*logp, dlogp)])
            }
            Op::CrossEntropy { logits, targets } => {
                // (softmax(X) - onehot) / batch, scaled by the upstream scalar
                let upstream = grad.item()?;
                let mut dx = val(logits).softmax_rows()?;
                let (_, classes) = dx.dims2("cross_entropy backward")?;
                for (i, &t) in targets.iter().enumerate() {
                    dx.data_mut()[i * classes + t] -= 1.0;
                }
                Ok(vec![(*logits, dx.scale(upstream / targets.len() as f64))])
            }
            Op::Sum { x } => {
                let upstream = grad.item()?;
                let mut dx = val(x).zeros_like();
                dx.fill_(upstream);
                Ok(vec![(*x, dx)])
            }
        }
    }
}

fn value_of(nodes: &[Node], id: NodeId) -> &Array {
    &nodes[id.0].value
}

/// Validates a `(batch, classes)` input against integer targets.
fn check_targets(
    input: &Array,
    targets: &[usize],
    operation: &str,
) -> Result<(usize, usize), NeuraGradError> {
    let (batch, classes) = input.dims2(operation)?;
    if targets.len() != batch {
        return Err(NeuraGradError::shape_mismatch(
            &[batch],
            &[targets.len()],
            operation,
        ));
    }
    if let Some(index) = targets.iter().position(|&t| t >= classes) {
        return Err(NeuraGradError::TargetOutOfRange {
            index,
            target: targets[index],
            classes,
        });
    }
    Ok((batch, classes))
}

#[cfg(test)]
#[path = "backward_op_test.rs"]
mod tests;
