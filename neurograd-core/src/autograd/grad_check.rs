use crate::array::Array;
use crate::autograd::graph::Graph;
use crate::autograd::node::NodeId;
use crate::error::NeuraGradError;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical_grad} != numerical {numerical_grad} (difference {difference})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(NeuraGradError),

    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(NeuraGradError),

    #[error("Input {input_index} has no gradient after backward pass.")]
    MissingAnalyticalGrad { input_index: usize },

    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index} (loss+ {loss_plus}, loss- {loss_minus})")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}: {value}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },

    #[error("Array error during intermediate calculation: {0}")]
    ArrayError(NeuraGradError),
}

impl From<NeuraGradError> for GradCheckError {
    fn from(err: NeuraGradError) -> Self {
        GradCheckError::ArrayError(err)
    }
}

/// Checks analytical gradients against central finite differences.
///
/// `func` records a computation on a fresh graph from one leaf per input.
/// The scalar probed numerically is `sum(output * output_grad)`, whose
/// gradient is exactly what `backward_with_grad(output, output_grad)` computes.
///
/// An element passes when either the absolute difference or the difference
/// relative to the analytical value is within `tolerance`.
pub fn check_grad<F>(
    func: F,
    inputs: &[Array],
    output_grad: &Array,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, NeuraGradError>,
{
    // --- Analytical pass ---
    let mut graph = Graph::new();
    let leaves: Vec<NodeId> = inputs.iter().map(|a| graph.leaf(a.clone())).collect();
    let output = func(&mut graph, &leaves).map_err(GradCheckError::ForwardPassError)?;
    graph
        .backward_with_grad(output, output_grad.clone())
        .map_err(GradCheckError::BackwardPassError)?;

    let mut analytical = Vec::with_capacity(inputs.len());
    for (i, &leaf) in leaves.iter().enumerate() {
        match graph.grad(leaf)? {
            Some(g) => analytical.push(g.clone()),
            None => return Err(GradCheckError::MissingAnalyticalGrad { input_index: i }),
        }
    }

    // --- Numerical pass ---
    for (i, input) in inputs.iter().enumerate() {
        for elem_idx in 0..input.numel() {
            let loss_plus = perturbed_loss(&func, inputs, i, elem_idx, epsilon, output_grad)?;
            let loss_minus = perturbed_loss(&func, inputs, i, elem_idx, -epsilon, output_grad)?;
            let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
            let analytical_grad = analytical[i].data()[elem_idx];

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    value: analytical_grad,
                });
            }

            let difference = (analytical_grad - numerical_grad).abs();
            if difference > tolerance && difference / (analytical_grad.abs() + epsilon) > tolerance {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad,
                    difference,
                });
            }
        }
    }
    Ok(())
}

/// Evaluates `sum(func(inputs') * output_grad)` with one element nudged by `delta`.
fn perturbed_loss<F>(
    func: &F,
    inputs: &[Array],
    input_index: usize,
    elem_idx: usize,
    delta: f64,
    output_grad: &Array,
) -> Result<f64, GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, NeuraGradError>,
{
    let mut graph = Graph::no_grad();
    let leaves: Vec<NodeId> = inputs
        .iter()
        .enumerate()
        .map(|(j, a)| {
            let mut a = a.clone();
            if j == input_index {
                a.data_mut()[elem_idx] += delta;
            }
            graph.leaf(a)
        })
        .collect();
    let output = func(&mut graph, &leaves).map_err(GradCheckError::ForwardPassError)?;
    Ok(graph.value(output)?.mul(output_grad)?.sum_all())
}
