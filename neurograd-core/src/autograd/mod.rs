// src/autograd/mod.rs
// Moteur de différentiation automatique en mode inverse.

pub mod backward_op;
pub mod grad_check;
pub mod graph;
pub mod mode;
pub mod node;

pub use backward_op::Op;
pub use graph::Graph;
pub use mode::GradMode;
pub use node::{Node, NodeId};

use crate::error::NeuraGradError;
use crate::nn::parameter::{write_param, ParamRef};

/// Resets the gradient of every parameter to exactly zero.
///
/// Parameters keep their accumulated gradient across graphs, so this must run
/// between optimisation steps. Idempotent.
pub fn zero_grad(params: &[ParamRef]) -> Result<(), NeuraGradError> {
    for param in params {
        write_param(param)?.zero_grad();
    }
    Ok(())
}
