// src/nn/losses/mod.rs

pub mod cross_entropy;
pub mod nll;

pub use cross_entropy::CrossEntropyLoss;
pub use nll::NLLLoss;

use crate::autograd::{Graph, NodeId};
use crate::error::NeuraGradError;
use std::fmt::Debug;

/// A criterion mapping model output and integer class targets to a scalar loss node.
pub trait Loss: Debug + Send + Sync {
    /// Records the loss on `graph` and returns its rank-0 node.
    ///
    /// # Errors
    /// * `ShapeMismatch` if `targets.len()` differs from the batch size.
    /// * `TargetOutOfRange` if a target is not a valid class index.
    fn forward(
        &self,
        graph: &mut Graph,
        input: NodeId,
        targets: &[usize],
    ) -> Result<NodeId, NeuraGradError>;
}
