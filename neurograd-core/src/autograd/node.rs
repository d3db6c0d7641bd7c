use crate::array::Array;
use crate::autograd::backward_op::Op;
use crate::nn::parameter::ParamRef;
use std::fmt;
use std::sync::Arc;

/// Index of a node inside its [`Graph`](super::Graph) arena.
///
/// Ids are handed out in strictly increasing order, so every parent id is
/// smaller than the id of the node derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A vertex of the computation graph.
///
/// Holds the forward value, a lazily materialised gradient of the same shape,
/// and the tagged op that produced it (`None` for leaves).
#[derive(Debug)]
pub struct Node {
    /// Forward value. Shared with the owning `Parameter` for parameter leaves,
    /// so recording a parameter does not copy its buffer.
    pub(crate) value: Arc<Array>,
    /// Accumulated gradient; `None` until the first write.
    pub(crate) grad: Option<Array>,
    /// Backward rule and parent links. Leaves have none.
    pub(crate) op: Option<Op>,
    pub(crate) requires_grad: bool,
    /// Set when this leaf stands for a trainable `Parameter`; its gradient is
    /// forwarded there at the end of `backward`.
    pub(crate) param: Option<ParamRef>,
}

impl Node {
    pub(crate) fn leaf(value: Arc<Array>, requires_grad: bool, param: Option<ParamRef>) -> Self {
        Node {
            value,
            grad: None,
            op: None,
            requires_grad,
            param,
        }
    }

    pub fn value(&self) -> &Array {
        &self.value
    }

    pub fn grad(&self) -> Option<&Array> {
        self.grad.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.op.is_none()
    }

    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// Adds `incoming` into the gradient buffer, zero-initialising it first if needed.
    pub(crate) fn accumulate_grad(&mut self, incoming: &Array) -> Result<(), crate::NeuraGradError> {
        match self.grad.as_mut() {
            Some(existing) => existing.add_(incoming),
            None => {
                self.value.ensure_same_shape(incoming, "accumulate_grad")?;
                self.grad = Some(incoming.clone());
                Ok(())
            }
        }
    }
}
