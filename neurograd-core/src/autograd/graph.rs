use crate::array::Array;
use crate::autograd::backward_op::Op;
use crate::autograd::mode::GradMode;
use crate::autograd::node::{Node, NodeId};
use crate::error::NeuraGradError;
use crate::nn::parameter::{read_param, write_param, ParamRef};
use std::sync::Arc;

/// Arena-backed computation graph for a single forward/backward pass.
///
/// Nodes are appended in creation order and addressed by [`NodeId`]; a node
/// can only reference nodes created before it, so the graph is a DAG by
/// construction. The whole arena is dropped at once when the graph goes out
/// of scope at the end of a training step. Parameters outlive the graph: their
/// leaves share the parameter's value buffer and forward gradients back to it.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    mode: GradMode,
}

impl Graph {
    /// Creates an empty graph that records operations.
    pub fn new() -> Self {
        Graph::with_mode(GradMode::Enabled)
    }

    /// Creates an empty graph that computes values only.
    pub fn no_grad() -> Self {
        Graph::with_mode(GradMode::Disabled)
    }

    pub fn with_mode(mode: GradMode) -> Self {
        Graph {
            nodes: Vec::new(),
            mode,
        }
    }

    pub fn mode(&self) -> GradMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // --- Leaves ---

    /// Records external data that never receives a gradient.
    pub fn constant(&mut self, value: Array) -> NodeId {
        self.push(Node::leaf(Arc::new(value), false, None))
    }

    /// Records a leaf that accumulates a gradient (when gradients are enabled).
    pub fn leaf(&mut self, value: Array) -> NodeId {
        let requires_grad = self.mode.is_enabled();
        self.push(Node::leaf(Arc::new(value), requires_grad, None))
    }

    /// Records a trainable parameter.
    ///
    /// The leaf shares the parameter's buffer; after `backward` its gradient is
    /// added into the parameter's own accumulator. With gradients disabled the
    /// leaf is detached from the parameter.
    pub fn parameter(&mut self, param: &ParamRef) -> Result<NodeId, NeuraGradError> {
        let value = read_param(param)?.value_arc();
        let node = if self.mode.is_enabled() {
            Node::leaf(value, true, Some(Arc::clone(param)))
        } else {
            Node::leaf(value, false, None)
        };
        Ok(self.push(node))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    // --- Accessors ---

    pub fn node(&self, id: NodeId) -> Result<&Node, NeuraGradError> {
        self.nodes.get(id.0).ok_or(NeuraGradError::UnknownNode {
            id: id.0,
            len: self.nodes.len(),
        })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, NeuraGradError> {
        let len = self.nodes.len();
        self.nodes
            .get_mut(id.0)
            .ok_or(NeuraGradError::UnknownNode { id: id.0, len })
    }

    pub fn value(&self, id: NodeId) -> Result<&Array, NeuraGradError> {
        Ok(self.node(id)?.value())
    }

    /// Gradient accumulated into `id` so far, if any was ever written.
    pub fn grad(&self, id: NodeId) -> Result<Option<&Array>, NeuraGradError> {
        Ok(self.node(id)?.grad())
    }

    /// Like [`Graph::grad`] but treats a never-allocated gradient as an error.
    pub fn require_grad(&self, id: NodeId) -> Result<&Array, NeuraGradError> {
        self.node(id)?
            .grad()
            .ok_or(NeuraGradError::GradientNotAllocated { id: id.0 })
    }

    pub fn requires_grad(&self, id: NodeId) -> Result<bool, NeuraGradError> {
        Ok(self.node(id)?.requires_grad())
    }

    // --- Recording ---

    /// Records `op`, computing its forward value eagerly.
    ///
    /// Shape and domain violations surface here, at the operation boundary.
    /// With gradients disabled the result is stored as a detached leaf.
    pub fn apply(&mut self, op: Op) -> Result<NodeId, NeuraGradError> {
        let parents = op.parents();
        for &p in &parents {
            self.node(p)?;
        }
        let value = op.forward(&self.nodes)?;

        if !self.mode.is_enabled() {
            return Ok(self.push(Node::leaf(Arc::new(value), false, None)));
        }

        let requires_grad = parents.iter().any(|p| self.nodes[p.0].requires_grad);
        log::trace!(
            "record {} {:?} <- {:?} (requires_grad={})",
            op.name(),
            value.shape(),
            parents,
            requires_grad
        );
        let mut node = Node::leaf(Arc::new(value), requires_grad, None);
        node.op = Some(op);
        Ok(self.push(node))
    }

    pub fn matmul(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, NeuraGradError> {
        self.apply(Op::MatMul { a, b })
    }

    pub fn transpose(&mut self, x: NodeId) -> Result<NodeId, NeuraGradError> {
        self.apply(Op::Transpose { x })
    }

    pub fn add_bias(&mut self, x: NodeId, bias: NodeId) -> Result<NodeId, NeuraGradError> {
        self.apply(Op::AddBias { x, bias })
    }

    pub fn relu(&mut self, x: NodeId) -> Result<NodeId, NeuraGradError> {
        self.apply(Op::Relu { x })
    }

    pub fn log_softmax(&mut self, x: NodeId) -> Result<NodeId, NeuraGradError> {
        self.apply(Op::LogSoftmax { x })
    }

    pub fn nll_loss(&mut self, logp: NodeId, targets: &[usize]) -> Result<NodeId, NeuraGradError> {
        self.apply(Op::NllLoss {
            logp,
            targets: targets.to_vec(),
        })
    }

    pub fn cross_entropy(
        &mut self,
        logits: NodeId,
        targets: &[usize],
    ) -> Result<NodeId, NeuraGradError> {
        self.apply(Op::CrossEntropy {
            logits,
            targets: targets.to_vec(),
        })
    }

    pub fn sum(&mut self, x: NodeId) -> Result<NodeId, NeuraGradError> {
        self.apply(Op::Sum { x })
    }

    // --- Backward ---

    /// Backpropagates from a scalar `root`, seeding its gradient with 1.
    ///
    /// # Errors
    /// * `BackwardNonScalar` if `root` holds more than one element.
    /// * `GradientsDisabled` if the graph was built without gradient tracking.
    pub fn backward(&mut self, root: NodeId) -> Result<(), NeuraGradError> {
        let root_value = self.value(root)?;
        if !root_value.is_scalar() {
            return Err(NeuraGradError::BackwardNonScalar {
                shape: root_value.shape().to_vec(),
            });
        }
        let mut seed = root_value.zeros_like();
        seed.fill_(1.0);
        self.backward_with_grad(root, seed)
    }

    /// Backpropagates from `root` with an explicit upstream gradient.
    ///
    /// Gradients are added into every reachable node's buffer, never
    /// overwritten: two calls without [`Graph::zero_grad`] in between leave
    /// twice the single-call gradient behind.
    pub fn backward_with_grad(&mut self, root: NodeId, seed: Array) -> Result<(), NeuraGradError> {
        if !self.mode.is_enabled() {
            return Err(NeuraGradError::GradientsDisabled);
        }
        let root_node = self.node(root)?;
        if seed.shape() != root_node.value().shape() {
            return Err(NeuraGradError::SeedShapeMismatch {
                expected: root_node.value().shape().to_vec(),
                actual: seed.shape().to_vec(),
            });
        }
        if !root_node.requires_grad() {
            log::debug!("backward from {} which does not require grad; nothing to do", root);
            return Ok(());
        }

        let order = self.topological_order(root)?;
        log::trace!("backward from {} over {} nodes", root, order.len());

        // Per-call buffers so repeated calls accumulate cleanly into node.grad.
        let mut pending: Vec<Option<Array>> = vec![None; root.0 + 1];
        pending[root.0] = Some(seed);

        for &id in order.iter().rev() {
            let Some(incoming) = pending[id.0].take() else {
                continue;
            };
            let node = &self.nodes[id.0];
            let contributions = match node.op.as_ref() {
                Some(op) => {
                    log::trace!("visit {} ({})", id, op.name());
                    op.backward(&self.nodes, &node.value, &incoming)?
                }
                None => Vec::new(),
            };

            for (parent, grad) in contributions {
                if !self.nodes[parent.0].requires_grad {
                    continue;
                }
                match pending[parent.0].as_mut() {
                    Some(existing) => existing.add_(&grad)?,
                    None => pending[parent.0] = Some(grad),
                }
            }

            let node = &mut self.nodes[id.0];
            node.accumulate_grad(&incoming)?;
            if let Some(param) = node.param.as_ref() {
                write_param(param)?.acc_grad(&incoming)?;
            }
        }
        Ok(())
    }

    /// Resets the gradient of each given node to exactly zero.
    ///
    /// Must run between two backward passes sharing the same nodes, or the
    /// second pass adds onto the first. Calling it repeatedly is harmless.
    pub fn zero_grad(&mut self, nodes: &[NodeId]) -> Result<(), NeuraGradError> {
        for &id in nodes {
            let node = self.node_mut(id)?;
            match node.grad.as_mut() {
                Some(grad) => grad.fill_(0.0),
                None => node.grad = Some(node.value.zeros_like()),
            }
        }
        Ok(())
    }

    /// Nodes reachable backwards from `root` through gradient-carrying edges,
    /// parents before children.
    ///
    /// Iterative DFS with tri-colour marking. A parent whose id is not smaller
    /// than its child's, or a grey node met again, is a `CycleDetected` error;
    /// append-only construction should make both impossible.
    pub fn topological_order(&self, root: NodeId) -> Result<Vec<NodeId>, NeuraGradError> {
        self.node(root)?;
        const WHITE: u8 = 0;
        const GREY: u8 = 1;
        const BLACK: u8 = 2;

        let mut colour = vec![WHITE; root.0 + 1];
        let mut order = Vec::new();
        // (node, parents already expanded)
        let mut stack = vec![(root, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                colour[id.0] = BLACK;
                order.push(id);
                continue;
            }
            match colour[id.0] {
                BLACK => continue,
                GREY => return Err(NeuraGradError::CycleDetected),
                _ => {}
            }
            colour[id.0] = GREY;
            stack.push((id, true));

            if let Some(op) = self.nodes[id.0].op.as_ref() {
                for parent in op.parents() {
                    if parent >= id {
                        log::warn!("parent {} recorded after child {}", parent, id);
                        return Err(NeuraGradError::CycleDetected);
                    }
                    if !self.nodes[parent.0].requires_grad {
                        continue;
                    }
                    match colour[parent.0] {
                        WHITE => stack.push((parent, false)),
                        GREY => return Err(NeuraGradError::CycleDetected),
                        _ => {}
                    }
                }
            }
        }
        Ok(order)
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
