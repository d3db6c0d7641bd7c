/// Whether a [`Graph`](super::Graph) records operations for backpropagation.
///
/// The mode is fixed when the graph is created and travels with it into every
/// `Module::forward` call, so inference code paths never share mutable global
/// state with training ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradMode {
    /// Record parents and backward rules for every op.
    #[default]
    Enabled,
    /// Compute forward values only; every node is a detached leaf.
    Disabled,
}

impl GradMode {
    pub fn is_enabled(self) -> bool {
        matches!(self, GradMode::Enabled)
    }
}
