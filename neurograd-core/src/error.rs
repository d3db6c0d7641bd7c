use thiserror::Error;

/// Broad classification of a [`NeuraGradError`].
///
/// Every variant of the error enum belongs to exactly one kind, so callers can
/// react to a whole family of failures without listing individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operand or layer dimensions are incompatible.
    Shape,
    /// A value lies outside its valid domain (labels, configuration).
    Domain,
    /// `backward` was invoked incorrectly or the graph is malformed.
    Graph,
    /// An operation was attempted in the wrong order (e.g. step before backward).
    State,
}

/// Custom error type for the NeuraGrad engine.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum NeuraGradError {
    // --- Shape errors ---
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Rank mismatch during {operation}: expected rank {expected}, got {actual}")]
    RankMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Array creation error: data length {data_len} does not match shape {shape:?}")]
    ArrayCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    // --- Domain errors ---
    #[error("Target {target} at batch index {index} is out of range for {classes} classes")]
    TargetOutOfRange {
        index: usize,
        target: usize,
        classes: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // --- Graph errors ---
    #[error("Backward called on non-scalar node of shape {shape:?} without explicit gradient.")]
    BackwardNonScalar { shape: Vec<usize> },

    #[error("Seed gradient shape {actual:?} does not match node shape {expected:?}")]
    SeedShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Cycle detected in the computation graph during backward pass.")]
    CycleDetected,

    #[error("Node {id} does not belong to this graph ({len} nodes recorded)")]
    UnknownNode { id: usize, len: usize },

    #[error("Backward called on a graph built with gradient tracking disabled")]
    GradientsDisabled,

    // --- State errors ---
    #[error("Parameter '{name}' has no accumulated gradient; call backward before step")]
    MissingGradient { name: String },

    #[error("Gradient was never allocated for node {id}")]
    GradientNotAllocated { id: usize },

    #[error("Lock on parameter '{name}' was poisoned")]
    LockPoisoned { name: String },
}

impl NeuraGradError {
    /// Returns the taxonomy class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NeuraGradError::ShapeMismatch { .. }
            | NeuraGradError::RankMismatch { .. }
            | NeuraGradError::ArrayCreationError { .. }
            | NeuraGradError::IndexOutOfBounds { .. } => ErrorKind::Shape,
            NeuraGradError::TargetOutOfRange { .. } | NeuraGradError::InvalidConfiguration(_) => {
                ErrorKind::Domain
            }
            NeuraGradError::BackwardNonScalar { .. }
            | NeuraGradError::SeedShapeMismatch { .. }
            | NeuraGradError::CycleDetected
            | NeuraGradError::UnknownNode { .. }
            | NeuraGradError::GradientsDisabled => ErrorKind::Graph,
            NeuraGradError::MissingGradient { .. }
            | NeuraGradError::GradientNotAllocated { .. }
            | NeuraGradError::LockPoisoned { .. } => ErrorKind::State,
        }
    }

    pub(crate) fn shape_mismatch(expected: &[usize], actual: &[usize], operation: &str) -> Self {
        NeuraGradError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
            operation: operation.to_string(),
        }
    }

    pub(crate) fn rank_mismatch(expected: usize, actual: usize, operation: &str) -> Self {
        NeuraGradError::RankMismatch {
            expected,
            actual,
            operation: operation.to_string(),
        }
    }
}
