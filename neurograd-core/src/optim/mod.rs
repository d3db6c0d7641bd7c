// neurograd-core/src/optim/mod.rs

//! Optimizers for training neural networks.
//!
//! This module provides the `Optimizer` trait and plain stochastic gradient
//! descent, the only update rule the training loop needs.

pub mod optimizer_trait;
pub mod sgd;

// Re-export key items for easier access
pub use optimizer_trait::Optimizer;
pub use sgd::SgdOptimizer;
