//! # neurograd-core
//!
//! Reverse-mode automatic differentiation over dense `f64` arrays, with the
//! layers, loss, optimizer and training loop needed to fit a small
//! multi-layer perceptron classifier.
//!
//! A forward pass records operations on an arena [`Graph`]; `backward` walks it
//! in reverse topological order and accumulates gradients into trainable
//! parameters, which [`SgdOptimizer`] then updates.

// Déclare les modules principaux de la crate
pub mod array;
pub mod autograd;
pub mod error;
pub mod model;
pub mod nn;
pub mod optim;
pub mod train;
pub mod utils;

// Ré-exporte les types principaux pour un accès direct via `neurograd_core::...`
pub use array::Array;
pub use autograd::{GradMode, Graph, NodeId};
pub use error::{ErrorKind, NeuraGradError};
pub use model::{build_model, Sequential};
pub use nn::{CrossEntropyLoss, Linear, LogSoftmax, Loss, Module, NLLLoss, Parameter, ReLU};
pub use optim::{Optimizer, SgdOptimizer};
pub use train::{predict, train, Batch, BatchSource, TrainConfig, Trainer};
