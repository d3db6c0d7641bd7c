// src/nn/layers/mod.rs
// Module pour les différentes couches (Linear, ReLU, LogSoftmax)

pub mod linear;
pub mod log_softmax;
pub mod relu;

// Re-export key layer structs
pub use linear::Linear;
pub use log_softmax::LogSoftmax;
pub use relu::ReLU;
