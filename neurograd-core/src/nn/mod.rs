// src/nn/mod.rs
// Module principal pour les couches de réseau de neurones, les pertes, etc.

pub mod init;
pub mod layers;
pub mod losses;
pub mod module; // Trait Module
pub mod parameter; // struct Parameter

// Re-export common items
pub use layers::{Linear, LogSoftmax, ReLU};
pub use losses::{CrossEntropyLoss, Loss, NLLLoss};
pub use module::Module;
pub use parameter::{ParamRef, Parameter};
