//! Training loop, its configuration and inference helpers.

pub mod batch;
pub mod config;
pub mod inference;
pub mod trainer;

pub use batch::{Batch, BatchSource};
pub use config::TrainConfig;
pub use inference::{accuracy, predict, predict_classes};
pub use trainer::{train, EpochReport, TrainState, Trainer};
