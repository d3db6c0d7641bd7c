//! Datasets, samplers and mini-batch loading for `neurograd-core`.
//!
//! A [`DataLoader`] implements [`neurograd_core::BatchSource`], so it plugs
//! straight into the training loop.

pub mod dataloader;
pub mod datasets;
pub mod samplers;

pub use dataloader::DataLoader;
pub use datasets::{make_blobs, ArrayDataset, Dataset};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
