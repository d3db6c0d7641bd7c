// neurograd-data/src/samplers/traits.rs

use std::fmt::Debug;

/// A Sampler trait that defines how to iterate over indices of a dataset.
///
/// Samplers are used by `DataLoader` to generate the index order of one
/// epoch. Each call to [`Sampler::iter`] starts a new epoch, which is why it
/// takes `&mut self`: stateful samplers advance their generator.
pub trait Sampler: Debug + Send + Sync {
    /// Returns an iterator over the indices of a dataset for one epoch.
    ///
    /// # Arguments
    ///
    /// * `dataset_len` - The total number of items in the dataset.
    fn iter(&mut self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Returns the total number of indices one epoch yields.
    fn len(&self, dataset_len: usize) -> usize;
}
