use neurograd_core::NeuraGradError;

/// Trait representing a dataset.
///
/// A dataset provides access to individual data samples (e.g., input features
/// and corresponding target labels) via an index.
///
/// `Item` is the type returned by accessing a single sample, typically
/// `(features, label)`.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    type Item;

    /// Returns the data sample at the given index.
    ///
    /// # Errors
    /// `IndexOutOfBounds` if `index >= self.len()`.
    fn get(&self, index: usize) -> Result<Self::Item, NeuraGradError>;

    /// Returns the total number of samples in the dataset.
    fn len(&self) -> usize;

    /// Returns true if the dataset contains no samples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
