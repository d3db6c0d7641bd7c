use super::traits::Dataset;
use neurograd_core::{Array, Batch, NeuraGradError};

/// In-memory classification dataset: one feature row and one label per sample.
#[derive(Debug, Clone)]
pub struct ArrayDataset {
    features: Array,
    labels: Vec<usize>,
}

impl ArrayDataset {
    /// Creates a dataset from a `(samples, features)` array and matching labels.
    ///
    /// # Errors
    /// `RankMismatch` if `features` is not 2-D, `ShapeMismatch` if the label
    /// count differs from the number of rows.
    pub fn new(features: Array, labels: Vec<usize>) -> Result<Self, NeuraGradError> {
        // Same contract as a batch; reuse its validation.
        let Batch { inputs, targets } = Batch::new(features, labels)?;
        Ok(ArrayDataset {
            features: inputs,
            labels: targets,
        })
    }

    pub fn features(&self) -> &Array {
        &self.features
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn num_features(&self) -> usize {
        self.features.shape()[1]
    }

    /// Number of classes assuming labels are `0..=max`.
    pub fn num_classes(&self) -> usize {
        self.labels.iter().max().map_or(0, |&m| m + 1)
    }

    /// The whole dataset as a single batch.
    pub fn as_batch(&self) -> Batch {
        Batch {
            inputs: self.features.clone(),
            targets: self.labels.clone(),
        }
    }
}

impl Dataset for ArrayDataset {
    type Item = (Vec<f64>, usize);

    fn get(&self, index: usize) -> Result<Self::Item, NeuraGradError> {
        let label = *self.labels.get(index).ok_or(NeuraGradError::IndexOutOfBounds {
            index,
            len: self.labels.len(),
        })?;
        let cols = self.num_features();
        let row = self.features.data()[index * cols..(index + 1) * cols].to_vec();
        Ok((row, label))
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
#[path = "array_dataset_test.rs"]
mod tests;
