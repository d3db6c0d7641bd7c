use crate::array::Array;
use crate::error::NeuraGradError;

/// One mini-batch: a `(batch, features)` input and one class label per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub inputs: Array,
    pub targets: Vec<usize>,
}

impl Batch {
    /// # Errors
    /// `RankMismatch` if `inputs` is not 2-D, `ShapeMismatch` if the number of
    /// targets differs from the number of rows.
    pub fn new(inputs: Array, targets: Vec<usize>) -> Result<Self, NeuraGradError> {
        let (rows, _) = inputs.dims2("batch")?;
        if rows != targets.len() {
            return Err(NeuraGradError::shape_mismatch(&[rows], &[targets.len()], "batch targets"));
        }
        Ok(Batch { inputs, targets })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Supplier of mini-batches for the training loop.
///
/// Each call to [`BatchSource::batches`] starts a new, finite pass over the
/// data (one epoch). Implementations decide ordering, e.g. shuffling per epoch.
pub trait BatchSource {
    fn batches(&mut self) -> Box<dyn Iterator<Item = Result<Batch, NeuraGradError>> + '_>;
}

/// A fixed list of batches replayed in order every epoch.
impl BatchSource for Vec<Batch> {
    fn batches(&mut self) -> Box<dyn Iterator<Item = Result<Batch, NeuraGradError>> + '_> {
        Box::new(self.iter().cloned().map(Ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_batch_validation() -> Result<(), NeuraGradError> {
        let batch = Batch::new(Array::zeros(&[3, 2])?, vec![0, 1, 0])?;
        assert_eq!(batch.len(), 3);
        assert!(!batch.is_empty());

        let err = Batch::new(Array::zeros(&[3, 2])?, vec![0, 1]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        let err = Batch::new(Array::zeros(&[6])?, vec![0; 6]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        Ok(())
    }

    #[test]
    fn test_vec_source_is_restartable() -> Result<(), NeuraGradError> {
        let mut source = vec![
            Batch::new(Array::zeros(&[1, 2])?, vec![0])?,
            Batch::new(Array::ones(&[1, 2])?, vec![1])?,
        ];
        for _ in 0..2 {
            let targets: Vec<usize> = source
                .batches()
                .map(|b| b.map(|b| b.targets[0]))
                .collect::<Result<_, _>>()?;
            assert_eq!(targets, vec![0, 1]);
        }
        Ok(())
    }
}
