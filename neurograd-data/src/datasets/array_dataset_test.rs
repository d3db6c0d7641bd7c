use super::*;
use neurograd_core::ErrorKind;

fn small() -> Result<ArrayDataset, NeuraGradError> {
    ArrayDataset::new(
        Array::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2])?,
        vec![0, 2, 1],
    )
}

#[test]
fn test_array_dataset_get() -> Result<(), NeuraGradError> {
    let dataset = small()?;
    assert_eq!(dataset.len(), 3);
    assert!(!dataset.is_empty());
    assert_eq!(dataset.num_features(), 2);
    assert_eq!(dataset.num_classes(), 3);
    assert_eq!(dataset.get(1)?, (vec![3.0, 4.0], 2));
    Ok(())
}

#[test]
fn test_array_dataset_out_of_bounds() -> Result<(), NeuraGradError> {
    let dataset = small()?;
    assert_eq!(
        dataset.get(3).unwrap_err(),
        NeuraGradError::IndexOutOfBounds { index: 3, len: 3 }
    );
    Ok(())
}

#[test]
fn test_array_dataset_validates_labels() -> Result<(), NeuraGradError> {
    let err = ArrayDataset::new(Array::zeros(&[3, 2])?, vec![0, 1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    let batch = small()?.as_batch();
    assert_eq!(batch.targets, vec![0, 2, 1]);
    Ok(())
}
