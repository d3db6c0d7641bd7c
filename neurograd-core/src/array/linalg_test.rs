use crate::array::Array;
use crate::error::{ErrorKind, NeuraGradError};

#[test]
fn test_matmul_basic() -> Result<(), NeuraGradError> {
    let a = Array::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])?;
    let b = Array::new(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], vec![3, 2])?;
    let c = a.matmul(&b)?;
    assert_eq!(c.shape(), &[2, 2]);
    assert_eq!(c.data(), &[58.0, 64.0, 139.0, 154.0]);
    Ok(())
}

#[test]
fn test_matmul_inner_dim_mismatch() -> Result<(), NeuraGradError> {
    let a = Array::zeros(&[64, 100])?;
    let b = Array::zeros(&[784, 128])?;
    let err = a.matmul(&b).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    Ok(())
}

#[test]
fn test_matmul_requires_rank_2() -> Result<(), NeuraGradError> {
    let a = Array::zeros(&[3])?;
    let b = Array::zeros(&[3, 1])?;
    assert!(matches!(
        a.matmul(&b),
        Err(NeuraGradError::RankMismatch { expected: 2, actual: 1, .. })
    ));
    Ok(())
}

#[test]
fn test_transpose() -> Result<(), NeuraGradError> {
    let a = Array::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])?;
    let t = a.transpose()?;
    assert_eq!(t.shape(), &[3, 2]);
    assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    assert_eq!(t.transpose()?, a);
    Ok(())
}

#[test]
fn test_matmul_propagates_non_finite_through_zeros() -> Result<(), NeuraGradError> {
    // 0 * inf is NaN; a zero in the left operand must not mask it.
    let a = Array::new(vec![0.0, 1.0], vec![1, 2])?;
    let b = Array::new(vec![f64::INFINITY, 2.0], vec![2, 1])?;
    assert!(a.matmul(&b)?.data()[0].is_nan());

    let b = Array::new(vec![f64::NAN, 2.0], vec![2, 1])?;
    assert!(a.matmul(&b)?.data()[0].is_nan());
    Ok(())
}
