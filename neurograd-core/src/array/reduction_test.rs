use crate::array::Array;
use crate::error::NeuraGradError;
use approx::assert_relative_eq;

fn sample() -> Array {
    Array::new(vec![1.0, 5.0, 3.0, -2.0, 0.0, 8.0], vec![2, 3]).expect("valid")
}

#[test]
fn test_sum_and_mean_rows() -> Result<(), NeuraGradError> {
    let a = sample();
    assert_eq!(a.sum_rows()?.data(), &[9.0, 6.0]);
    let mean = a.mean_rows()?;
    assert_eq!(mean.shape(), &[2]);
    assert_relative_eq!(mean.data()[0], 3.0);
    assert_relative_eq!(mean.data()[1], 2.0);
    Ok(())
}

#[test]
fn test_sum_cols() -> Result<(), NeuraGradError> {
    let s = sample().sum_cols()?;
    assert_eq!(s.shape(), &[3]);
    assert_eq!(s.data(), &[-1.0, 5.0, 11.0]);
    Ok(())
}

#[test]
fn test_max_and_argmax_rows() -> Result<(), NeuraGradError> {
    let a = sample();
    assert_eq!(a.max_rows()?.data(), &[5.0, 8.0]);
    assert_eq!(a.argmax_rows()?, vec![1, 2]);

    let ties = Array::new(vec![2.0, 2.0, 1.0], vec![1, 3])?;
    assert_eq!(ties.argmax_rows()?, vec![0]);
    Ok(())
}

#[test]
fn test_row_reductions_require_rank_2() -> Result<(), NeuraGradError> {
    let v = Array::ones(&[4])?;
    assert!(v.sum_rows().is_err());
    assert!(v.sum_cols().is_err());
    assert_eq!(v.sum_all(), 4.0);
    Ok(())
}
