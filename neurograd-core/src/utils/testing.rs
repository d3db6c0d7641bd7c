use crate::array::Array;

/// Checks if an array is approximately equal to the expected shape and data.
/// Panics if shapes differ or any element differs by more than `tolerance`.
pub fn check_array_near(actual: &Array, expected_shape: &[usize], expected_data: &[f64], tolerance: f64) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(
        actual.data().len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual.data().iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

