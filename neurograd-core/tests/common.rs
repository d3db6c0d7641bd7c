use neurograd_core::{Array, Batch, NeuraGradError};

// Helpers shared by the integration test binaries. Not every binary uses every
// helper, hence the allow(dead_code).

/// Routes `log` output through the test harness; safe to call repeatedly.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Four linearly separable points in two classes, as one full batch.
#[allow(dead_code)]
pub fn four_point_batches() -> Result<Vec<Batch>, NeuraGradError> {
    let inputs = Array::new(
        vec![-1.0, -0.5, -0.7, 0.8, 0.9, -0.6, 1.1, 0.4],
        vec![4, 2],
    )?;
    Ok(vec![Batch::new(inputs, vec![0, 0, 1, 1])?])
}

/// Deterministic pseudo-random values in `[-1, 1)` without touching an RNG.
#[allow(dead_code)]
pub fn wavy(n: usize, phase: f64) -> Vec<f64> {
    (0..n).map(|i| ((i as f64 + phase) * 0.731).sin()).collect()
}
