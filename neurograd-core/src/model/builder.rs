use crate::error::NeuraGradError;
use crate::model::sequential::Sequential;
use crate::nn::{Linear, LogSoftmax, ReLU};
use rand::Rng;

/// Builds a multi-layer perceptron classifier.
///
/// `layer_sizes = [in, h1, ..., out]` yields
/// `Linear(in, h1) -> ReLU -> ... -> Linear(h_k, out) -> LogSoftmax`, so the
/// output holds log-probabilities suitable for [`NLLLoss`](crate::nn::NLLLoss).
/// Layers are registered under their position ("0", "1", ...).
///
/// # Errors
/// `InvalidConfiguration` if fewer than two sizes are given or any is zero.
pub fn build_model<R: Rng + ?Sized>(
    layer_sizes: &[usize],
    rng: &mut R,
) -> Result<Sequential, NeuraGradError> {
    if layer_sizes.len() < 2 {
        return Err(NeuraGradError::InvalidConfiguration(format!(
            "build_model needs at least an input and an output size, got {:?}",
            layer_sizes
        )));
    }
    if layer_sizes.contains(&0) {
        return Err(NeuraGradError::InvalidConfiguration(format!(
            "layer sizes must be positive, got {:?}",
            layer_sizes
        )));
    }

    let mut model = Sequential::new();
    let last = layer_sizes.len() - 2;
    for (i, pair) in layer_sizes.windows(2).enumerate() {
        model.push(Box::new(Linear::new(pair[0], pair[1], true, rng)?))?;
        if i < last {
            model.push(Box::new(ReLU::new()))?;
        }
    }
    model.push(Box::new(LogSoftmax::new()))?;
    log::debug!("built model {:?} with {} modules", layer_sizes, model.len());
    Ok(model)
}
