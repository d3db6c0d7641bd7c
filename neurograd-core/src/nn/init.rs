use crate::array::Array;
use crate::error::NeuraGradError;
use crate::nn::parameter::Parameter;
use rand::Rng;

/// Bound of the default fan-in uniform initialisation, `1 / sqrt(fan_in)`.
pub fn fan_in_bound(fan_in: usize) -> Result<f64, NeuraGradError> {
    if fan_in == 0 {
        return Err(NeuraGradError::InvalidConfiguration(
            "fan_in must be positive for uniform initialisation".to_string(),
        ));
    }
    Ok(1.0 / (fan_in as f64).sqrt())
}

/// Array of `shape` drawn from `U(-1/sqrt(fan_in), 1/sqrt(fan_in))`.
pub fn fan_in_uniform<R: Rng + ?Sized>(
    shape: &[usize],
    fan_in: usize,
    rng: &mut R,
) -> Result<Array, NeuraGradError> {
    Array::uniform(shape, fan_in_bound(fan_in)?, rng)
}

/// Fills the parameter with samples from `U(-bound, bound)`.
///
/// Operates in-place and keeps any accumulated gradient untouched.
pub fn uniform_<R: Rng + ?Sized>(
    param: &mut Parameter,
    bound: f64,
    rng: &mut R,
) -> Result<(), NeuraGradError> {
    let value = Array::uniform(param.shape(), bound, rng)?;
    param.set_value(value)
}
