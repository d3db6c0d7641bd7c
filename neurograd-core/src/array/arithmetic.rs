use super::Array;
use crate::error::NeuraGradError;

impl Array {
    fn zip_with(
        &self,
        other: &Array,
        operation: &str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Array, NeuraGradError> {
        self.ensure_same_shape(other, operation)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Array::from_parts(data, self.shape.clone()))
    }

    /// Element-wise sum. Shapes must match exactly.
    pub fn add(&self, other: &Array) -> Result<Array, NeuraGradError> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Element-wise difference. Shapes must match exactly.
    pub fn sub(&self, other: &Array) -> Result<Array, NeuraGradError> {
        self.zip_with(other, "sub", |a, b| a - b)
    }

    /// Element-wise (Hadamard) product. Shapes must match exactly.
    pub fn mul(&self, other: &Array) -> Result<Array, NeuraGradError> {
        self.zip_with(other, "mul", |a, b| a * b)
    }

    /// Multiplies every element by `factor`.
    pub fn scale(&self, factor: f64) -> Array {
        self.map(|x| x * factor)
    }

    /// In-place `self += other`, used for gradient accumulation.
    pub fn add_(&mut self, other: &Array) -> Result<(), NeuraGradError> {
        self.ensure_same_shape(other, "add_")?;
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
        Ok(())
    }

    /// In-place `self -= alpha * other`, the SGD parameter update.
    pub fn sub_scaled_(&mut self, alpha: f64, other: &Array) -> Result<(), NeuraGradError> {
        self.ensure_same_shape(other, "sub_scaled_")?;
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a -= alpha * b;
        }
        Ok(())
    }

    /// Overwrites every element with `value`.
    pub fn fill_(&mut self, value: f64) {
        self.data.iter_mut().for_each(|x| *x = value);
    }
}

#[cfg(test)]
#[path = "arithmetic_test.rs"]
mod tests;
