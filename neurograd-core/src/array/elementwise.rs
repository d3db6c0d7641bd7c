use super::Array;
use crate::error::NeuraGradError;

impl Array {
    /// Applies `f` to every element, returning a new array of the same shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Array {
        let data = self.data().iter().map(|&x| f(x)).collect();
        Array::from_parts(data, self.shape().to_vec())
    }

    pub fn exp(&self) -> Array {
        self.map(f64::exp)
    }

    /// Natural logarithm. Non-positive inputs yield `-inf`/`NaN` as in IEEE 754;
    /// callers are expected to keep inputs in the valid domain.
    pub fn ln(&self) -> Array {
        self.map(f64::ln)
    }

    /// `max(0, x)` element-wise.
    pub fn relu(&self) -> Array {
        self.map(|x| if x > 0.0 { x } else { 0.0 })
    }

    /// Indicator `x > 0` as 1.0/0.0; the subgradient at zero is 0.
    pub fn relu_mask(&self) -> Array {
        self.map(|x| if x > 0.0 { 1.0 } else { 0.0 })
    }

    /// Adds a 1-D `bias` of shape `(cols)` to every row of a `(rows, cols)` array.
    ///
    /// This is the only broadcast the engine supports.
    pub fn add_bias(&self, bias: &Array) -> Result<Array, NeuraGradError> {
        let (_, cols) = self.dims2("add_bias")?;
        if bias.shape() != [cols] {
            return Err(NeuraGradError::shape_mismatch(
                &[cols],
                bias.shape(),
                "add_bias",
            ));
        }
        let b = bias.data();
        let data = self
            .data()
            .chunks_exact(cols)
            .flat_map(|row| row.iter().zip(b.iter()).map(|(&x, &y)| x + y))
            .collect();
        Ok(Array::from_parts(data, self.shape().to_vec()))
    }

    /// Row-wise `x - log(sum(exp(x)))`, stabilised by subtracting each row's max.
    pub fn log_softmax_rows(&self) -> Result<Array, NeuraGradError> {
        let (_, cols) = self.dims2("log_softmax")?;
        let mut out = Vec::with_capacity(self.numel());
        for row in self.data().chunks_exact(cols) {
            let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let log_sum = row.iter().map(|&x| (x - max).exp()).sum::<f64>().ln() + max;
            out.extend(row.iter().map(|&x| x - log_sum));
        }
        Ok(Array::from_parts(out, self.shape().to_vec()))
    }

    /// Row-wise softmax, computed as `exp(log_softmax(x))`.
    pub fn softmax_rows(&self) -> Result<Array, NeuraGradError> {
        Ok(self.log_softmax_rows()?.exp())
    }
}

#[cfg(test)]
#[path = "elementwise_test.rs"]
mod tests;
