use super::Array;
use crate::error::NeuraGradError;

impl Array {
    fn reduce_rows(
        &self,
        operation: &str,
        f: impl Fn(&[f64]) -> f64,
    ) -> Result<Array, NeuraGradError> {
        let (rows, cols) = self.dims2(operation)?;
        let data = self.data().chunks_exact(cols).map(f).collect();
        Ok(Array::from_parts(data, vec![rows]))
    }

    /// Sum over the last axis: `(rows, cols) -> (rows)`.
    pub fn sum_rows(&self) -> Result<Array, NeuraGradError> {
        self.reduce_rows("sum_rows", |row| row.iter().sum())
    }

    /// Mean over the last axis: `(rows, cols) -> (rows)`.
    pub fn mean_rows(&self) -> Result<Array, NeuraGradError> {
        self.reduce_rows("mean_rows", |row| {
            row.iter().sum::<f64>() / row.len() as f64
        })
    }

    /// Maximum over the last axis: `(rows, cols) -> (rows)`.
    pub fn max_rows(&self) -> Result<Array, NeuraGradError> {
        self.reduce_rows("max_rows", |row| {
            row.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        })
    }

    /// Index of the largest element of each row. Ties resolve to the lowest index.
    pub fn argmax_rows(&self) -> Result<Vec<usize>, NeuraGradError> {
        let (_, cols) = self.dims2("argmax_rows")?;
        Ok(self
            .data()
            .chunks_exact(cols)
            .map(|row| {
                let mut best = 0;
                for (j, &v) in row.iter().enumerate() {
                    if v > row[best] {
                        best = j;
                    }
                }
                best
            })
            .collect())
    }

    /// Sum over the leading (batch) axis: `(rows, cols) -> (cols)`.
    pub fn sum_cols(&self) -> Result<Array, NeuraGradError> {
        let (_, cols) = self.dims2("sum_cols")?;
        let mut out = vec![0.0; cols];
        for row in self.data().chunks_exact(cols) {
            for (o, &v) in out.iter_mut().zip(row.iter()) {
                *o += v;
            }
        }
        Ok(Array::from_parts(out, vec![cols]))
    }

    /// Sum of every element.
    pub fn sum_all(&self) -> f64 {
        self.data().iter().sum()
    }
}

#[cfg(test)]
#[path = "reduction_test.rs"]
mod tests;
