// Opérations d'algèbre linéaire (matmul, transpose) sur des tableaux 2-D.

use super::Array;
use crate::error::NeuraGradError;

impl Array {
    /// Standard matrix product `(m x k) . (k x n) -> (m x n)`.
    ///
    /// # Errors
    /// `RankMismatch` if either operand is not 2-D, `ShapeMismatch` if the
    /// inner dimensions differ.
    pub fn matmul(&self, other: &Array) -> Result<Array, NeuraGradError> {
        let (m, k) = self.dims2("matmul")?;
        let (k2, n) = other.dims2("matmul")?;
        if k != k2 {
            return Err(NeuraGradError::shape_mismatch(
                &[k, n],
                other.shape(),
                "matmul",
            ));
        }

        let a = self.data();
        let b = other.data();
        let mut out = vec![0.0; m * n];
        // i-p-j loop order keeps the inner loop contiguous in both `b` and `out`.
        for i in 0..m {
            let out_row = &mut out[i * n..(i + 1) * n];
            for p in 0..k {
                let a_ip = a[i * k + p];
                let b_row = &b[p * n..(p + 1) * n];
                for (o, &b_pj) in out_row.iter_mut().zip(b_row.iter()) {
                    *o += a_ip * b_pj;
                }
            }
        }
        Ok(Array::from_parts(out, vec![m, n]))
    }

    /// Transpose of a 2-D array.
    pub fn transpose(&self) -> Result<Array, NeuraGradError> {
        let (rows, cols) = self.dims2("transpose")?;
        let src = self.data();
        let mut out = vec![0.0; rows * cols];
        for r in 0..rows {
            for c in 0..cols {
                out[c * rows + r] = src[r * cols + c];
            }
        }
        Ok(Array::from_parts(out, vec![cols, rows]))
    }
}

#[cfg(test)]
#[path = "linalg_test.rs"]
mod tests;
