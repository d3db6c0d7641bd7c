//! # Array
//!
//! Fixed-shape dense buffer of `f64` values in row-major layout. This is the
//! leaf data type of the engine: every graph node owns one `Array` as its
//! forward value and, optionally, one of identical shape as its gradient.
//!
//! Operations are pure and return a new `Array`, except the explicit in-place
//! helpers (`add_`, `sub_scaled_`, `fill_`) reserved for gradient accumulation
//! and the optimizer update.

use crate::error::NeuraGradError;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::fmt;

pub mod arithmetic;
pub mod elementwise;
pub mod linalg;
pub mod reduction;

/// Dense row-major `f64` buffer with a fixed shape.
///
/// Invariant: `data.len() == shape.iter().product()`. A rank-0 array (empty
/// shape) holds exactly one element and is used for scalar losses.
#[derive(Clone, PartialEq)]
pub struct Array {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl Array {
    /// Creates an array from a flat buffer and a shape.
    ///
    /// # Errors
    /// `ArrayCreationError` if any dimension is zero or the buffer length does
    /// not match the product of the shape.
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, NeuraGradError> {
        let numel: usize = shape.iter().product();
        if shape.iter().any(|&d| d == 0) || data.len() != numel {
            return Err(NeuraGradError::ArrayCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Array { shape, data })
    }

    /// Creates a rank-0 array holding `value`.
    pub fn scalar(value: f64) -> Self {
        Array {
            shape: Vec::new(),
            data: vec![value],
        }
    }

    /// Creates an array filled with `value`.
    pub fn full(shape: &[usize], value: f64) -> Result<Self, NeuraGradError> {
        let numel = shape.iter().product();
        Array::new(vec![value; numel], shape.to_vec())
    }

    pub fn zeros(shape: &[usize]) -> Result<Self, NeuraGradError> {
        Array::full(shape, 0.0)
    }

    pub fn ones(shape: &[usize]) -> Result<Self, NeuraGradError> {
        Array::full(shape, 1.0)
    }

    /// Zero array with the same shape as `self`. Infallible since `self` is valid.
    pub fn zeros_like(&self) -> Self {
        Array {
            shape: self.shape.clone(),
            data: vec![0.0; self.data.len()],
        }
    }

    /// Samples every element from `U(-bound, bound)`.
    ///
    /// Used for fan-in initialisation of `Linear` layers; passing a seeded
    /// `rng` makes the result reproducible.
    pub fn uniform<R: Rng + ?Sized>(
        shape: &[usize],
        bound: f64,
        rng: &mut R,
    ) -> Result<Self, NeuraGradError> {
        if !(bound.is_finite() && bound > 0.0) {
            return Err(NeuraGradError::InvalidConfiguration(format!(
                "uniform bound must be positive and finite, got {}",
                bound
            )));
        }
        let numel: usize = shape.iter().product();
        let dist = Uniform::new_inclusive(-bound, bound);
        let data = (0..numel).map(|_| dist.sample(rng)).collect();
        Array::new(data, shape.to_vec())
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consumes the array and returns its flat buffer.
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// True for rank-0 arrays and any array holding exactly one element.
    pub fn is_scalar(&self) -> bool {
        self.data.len() == 1
    }

    /// Returns the single value of a one-element array.
    pub fn item(&self) -> Result<f64, NeuraGradError> {
        if !self.is_scalar() {
            return Err(NeuraGradError::shape_mismatch(&[], &self.shape, "item"));
        }
        Ok(self.data[0])
    }

    /// Element at `(row, col)` of a 2-D array.
    pub fn at(&self, row: usize, col: usize) -> Result<f64, NeuraGradError> {
        let (rows, cols) = self.dims2("at")?;
        if row >= rows || col >= cols {
            return Err(NeuraGradError::shape_mismatch(
                &self.shape,
                &[row + 1, col + 1],
                "at",
            ));
        }
        Ok(self.data[row * cols + col])
    }

    /// Returns `(rows, cols)` or a `RankMismatch` naming `operation`.
    pub(crate) fn dims2(&self, operation: &str) -> Result<(usize, usize), NeuraGradError> {
        match self.shape.as_slice() {
            [rows, cols] => Ok((*rows, *cols)),
            _ => Err(NeuraGradError::rank_mismatch(2, self.rank(), operation)),
        }
    }

    pub(crate) fn ensure_same_shape(
        &self,
        other: &Array,
        operation: &str,
    ) -> Result<(), NeuraGradError> {
        if self.shape != other.shape {
            return Err(NeuraGradError::shape_mismatch(
                &self.shape,
                &other.shape,
                operation,
            ));
        }
        Ok(())
    }

    /// Builds an array from parts already known to be consistent.
    pub(crate) fn from_parts(data: Vec<f64>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(data.len(), shape.iter().product::<usize>());
        Array { shape, data }
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 8;
        if self.data.len() <= PREVIEW {
            write!(f, "Array(shape={:?}, data={:?})", self.shape, self.data)
        } else {
            write!(
                f,
                "Array(shape={:?}, data=[{:?}, ...; {} elements])",
                self.shape,
                &self.data[..PREVIEW],
                self.data.len()
            )
        }
    }
}

#[cfg(test)]
#[path = "array_test.rs"]
mod tests;
