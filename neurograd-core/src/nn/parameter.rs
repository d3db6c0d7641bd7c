use crate::array::Array;
use crate::error::NeuraGradError;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared handle to a trainable parameter.
///
/// The owning module, every graph that records the parameter, and the
/// optimizer all hold clones of the same handle.
pub type ParamRef = Arc<RwLock<Parameter>>;

/// A learnable array owned by a module, with its accumulated gradient.
///
/// The value lives behind an `Arc` so that graph leaves can share it without
/// copying. Updates go through copy-on-write: a graph still holding the old
/// buffer keeps seeing the value it recorded.
pub struct Parameter {
    name: Option<String>,
    value: Arc<Array>,
    grad: Option<Array>,
}

impl Parameter {
    pub fn new(value: Array, name: Option<String>) -> Self {
        Parameter {
            name,
            value: Arc::new(value),
            grad: None,
        }
    }

    pub fn new_unnamed(value: Array) -> Self {
        Parameter::new(value, None)
    }

    /// Wraps the parameter into a shareable [`ParamRef`].
    pub fn into_ref(self) -> ParamRef {
        Arc::new(RwLock::new(self))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> &Array {
        &self.value
    }

    pub(crate) fn value_arc(&self) -> Arc<Array> {
        Arc::clone(&self.value)
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    /// Accumulated gradient, `None` until the first backward pass or `zero_grad`.
    pub fn grad(&self) -> Option<&Array> {
        self.grad.as_ref()
    }

    /// Adds `grad` into the accumulator.
    pub fn acc_grad(&mut self, grad: &Array) -> Result<(), NeuraGradError> {
        match self.grad.as_mut() {
            Some(existing) => existing.add_(grad),
            None => {
                self.value.ensure_same_shape(grad, "acc_grad")?;
                self.grad = Some(grad.clone());
                Ok(())
            }
        }
    }

    /// Sets the gradient to exactly zero, allocating it if needed.
    pub fn zero_grad(&mut self) {
        match self.grad.as_mut() {
            Some(grad) => grad.fill_(0.0),
            None => self.grad = Some(self.value.zeros_like()),
        }
    }

    /// Replaces the value, keeping the shape fixed.
    pub fn set_value(&mut self, value: Array) -> Result<(), NeuraGradError> {
        self.value.ensure_same_shape(&value, "set_value")?;
        self.value = Arc::new(value);
        Ok(())
    }

    /// In-place `value -= lr * grad`.
    ///
    /// # Errors
    /// `MissingGradient` if no gradient was ever accumulated.
    pub fn descend(&mut self, lr: f64) -> Result<(), NeuraGradError> {
        let grad = self.grad.as_ref().ok_or_else(|| NeuraGradError::MissingGradient {
            name: self.display_name().to_string(),
        })?;
        Arc::make_mut(&mut self.value).sub_scaled_(lr, grad)
    }

    pub(crate) fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parameter(name={:?}, shape={:?}, has_grad={})",
            self.name,
            self.value.shape(),
            self.grad.is_some()
        )
    }
}

/// Read-locks a parameter, mapping poisoning to `LockPoisoned`.
pub fn read_param(param: &ParamRef) -> Result<RwLockReadGuard<'_, Parameter>, NeuraGradError> {
    param.read().map_err(|poisoned| {
        let name = poisoned.get_ref().display_name().to_string();
        log::warn!("RwLock for parameter '{}' was poisoned on read", name);
        NeuraGradError::LockPoisoned { name }
    })
}

/// Write-locks a parameter, mapping poisoning to `LockPoisoned`.
pub fn write_param(param: &ParamRef) -> Result<RwLockWriteGuard<'_, Parameter>, NeuraGradError> {
    param.write().map_err(|poisoned| {
        let name = poisoned.get_ref().display_name().to_string();
        log::warn!("RwLock for parameter '{}' was poisoned on write", name);
        NeuraGradError::LockPoisoned { name }
    })
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
