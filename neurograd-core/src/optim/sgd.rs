use crate::autograd;
use crate::error::NeuraGradError;
use crate::nn::parameter::{read_param, write_param, ParamRef};
use crate::optim::optimizer_trait::Optimizer;
use crate::train::config::TrainConfig;

/// Implements plain Stochastic Gradient Descent: `param -= lr * grad`.
///
/// Holds the exact set of parameters it updates and a fixed learning rate.
/// There is no momentum or other per-parameter state.
#[derive(Debug)]
pub struct SgdOptimizer {
    params: Vec<ParamRef>,
    lr: f64,
    steps: u64,
}

impl SgdOptimizer {
    /// Creates a new `SgdOptimizer`.
    ///
    /// # Arguments
    ///
    /// * `params`: The parameters to optimize, e.g. `model.parameters()`.
    /// * `lr`: The learning rate; must be positive and finite.
    pub fn new(
        params: impl IntoIterator<Item = ParamRef>,
        lr: f64,
    ) -> Result<Self, NeuraGradError> {
        if !(lr.is_finite() && lr > 0.0) {
            return Err(NeuraGradError::InvalidConfiguration(format!(
                "learning rate must be positive and finite, got {}",
                lr
            )));
        }
        Ok(SgdOptimizer {
            params: params.into_iter().collect(),
            lr,
            steps: 0,
        })
    }

    /// Creates an optimizer using the learning rate of `config`.
    pub fn from_config(
        params: impl IntoIterator<Item = ParamRef>,
        config: &TrainConfig,
    ) -> Result<Self, NeuraGradError> {
        SgdOptimizer::new(params, config.learning_rate)
    }

    pub fn params(&self) -> &[ParamRef] {
        &self.params
    }

    /// Number of successful steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Fails on the first parameter without a gradient, before anything is mutated.
    fn check_gradients(&self) -> Result<(), NeuraGradError> {
        let mut missing = None;
        let mut with_grad = 0usize;
        for param in &self.params {
            let guard = read_param(param)?;
            if guard.grad().is_some() {
                with_grad += 1;
            } else if missing.is_none() {
                missing = Some(guard.display_name().to_string());
            }
        }
        match missing {
            None => Ok(()),
            Some(name) => {
                if with_grad > 0 {
                    log::warn!(
                        "parameter '{}' has no gradient while {} other(s) do; is it used in forward?",
                        name,
                        with_grad
                    );
                }
                Err(NeuraGradError::MissingGradient { name })
            }
        }
    }
}

impl Optimizer for SgdOptimizer {
    fn step(&mut self) -> Result<(), NeuraGradError> {
        self.check_gradients()?;
        for param in &self.params {
            write_param(param)?.descend(self.lr)?;
        }
        self.steps += 1;
        log::debug!(
            "sgd step {} over {} parameters (lr={})",
            self.steps,
            self.params.len(),
            self.lr
        );
        Ok(())
    }

    fn zero_grad(&mut self) -> Result<(), NeuraGradError> {
        autograd::zero_grad(&self.params)
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }
}
