use crate::error::NeuraGradError;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Hyper-parameters of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    /// Seed for parameter initialisation and any seeded sampler.
    pub seed: u64,
    /// Emit an `info` log every `log_every` epochs; 0 disables it.
    pub log_every: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            seed: 0,
            log_every: 1,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    /// Checks that the run is well-formed.
    ///
    /// # Errors
    /// `InvalidConfiguration` for zero epochs or a learning rate that is not
    /// positive and finite.
    pub fn validate(&self) -> Result<(), NeuraGradError> {
        if self.epochs == 0 {
            return Err(NeuraGradError::InvalidConfiguration(
                "epochs must be at least 1".to_string(),
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NeuraGradError::InvalidConfiguration(format!(
                "learning rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Fresh generator seeded from `seed`.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(10, 0.1)
    }
}
