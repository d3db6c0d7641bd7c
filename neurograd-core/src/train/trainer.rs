use crate::autograd::Graph;
use crate::error::NeuraGradError;
use crate::nn::{Loss, Module};
use crate::optim::Optimizer;
use crate::train::batch::{Batch, BatchSource};
use crate::train::config::TrainConfig;

/// Phase of the training loop.
///
/// Each batch cycles `Idle -> Forward -> Loss -> Backward -> Update -> Idle`;
/// `Done` is reached once every epoch has run. A failed run stays in the phase
/// where the error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainState {
    Idle,
    Forward,
    Loss,
    Backward,
    Update,
    Done,
}

/// Summary of one completed epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochReport {
    /// 1-based epoch number.
    pub epoch: usize,
    pub mean_loss: f64,
    pub batches: usize,
}

/// Drives epochs of forward, loss, backward and update over a batch source.
///
/// Every batch gets a fresh [`Graph`] that is dropped before the optimizer
/// step. Any error aborts the run; there is no partial-epoch recovery.
#[derive(Debug)]
pub struct Trainer {
    epochs: usize,
    log_every: usize,
    state: TrainState,
}

impl Trainer {
    /// # Errors
    /// `InvalidConfiguration` if `epochs` is zero.
    pub fn new(epochs: usize) -> Result<Self, NeuraGradError> {
        if epochs == 0 {
            return Err(NeuraGradError::InvalidConfiguration(
                "epochs must be at least 1".to_string(),
            ));
        }
        Ok(Trainer {
            epochs,
            log_every: 1,
            state: TrainState::Idle,
        })
    }

    pub fn from_config(config: &TrainConfig) -> Result<Self, NeuraGradError> {
        config.validate()?;
        Ok(Trainer {
            epochs: config.epochs,
            log_every: config.log_every,
            state: TrainState::Idle,
        })
    }

    pub fn state(&self) -> TrainState {
        self.state
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    fn transition(&mut self, next: TrainState) {
        log::debug!("train state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Runs every epoch and returns one report per epoch.
    ///
    /// Gradients are zeroed before the first batch and after every update, so
    /// each step sees only its own batch's gradient.
    ///
    /// # Errors
    /// Propagates the first error from the source, model, loss or optimizer.
    /// `InvalidConfiguration` if an epoch yields no batch.
    pub fn run<M, L, O, S>(
        &mut self,
        model: &M,
        loss_fn: &L,
        optimizer: &mut O,
        source: &mut S,
    ) -> Result<Vec<EpochReport>, NeuraGradError>
    where
        M: Module + ?Sized,
        L: Loss + ?Sized,
        O: Optimizer + ?Sized,
        S: BatchSource + ?Sized,
    {
        self.state = TrainState::Idle;
        optimizer.zero_grad()?;

        let mut reports = Vec::with_capacity(self.epochs);
        for epoch in 1..=self.epochs {
            let mut running_loss = 0.0;
            let mut batches = 0usize;
            for batch in source.batches() {
                running_loss += self.step(model, loss_fn, optimizer, batch?)?;
                batches += 1;
            }
            if batches == 0 {
                return Err(NeuraGradError::InvalidConfiguration(format!(
                    "batch source produced no batches in epoch {}",
                    epoch
                )));
            }

            let report = EpochReport {
                epoch,
                mean_loss: running_loss / batches as f64,
                batches,
            };
            if self.log_every > 0 && (epoch % self.log_every == 0 || epoch == self.epochs) {
                log::info!(
                    "epoch {}/{}: mean loss {:.6} over {} batches",
                    epoch,
                    self.epochs,
                    report.mean_loss,
                    batches
                );
            }
            reports.push(report);
        }
        self.transition(TrainState::Done);
        Ok(reports)
    }

    /// One forward/loss/backward/update cycle. Returns the batch loss.
    pub fn step<M, L, O>(
        &mut self,
        model: &M,
        loss_fn: &L,
        optimizer: &mut O,
        batch: Batch,
    ) -> Result<f64, NeuraGradError>
    where
        M: Module + ?Sized,
        L: Loss + ?Sized,
        O: Optimizer + ?Sized,
    {
        let Batch { inputs, targets } = batch;

        self.transition(TrainState::Forward);
        let mut graph = Graph::new();
        let input = graph.constant(inputs);
        let output = model.forward(&mut graph, input)?;

        self.transition(TrainState::Loss);
        let loss = loss_fn.forward(&mut graph, output, &targets)?;
        let loss_value = graph.value(loss)?.item()?;
        if !loss_value.is_finite() {
            log::warn!("non-finite batch loss {}", loss_value);
        }

        self.transition(TrainState::Backward);
        graph.backward(loss)?;
        // Release the graph's references to parameter buffers before updating them.
        drop(graph);

        self.transition(TrainState::Update);
        optimizer.step()?;
        optimizer.zero_grad()?;

        self.transition(TrainState::Idle);
        Ok(loss_value)
    }
}

/// Trains `model` for `epochs` epochs and returns the mean loss of each epoch.
pub fn train<M, L, O, S>(
    model: &M,
    loss_fn: &L,
    optimizer: &mut O,
    batch_source: &mut S,
    epochs: usize,
) -> Result<Vec<f64>, NeuraGradError>
where
    M: Module + ?Sized,
    L: Loss + ?Sized,
    O: Optimizer + ?Sized,
    S: BatchSource + ?Sized,
{
    let reports = Trainer::new(epochs)?.run(model, loss_fn, optimizer, batch_source)?;
    Ok(reports.into_iter().map(|r| r.mean_loss).collect())
}

#[cfg(test)]
#[path = "trainer_test.rs"]
mod tests;
