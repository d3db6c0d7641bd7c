// neurograd-data/src/samplers/random_sampler.rs

use super::traits::Sampler;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A sampler that visits every index once per epoch in a shuffled order.
///
/// The generator is seeded at construction and advances each epoch, so the
/// sequence of epoch orders is fully determined by the seed.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    seed: u64,
    rng: StdRng,
}

impl RandomSampler {
    /// Creates a new `RandomSampler` seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        RandomSampler {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewinds the generator so the next epoch replays the first one.
    pub fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}

impl Sampler for RandomSampler {
    fn iter(&mut self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        let mut indices: Vec<usize> = (0..dataset_len).collect();
        indices.shuffle(&mut self.rng);
        Box::new(indices.into_iter())
    }

    fn len(&self, dataset_len: usize) -> usize {
        dataset_len
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
