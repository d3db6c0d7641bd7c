// dataloader.rs
//! # DataLoader
//!
//! Le module `DataLoader` découpe un dataset en mini-batches prêts pour la
//! boucle d'entraînement de `neurograd-core`.
//!
//! ## Exemple d'utilisation basique
//!
//! ```rust
//! use neurograd_core::{Array, BatchSource};
//! use neurograd_data::datasets::ArrayDataset;
//! use neurograd_data::samplers::SequentialSampler;
//! use neurograd_data::DataLoader;
//!
//! let features = Array::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], vec![3, 2]).unwrap();
//! let dataset = ArrayDataset::new(features, vec![0, 1, 0]).unwrap();
//! let mut loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false).unwrap();
//! for batch in loader.batches() {
//!     let batch = batch.expect("Pas d'erreur attendue");
//!     println!("Batch : {:?}", batch.targets);
//! }
//! ```
//!
//! ## Fonctionnalités principales
//!
//! - Batching automatique des données
//! - Sampling flexible via le trait `Sampler`, un nouvel ordre à chaque epoch
//! - Option pour ignorer le dernier batch incomplet (`drop_last`)

use crate::datasets::Dataset;
use crate::samplers::Sampler;
use neurograd_core::{Array, Batch, BatchSource, NeuraGradError};

/// DataLoader générique pour le batching et le sampling de données.
///
/// # Paramètres de type
/// - `D`: Le dataset, dont chaque item est `(features, label)`.
/// - `S`: Le sampler utilisé pour générer les indices de chaque epoch.
#[derive(Debug)]
pub struct DataLoader<D, S> {
    dataset: D,
    batch_size: usize,
    sampler: S,
    drop_last: bool,
}

impl<D, S> DataLoader<D, S>
where
    D: Dataset<Item = (Vec<f64>, usize)>,
    S: Sampler,
{
    /// Crée un nouveau DataLoader.
    ///
    /// # Errors
    /// `InvalidConfiguration` si `batch_size` vaut zéro.
    pub fn new(dataset: D, batch_size: usize, sampler: S, drop_last: bool) -> Result<Self, NeuraGradError> {
        if batch_size == 0 {
            return Err(NeuraGradError::InvalidConfiguration(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(DataLoader {
            dataset,
            batch_size,
            sampler,
            drop_last,
        })
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Nombre de batches produits par epoch.
    pub fn num_batches(&self) -> usize {
        let n = self.sampler.len(self.dataset.len());
        if self.drop_last {
            n / self.batch_size
        } else {
            n.div_ceil(self.batch_size)
        }
    }
}

/// Empile les items en une matrice `(rows, features)` et leurs labels.
fn collate<D>(dataset: &D, indices: &[usize]) -> Result<Batch, NeuraGradError>
where
    D: Dataset<Item = (Vec<f64>, usize)>,
{
    let mut data = Vec::new();
    let mut targets = Vec::with_capacity(indices.len());
    let mut width = None;
    for &idx in indices {
        let (row, label) = dataset.get(idx)?;
        match width {
            None => width = Some(row.len()),
            Some(w) if w != row.len() => {
                return Err(NeuraGradError::ShapeMismatch {
                    expected: vec![w],
                    actual: vec![row.len()],
                    operation: "collate".to_string(),
                })
            }
            Some(_) => {}
        }
        data.extend(row);
        targets.push(label);
    }
    let inputs = Array::new(data, vec![targets.len(), width.unwrap_or(0)])?;
    Batch::new(inputs, targets)
}

impl<D, S> BatchSource for DataLoader<D, S>
where
    D: Dataset<Item = (Vec<f64>, usize)>,
    S: Sampler,
{
    /// Une epoch : le sampler fixe l'ordre, puis les indices sont découpés en batches.
    fn batches(&mut self) -> Box<dyn Iterator<Item = Result<Batch, NeuraGradError>> + '_> {
        let indices: Vec<usize> = self.sampler.iter(self.dataset.len()).collect();
        let batch_size = self.batch_size;
        let drop_last = self.drop_last;
        let chunks: Vec<Vec<usize>> = indices
            .chunks(batch_size)
            .filter(|chunk| !drop_last || chunk.len() == batch_size)
            .map(|chunk| chunk.to_vec())
            .collect();
        log::trace!("dataloader epoch: {} batches of up to {}", chunks.len(), batch_size);

        let dataset = &self.dataset;
        Box::new(chunks.into_iter().map(move |chunk| collate(dataset, &chunk)))
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
