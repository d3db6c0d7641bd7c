//! # Entraînement d'un MLP sur des nuages de points synthétiques
//!
//! 1. Génère trois classes gaussiennes avec `make_blobs`.
//! 2. Les découpe en mini-batches mélangés via `DataLoader` + `RandomSampler`.
//! 3. Construit un MLP `[2, 16, 3]` avec `build_model` et l'entraîne par SGD.
//!
//! ## Exécution
//! `RUST_LOG=info cargo run --example train_mlp`

use neurograd_core::nn::NLLLoss;
use neurograd_core::train::accuracy;
use neurograd_core::{build_model, Module, NeuraGradError, SgdOptimizer, TrainConfig, Trainer};
use neurograd_data::{make_blobs, DataLoader, RandomSampler};

fn main() -> Result<(), NeuraGradError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrainConfig::new(40, 0.1).with_seed(42).with_log_every(10);
    let mut rng = config.rng();

    let centers = vec![vec![-2.0, 0.0], vec![2.0, 0.0], vec![0.0, 2.5]];
    let dataset = make_blobs(&centers, 100, 0.6, &mut rng)?;
    let eval = dataset.as_batch();

    let model = build_model(&[dataset.num_features(), 16, dataset.num_classes()], &mut rng)?;
    let mut optimizer = SgdOptimizer::from_config(model.parameters(), &config)?;
    let mut loader = DataLoader::new(dataset, 32, RandomSampler::new(config.seed), false)?;
    println!("{} batches per epoch", loader.num_batches());

    let mut trainer = Trainer::from_config(&config)?;
    let reports = trainer.run(&model, &NLLLoss::new(), &mut optimizer, &mut loader)?;
    for report in reports.iter().filter(|r| r.epoch % 10 == 0) {
        println!("epoch {:>3}: loss {:.4}", report.epoch, report.mean_loss);
    }

    let acc = accuracy(&model, &eval.inputs, &eval.targets)?;
    println!("training accuracy: {:.1}%", acc * 100.0);
    Ok(())
}
