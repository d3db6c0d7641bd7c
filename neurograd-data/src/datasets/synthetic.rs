use super::array_dataset::ArrayDataset;
use neurograd_core::{Array, NeuraGradError};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Isotropic Gaussian clusters, one per center, labelled by center index.
///
/// Samples are laid out class by class: the first `samples_per_class` rows
/// belong to class 0, and so on. Shuffle with a `RandomSampler` when batching.
///
/// # Errors
/// `InvalidConfiguration` if there are no centers, centers have differing or
/// zero dimensions, `samples_per_class` is zero, or `std_dev` is not positive
/// and finite.
pub fn make_blobs<R: Rng + ?Sized>(
    centers: &[Vec<f64>],
    samples_per_class: usize,
    std_dev: f64,
    rng: &mut R,
) -> Result<ArrayDataset, NeuraGradError> {
    let dim = centers.first().map_or(0, |c| c.len());
    if dim == 0 || centers.iter().any(|c| c.len() != dim) {
        return Err(NeuraGradError::InvalidConfiguration(
            "make_blobs needs at least one center and all centers must share a positive dimension"
                .to_string(),
        ));
    }
    if samples_per_class == 0 {
        return Err(NeuraGradError::InvalidConfiguration(
            "samples_per_class must be positive".to_string(),
        ));
    }
    if !(std_dev.is_finite() && std_dev > 0.0) {
        return Err(NeuraGradError::InvalidConfiguration(format!(
            "std_dev must be positive and finite, got {}",
            std_dev
        )));
    }
    let noise = Normal::new(0.0, std_dev).map_err(|e| {
        NeuraGradError::InvalidConfiguration(format!("invalid std_dev {}: {}", std_dev, e))
    })?;

    let total = centers.len() * samples_per_class;
    let mut features = Vec::with_capacity(total * dim);
    let mut labels = Vec::with_capacity(total);
    for (class, center) in centers.iter().enumerate() {
        for _ in 0..samples_per_class {
            features.extend(center.iter().map(|&c| c + noise.sample(rng)));
            labels.push(class);
        }
    }
    log::debug!(
        "make_blobs: {} samples, {} features, {} classes",
        total,
        dim,
        centers.len()
    );
    ArrayDataset::new(Array::new(features, vec![total, dim])?, labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::Dataset;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_make_blobs_layout() -> Result<(), NeuraGradError> {
        let mut rng = StdRng::seed_from_u64(0);
        let centers = vec![vec![-2.0, 0.0], vec![2.0, 0.0], vec![0.0, 3.0]];
        let dataset = make_blobs(&centers, 10, 0.1, &mut rng)?;
        assert_eq!(dataset.len(), 30);
        assert_eq!(dataset.num_features(), 2);
        assert_eq!(dataset.num_classes(), 3);
        let (row, label) = dataset.get(15)?;
        assert_eq!(label, 1);
        assert!((row[0] - 2.0).abs() < 1.0);
        Ok(())
    }

    #[test]
    fn test_make_blobs_clusters_around_centers() -> Result<(), NeuraGradError> {
        let mut rng = StdRng::seed_from_u64(21);
        let centers = vec![vec![-3.0, 1.0], vec![4.0, -2.0]];
        let dataset = make_blobs(&centers, 2000, 0.5, &mut rng)?;
        for (class, center) in centers.iter().enumerate() {
            let rows: Vec<&[f64]> = dataset
                .features()
                .data()
                .chunks(2)
                .zip(dataset.labels())
                .filter(|(_, &l)| l == class)
                .map(|(row, _)| row)
                .collect();
            assert_eq!(rows.len(), 2000);
            for (axis, &c) in center.iter().enumerate() {
                let mean = rows.iter().map(|r| r[axis]).sum::<f64>() / rows.len() as f64;
                assert_abs_diff_eq!(mean, c, epsilon = 0.1);
            }
        }
        Ok(())
    }

    #[test]
    fn test_make_blobs_is_seeded() -> Result<(), NeuraGradError> {
        let centers = vec![vec![0.0], vec![5.0]];
        let a = make_blobs(&centers, 4, 1.0, &mut StdRng::seed_from_u64(3))?;
        let b = make_blobs(&centers, 4, 1.0, &mut StdRng::seed_from_u64(3))?;
        assert_eq!(a.features(), b.features());
        Ok(())
    }

    #[test]
    fn test_make_blobs_rejects_bad_config() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(make_blobs(&[], 4, 1.0, &mut rng).is_err());
        assert!(make_blobs(&[vec![0.0], vec![1.0, 2.0]], 4, 1.0, &mut rng).is_err());
        assert!(make_blobs(&[vec![0.0]], 0, 1.0, &mut rng).is_err());
        assert!(make_blobs(&[vec![0.0]], 4, 0.0, &mut rng).is_err());
        assert!(make_blobs(&[vec![0.0]], 4, f64::NAN, &mut rng).is_err());
    }
}
