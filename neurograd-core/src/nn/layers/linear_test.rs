use super::*;
use crate::error::ErrorKind;
use crate::nn::parameter::read_param;
use crate::utils::testing::check_array_near;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_linear_creation() -> Result<(), NeuraGradError> {
    let mut rng = StdRng::seed_from_u64(0);
    let linear = Linear::new(784, 128, true, &mut rng)?;
    assert_eq!(linear.in_features(), 784);
    assert_eq!(linear.out_features(), 128);
    assert_eq!(read_param(linear.weight())?.shape(), &[128, 784]);
    let bias = linear.bias().ok_or(NeuraGradError::GradientNotAllocated { id: 0 })?;
    assert_eq!(read_param(bias)?.shape(), &[128]);

    let bound = 1.0 / 28.0;
    assert!(read_param(linear.weight())?
        .value()
        .data()
        .iter()
        .all(|v| v.abs() <= bound));
    Ok(())
}

#[test]
fn test_linear_parameters() -> Result<(), NeuraGradError> {
    let mut rng = StdRng::seed_from_u64(0);
    let with_bias = Linear::new(3, 2, true, &mut rng)?;
    assert_eq!(with_bias.parameters().len(), 2);
    let names: Vec<String> = with_bias.named_parameters().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["weight", "bias"]);

    let no_bias = Linear::new(3, 2, false, &mut rng)?;
    assert_eq!(no_bias.parameters().len(), 1);
    assert!(no_bias.bias().is_none());
    Ok(())
}

#[test]
fn test_linear_rejects_empty_dimensions() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = Linear::new(0, 4, true, &mut rng).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
}

#[test]
fn test_linear_forward_with_bias_batch() -> Result<(), NeuraGradError> {
    let weight = Array::new(vec![1.0, 0.0, -1.0, 2.0, 1.0, 0.5], vec![2, 3])?;
    let bias = Array::new(vec![0.5, -1.0], vec![2])?;
    let linear = Linear::from_arrays(weight, Some(bias))?;

    let mut graph = Graph::new();
    let x = graph.constant(Array::new(vec![1.0, 2.0, 3.0, 0.0, -1.0, 4.0], vec![2, 3])?);
    let y = linear.forward(&mut graph, x)?;
    // row 0: [1 - 3, 2 + 2 + 1.5] + b; row 1: [0 - 4, -1 + 2] + b
    check_array_near(graph.value(y)?, &[2, 2], &[-1.5, 4.5, -3.5, 0.0], 1e-12);
    Ok(())
}

#[test]
fn test_linear_forward_shape_contract() -> Result<(), NeuraGradError> {
    let mut rng = StdRng::seed_from_u64(3);
    let linear = Linear::new(784, 128, true, &mut rng)?;
    let mut graph = Graph::no_grad();

    let x = graph.constant(Array::zeros(&[64, 784])?);
    let y = linear.forward(&mut graph, x)?;
    assert_eq!(graph.value(y)?.shape(), &[64, 128]);

    let bad = graph.constant(Array::zeros(&[64, 100])?);
    let err = linear.forward(&mut graph, bad).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    assert_eq!(
        err,
        NeuraGradError::ShapeMismatch {
            expected: vec![64, 784],
            actual: vec![64, 100],
            operation: "linear".to_string(),
        }
    );
    Ok(())
}

#[test]
fn test_linear_backward_batch() -> Result<(), NeuraGradError> {
    let weight = Array::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?;
    let bias = Array::new(vec![0.0, 0.0], vec![2])?;
    let linear = Linear::from_arrays(weight, Some(bias))?;

    let mut graph = Graph::new();
    let x = graph.constant(Array::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2])?);
    let y = linear.forward(&mut graph, x)?;
    // Use a simple sum as the pseudo-loss for testing backward pass
    let loss = graph.sum(y)?;
    graph.backward(loss)?;

    // dW[o, i] = sum_b x[b, i]; db[o] = batch
    let w_grad = read_param(linear.weight())?.grad().cloned();
    check_array_near(
        w_grad.as_ref().ok_or(NeuraGradError::GradientNotAllocated { id: 0 })?,
        &[2, 2],
        &[9.0, 12.0, 9.0, 12.0],
        1e-12,
    );
    let bias_param = linear.bias().ok_or(NeuraGradError::GradientNotAllocated { id: 1 })?;
    let b_grad = read_param(bias_param)?.grad().cloned();
    check_array_near(
        b_grad.as_ref().ok_or(NeuraGradError::GradientNotAllocated { id: 1 })?,
        &[2],
        &[3.0, 3.0],
        1e-12,
    );
    Ok(())
}

#[test]
fn test_reset_parameters_is_seeded() -> Result<(), NeuraGradError> {
    let a = Linear::new(4, 3, true, &mut StdRng::seed_from_u64(11))?;
    let b = Linear::new(4, 3, true, &mut StdRng::seed_from_u64(99))?;
    b.reset_parameters(&mut StdRng::seed_from_u64(11))?;
    assert_eq!(
        read_param(a.weight())?.value(),
        read_param(b.weight())?.value()
    );
    Ok(())
}
