use crate::array::Array;
use crate::autograd::grad_check::{check_grad, GradCheckError};
use crate::autograd::graph::Graph;
use crate::autograd::node::NodeId;
use crate::error::{ErrorKind, NeuraGradError};
use crate::utils::testing::check_array_near;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPSILON: f64 = 1e-6;
const TOLERANCE: f64 = 1e-4;

fn upstream(shape: &[usize]) -> Result<Array, NeuraGradError> {
    // Non-uniform weights so every output element is probed differently.
    let numel: usize = shape.iter().product();
    let data = (0..numel).map(|i| 0.3 + 0.1 * i as f64).collect();
    Array::new(data, shape.to_vec())
}

/// Inputs drawn from `U(-2, 2)`; each test seeds its own generator.
fn random(shape: &[usize], rng: &mut StdRng) -> Result<Array, NeuraGradError> {
    Array::uniform(shape, 2.0, rng)
}

#[test]
fn test_matmul_grad() -> Result<(), GradCheckError> {
    let mut rng = StdRng::seed_from_u64(101);
    let a = random(&[2, 3], &mut rng)?;
    let b = random(&[3, 2], &mut rng)?;
    let func = |g: &mut Graph, ids: &[NodeId]| g.matmul(ids[0], ids[1]);
    check_grad(func, &[a, b], &upstream(&[2, 2])?, EPSILON, TOLERANCE)
}

#[test]
fn test_linear_composition_grad() -> Result<(), GradCheckError> {
    // X . W^T + b, the exact sequence recorded by a linear layer.
    let mut rng = StdRng::seed_from_u64(102);
    let x = random(&[2, 3], &mut rng)?;
    let w = random(&[4, 3], &mut rng)?;
    let b = random(&[4], &mut rng)?;
    let func = |g: &mut Graph, ids: &[NodeId]| {
        let wt = g.transpose(ids[1])?;
        let y = g.matmul(ids[0], wt)?;
        g.add_bias(y, ids[2])
    };
    check_grad(func, &[x, w, b], &upstream(&[2, 4])?, EPSILON, TOLERANCE)
}

#[test]
fn test_add_bias_grad() -> Result<(), GradCheckError> {
    let mut rng = StdRng::seed_from_u64(103);
    let x = random(&[3, 2], &mut rng)?;
    let b = random(&[2], &mut rng)?;
    let func = |g: &mut Graph, ids: &[NodeId]| g.add_bias(ids[0], ids[1]);
    check_grad(func, &[x, b], &upstream(&[3, 2])?, EPSILON, TOLERANCE)
}

#[test]
fn test_relu_grad() -> Result<(), GradCheckError> {
    // Pushed at least 0.1 away from the kink at zero.
    let mut rng = StdRng::seed_from_u64(104);
    let x = random(&[3, 4], &mut rng)?.map(|v| v + 0.1 * v.signum());
    let func = |g: &mut Graph, ids: &[NodeId]| g.relu(ids[0]);
    check_grad(func, &[x], &upstream(&[3, 4])?, EPSILON, TOLERANCE)
}

#[test]
fn test_log_softmax_grad() -> Result<(), GradCheckError> {
    let mut rng = StdRng::seed_from_u64(105);
    let x = random(&[3, 4], &mut rng)?;
    let func = |g: &mut Graph, ids: &[NodeId]| g.log_softmax(ids[0]);
    check_grad(func, &[x], &upstream(&[3, 4])?, EPSILON, TOLERANCE)
}

#[test]
fn test_nll_loss_grad() -> Result<(), GradCheckError> {
    let mut rng = StdRng::seed_from_u64(106);
    let logp = random(&[4, 3], &mut rng)?.map(|v| -v.abs());
    let targets: Vec<usize> = (0..4).map(|_| rng.gen_range(0..3)).collect();
    let func = |g: &mut Graph, ids: &[NodeId]| g.nll_loss(ids[0], &targets);
    check_grad(func, &[logp], &Array::scalar(1.0), EPSILON, TOLERANCE)
}

#[test]
fn test_log_softmax_then_nll_grad() -> Result<(), GradCheckError> {
    let mut rng = StdRng::seed_from_u64(107);
    let logits = random(&[3, 3], &mut rng)?;
    let targets: Vec<usize> = (0..3).map(|_| rng.gen_range(0..3)).collect();
    let func = |g: &mut Graph, ids: &[NodeId]| {
        let logp = g.log_softmax(ids[0])?;
        g.nll_loss(logp, &targets)
    };
    check_grad(func, &[logits], &Array::scalar(1.0), EPSILON, TOLERANCE)
}

#[test]
fn test_cross_entropy_grad() -> Result<(), GradCheckError> {
    let mut rng = StdRng::seed_from_u64(108);
    let logits = random(&[2, 3], &mut rng)?;
    let targets: Vec<usize> = (0..2).map(|_| rng.gen_range(0..3)).collect();
    let func = |g: &mut Graph, ids: &[NodeId]| g.cross_entropy(ids[0], &targets);
    check_grad(func, &[logits], &Array::scalar(2.5), EPSILON, TOLERANCE)
}

#[test]
fn test_cross_entropy_matches_unfused() -> Result<(), NeuraGradError> {
    let logits = Array::new(vec![0.3, -0.2, 1.5, 0.0, 0.9, -1.1], vec![2, 3])?;
    let targets = [1, 2];

    let mut fused = Graph::new();
    let x = fused.leaf(logits.clone());
    let loss = fused.cross_entropy(x, &targets)?;
    fused.backward(loss)?;

    let mut plain = Graph::new();
    let y = plain.leaf(logits);
    let logp = plain.log_softmax(y)?;
    let loss2 = plain.nll_loss(logp, &targets)?;
    plain.backward(loss2)?;

    let expected = plain.value(loss2)?.item()?;
    approx::assert_abs_diff_eq!(fused.value(loss)?.item()?, expected, epsilon = 1e-12);
    let expected_grad = plain.require_grad(y)?.data().to_vec();
    check_array_near(fused.require_grad(x)?, &[2, 3], &expected_grad, 1e-12);
    Ok(())
}

#[test]
fn test_sum_grad() -> Result<(), GradCheckError> {
    let x = random(&[2, 2], &mut StdRng::seed_from_u64(109))?;
    let func = |g: &mut Graph, ids: &[NodeId]| g.sum(ids[0]);
    check_grad(func, &[x], &Array::scalar(-0.5), EPSILON, TOLERANCE)
}

#[test]
fn test_nll_loss_value() -> Result<(), NeuraGradError> {
    let mut g = Graph::new();
    let logp = g.constant(Array::new(vec![-0.5, -1.5, -2.0, -0.25], vec![2, 2])?);
    let loss = g.nll_loss(logp, &[1, 0])?;
    approx::assert_abs_diff_eq!(g.value(loss)?.item()?, (1.5 + 2.0) / 2.0, epsilon = 1e-12);
    assert!(g.value(loss)?.is_scalar());
    Ok(())
}

#[test]
fn test_nll_loss_target_out_of_range() -> Result<(), NeuraGradError> {
    let mut g = Graph::new();
    let logp = g.leaf(Array::zeros(&[2, 3])?);
    let err = g.nll_loss(logp, &[0, 3]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(
        err,
        NeuraGradError::TargetOutOfRange {
            index: 1,
            target: 3,
            classes: 3
        }
    );
    Ok(())
}

#[test]
fn test_loss_target_count_mismatch() -> Result<(), NeuraGradError> {
    let mut g = Graph::new();
    let logits = g.leaf(Array::zeros(&[2, 3])?);
    let err = g.cross_entropy(logits, &[0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    let err = g.cross_entropy(logits, &[0, 5]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    Ok(())
}

#[test]
fn test_op_parents_and_names() {
    use crate::autograd::backward_op::Op;
    let op = Op::MatMul {
        a: NodeId(0),
        b: NodeId(1),
    };
    assert_eq!(op.parents(), vec![NodeId(0), NodeId(1)]);
    assert_eq!(op.name(), "matmul");
    let op = Op::NllLoss {
        logp: NodeId(4),
        targets: vec![0],
    };
    assert_eq!(op.parents(), vec![NodeId(4)]);
}
