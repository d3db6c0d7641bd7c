use crate::array::Array;
use crate::autograd::Graph;
use crate::error::NeuraGradError;
use crate::nn::Module;

/// Class probabilities for `input`, i.e. `exp` of the model's log-softmax output.
///
/// Runs on a gradient-disabled graph: nothing is recorded for backward and
/// parameter gradients are left untouched.
pub fn predict<M: Module + ?Sized>(model: &M, input: &Array) -> Result<Array, NeuraGradError> {
    let mut graph = Graph::no_grad();
    let x = graph.constant(input.clone());
    let output = model.forward(&mut graph, x)?;
    Ok(graph.value(output)?.exp())
}

/// Most probable class per row. Ties resolve to the lowest class index.
pub fn predict_classes<M: Module + ?Sized>(
    model: &M,
    input: &Array,
) -> Result<Vec<usize>, NeuraGradError> {
    predict(model, input)?.argmax_rows()
}

/// Fraction of rows whose predicted class equals the label.
pub fn accuracy<M: Module + ?Sized>(
    model: &M,
    input: &Array,
    labels: &[usize],
) -> Result<f64, NeuraGradError> {
    let predicted = predict_classes(model, input)?;
    if predicted.len() != labels.len() {
        return Err(NeuraGradError::shape_mismatch(
            &[predicted.len()],
            &[labels.len()],
            "accuracy",
        ));
    }
    let correct = predicted
        .iter()
        .zip(labels.iter())
        .filter(|(p, l)| p == l)
        .count();
    Ok(correct as f64 / labels.len() as f64)
}
