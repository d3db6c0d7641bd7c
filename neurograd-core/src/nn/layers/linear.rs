use crate::array::Array;
use crate::autograd::{Graph, NodeId};
use crate::error::NeuraGradError;
use crate::nn::init::{fan_in_bound, fan_in_uniform, uniform_};
use crate::nn::module::Module;
use crate::nn::parameter::{write_param, ParamRef, Parameter};
use rand::Rng;

/// Applies a linear transformation to the incoming data: `y = x W^T + b`.
///
/// `weight` has shape `(out_features, in_features)` and `bias` shape
/// `(out_features)`. Both are initialised from
/// `U(-1/sqrt(in_features), 1/sqrt(in_features))`.
#[derive(Debug)]
pub struct Linear {
    weight: ParamRef,
    bias: Option<ParamRef>,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates a new Linear layer.
    ///
    /// # Arguments
    /// * `in_features` - Size of each input sample.
    /// * `out_features` - Size of each output sample.
    /// * `has_bias` - If `true`, the layer will learn an additive bias.
    /// * `rng` - Source of the initial weights; seed it for reproducible runs.
    pub fn new<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
        rng: &mut R,
    ) -> Result<Self, NeuraGradError> {
        if in_features == 0 || out_features == 0 {
            return Err(NeuraGradError::InvalidConfiguration(format!(
                "Linear layer dimensions must be positive, got in={} out={}",
                in_features, out_features
            )));
        }
        let weight = fan_in_uniform(&[out_features, in_features], in_features, rng)?;
        let bias = if has_bias {
            Some(fan_in_uniform(&[out_features], in_features, rng)?)
        } else {
            None
        };
        Linear::from_arrays(weight, bias)
    }

    /// Builds a layer from explicit weights.
    ///
    /// # Errors
    /// `RankMismatch` if `weight` is not 2-D, `ShapeMismatch` if `bias` is not
    /// `(out_features)`.
    pub fn from_arrays(weight: Array, bias: Option<Array>) -> Result<Self, NeuraGradError> {
        let (out_features, in_features) = weight.dims2("Linear weight")?;
        if let Some(b) = bias.as_ref() {
            if b.shape() != [out_features] {
                return Err(NeuraGradError::shape_mismatch(
                    &[out_features],
                    b.shape(),
                    "Linear bias",
                ));
            }
        }
        Ok(Linear {
            weight: Parameter::new(weight, Some("weight".to_string())).into_ref(),
            bias: bias.map(|b| Parameter::new(b, Some("bias".to_string())).into_ref()),
            in_features,
            out_features,
        })
    }

    /// Re-draws weight and bias from the fan-in uniform distribution.
    pub fn reset_parameters<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(), NeuraGradError> {
        let bound = fan_in_bound(self.in_features)?;
        uniform_(&mut *write_param(&self.weight)?, bound, rng)?;
        if let Some(bias) = self.bias.as_ref() {
            uniform_(&mut *write_param(bias)?, bound, rng)?;
        }
        Ok(())
    }

    pub fn weight(&self) -> &ParamRef {
        &self.weight
    }

    pub fn bias(&self) -> Option<&ParamRef> {
        self.bias.as_ref()
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    /// `input` must be `(batch, in_features)`; the output is `(batch, out_features)`.
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, NeuraGradError> {
        let shape = graph.value(input)?.shape().to_vec();
        match shape.as_slice() {
            [_, features] if *features == self.in_features => {}
            [batch, _] => {
                return Err(NeuraGradError::shape_mismatch(
                    &[*batch, self.in_features],
                    &shape,
                    "linear",
                ))
            }
            _ => return Err(NeuraGradError::rank_mismatch(2, shape.len(), "linear")),
        }

        let weight = graph.parameter(&self.weight)?;
        let weight_t = graph.transpose(weight)?;
        let mut output = graph.matmul(input, weight_t)?;
        if let Some(bias) = self.bias.as_ref() {
            let bias = graph.parameter(bias)?;
            output = graph.add_bias(output, bias)?;
        }
        log::trace!(
            "linear {}->{} on batch of {}",
            self.in_features,
            self.out_features,
            shape[0]
        );
        Ok(output)
    }

    fn parameters(&self) -> Vec<ParamRef> {
        let mut params = vec![self.weight.clone()];
        if let Some(bias) = self.bias.as_ref() {
            params.push(bias.clone());
        }
        params
    }

    fn named_parameters(&self) -> Vec<(String, ParamRef)> {
        let mut params = vec![("weight".to_string(), self.weight.clone())];
        if let Some(bias) = self.bias.as_ref() {
            params.push(("bias".to_string(), bias.clone()));
        }
        params
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
