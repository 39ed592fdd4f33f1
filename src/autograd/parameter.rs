//! Named parameters with a trainable/fixed flag

use crate::tensor::Tensor;

/// A named tensor owned by a model.
///
/// Only parameters with `trainable == true` are ever handed to an optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    value: Tensor,
    trainable: bool,
}

impl Parameter {
    /// Parameter that receives gradient updates.
    pub fn trainable(name: impl Into<String>, value: Tensor) -> Self {
        Self {
            name: name.into(),
            value,
            trainable: true,
        }
    }

    /// Parameter that participates in computation but is never updated.
    pub fn fixed(name: impl Into<String>, value: Tensor) -> Self {
        Self {
            name: name.into(),
            value,
            trainable: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Tensor {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut Tensor {
        &mut self.value
    }

    pub fn is_trainable(&self) -> bool {
        self.trainable
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }
}

/// Parameters of one affine layer plus its feedback matrix.
///
/// `weight` and `feedback` are both `(out, in)`; `bias` is `(out)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerParams {
    pub weight: Parameter,
    pub bias: Parameter,
    pub feedback: Parameter,
}

impl LayerParams {
    pub fn input_size(&self) -> usize {
        self.weight.shape().get(1).copied().unwrap_or(0)
    }

    pub fn output_size(&self) -> usize {
        self.weight.shape().first().copied().unwrap_or(0)
    }

    /// The three parameters in weight, bias, feedback order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        [&self.weight, &self.bias, &self.feedback].into_iter()
    }
}
