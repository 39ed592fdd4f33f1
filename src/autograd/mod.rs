//! Custom differentiation seam
//!
//! The network does not derive its backward pass from the forward graph.
//! Instead each differentiation rule is a [`CustomOp`]: an explicit
//! forward/backward pair where the forward call hands back a context
//! object holding exactly what the backward call needs.
//!
//! The context is consumed by `backward`, so saved activations are
//! single-use, and it borrows the layer parameters, so they cannot be
//! mutated while a forward/backward pair is in flight.
//!
//! # Example
//!
//! ```ignore
//! use feedback_alignment::autograd::CustomOp;
//! use feedback_alignment::ops::FeedbackAlignmentOp;
//!
//! let op = FeedbackAlignmentOp;
//! let (output, ctx) = op.forward(&input, network.layers())?;
//! let grads = op.backward(ctx, &grad_output)?;
//! assert!(grads.layers[0].feedback.is_none());
//! ```

mod parameter;

pub use parameter::{LayerParams, Parameter};

use crate::error::FaResult;
use crate::tensor::Tensor;

/// A forward/backward pair that replaces the default chain rule for a subgraph.
pub trait CustomOp {
    /// Tensors saved by `forward` for the matching `backward` call.
    type Context<'a>;

    /// Run the forward computation and capture the backward context.
    fn forward<'a>(
        &self,
        input: &Tensor,
        layers: &'a [LayerParams],
    ) -> FaResult<(Tensor, Self::Context<'a>)>;

    /// Consume the context and produce parameter gradients.
    fn backward(&self, ctx: Self::Context<'_>, grad_output: &Tensor) -> FaResult<Gradients>;
}

/// Gradients for one layer's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradients {
    pub weight: Tensor,
    pub bias: Tensor,
    /// Always `None` under feedback alignment: the feedback matrix is fixed.
    pub feedback: Option<Tensor>,
}

/// Result of a backward call.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    /// Gradient for the network input; not computed (`None`) by the rules in this crate.
    pub input: Option<Tensor>,
    /// Per-layer gradients, indexed like the network's layers.
    pub layers: Vec<LayerGradients>,
}

impl Gradients {
    /// Gradient for the parameter called `name` (`weights.{i}`, `biases.{i}`, `feedback.{i}`).
    ///
    /// Returns `None` for fixed parameters and unknown names.
    pub fn get(&self, name: &str) -> Option<&Tensor> {
        let (kind, index) = name.split_once('.')?;
        let layer = self.layers.get(index.parse::<usize>().ok()?)?;
        match kind {
            "weights" => Some(&layer.weight),
            "biases" => Some(&layer.bias),
            "feedback" => layer.feedback.as_ref(),
            _ => None,
        }
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Gradients {
        Gradients {
            input: None,
            layers: vec![LayerGradients {
                weight: Tensor::filled(&[2, 3], 1.0),
                bias: Tensor::filled(&[2], 2.0),
                feedback: None,
            }],
        }
    }

    #[test]
    fn test_get_by_name() {
        let grads = sample();
        assert_eq!(grads.get("weights.0").unwrap().shape(), &[2, 3]);
        assert_eq!(grads.get("biases.0").unwrap().as_slice(), &[2.0, 2.0]);
        assert!(grads.get("feedback.0").is_none());
    }

    #[test]
    fn test_get_unknown_names() {
        let grads = sample();
        assert!(grads.get("weights.1").is_none());
        assert!(grads.get("weights").is_none());
        assert!(grads.get("momentum.0").is_none());
        assert!(grads.get("weights.x").is_none());
    }
}
