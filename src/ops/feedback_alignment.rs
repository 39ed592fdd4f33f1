//! Feedback Alignment forward/backward rule
//!
//! Forward is the ordinary affine/ReLU stack. Backward computes weight and
//! bias gradients from the per-layer delta exactly as backpropagation would,
//! but carries the delta from layer `i` to layer `i - 1` through the fixed
//! random feedback matrix `F_i` instead of the forward weight `W_i`:
//!
//! ```text
//! δ_{L-1}  = grad_output
//! ∇W_i     = δ_iᵗ · a_i
//! ∇b_i     = Σ_batch δ_i
//! δ_{i-1}  = (δ_i · F_i) ⊙ relu'(z_{i-1})        (i > 0)
//! ```
//!
//! Feedback matrices never receive a gradient. `F_0` is stored but
//! unreachable: nothing propagates below the first layer.

use crate::autograd::{CustomOp, Gradients, LayerGradients, LayerParams};
use crate::error::FaResult;
use crate::ops::{check_grad_output, forward_trace};
use crate::tensor::Tensor;
use tracing::trace;

/// The feedback-alignment differentiation rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackAlignmentOp;

/// State saved by [`FeedbackAlignmentOp::forward`] for one backward call.
///
/// Borrows the layer parameters (weights, biases and feedback matrices) and
/// owns every pre-activation `z_i` and activation `a_i` of the call.
#[derive(Debug)]
pub struct FaContext<'a> {
    layers: &'a [LayerParams],
    pre_activations: Vec<Tensor>,
    activations: Vec<Tensor>,
}

impl<'a> FaContext<'a> {
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Pre-activation `z_i` of layer `i`.
    pub fn pre_activation(&self, i: usize) -> Option<&Tensor> {
        self.pre_activations.get(i)
    }

    /// Activation `a_i`: `a_0` is the input, `a_L` the output.
    pub fn activation(&self, i: usize) -> Option<&Tensor> {
        self.activations.get(i)
    }

    /// The network output `a_L`.
    pub fn output(&self) -> &Tensor {
        // forward_trace always records at least input and one layer output
        &self.activations[self.activations.len() - 1]
    }
}

impl CustomOp for FeedbackAlignmentOp {
    type Context<'a> = FaContext<'a>;

    fn forward<'a>(
        &self,
        input: &Tensor,
        layers: &'a [LayerParams],
    ) -> FaResult<(Tensor, FaContext<'a>)> {
        let recorded = forward_trace(input, layers)?;
        let ctx = FaContext {
            layers,
            pre_activations: recorded.pre_activations,
            activations: recorded.activations,
        };
        Ok((ctx.output().clone(), ctx))
    }

    fn backward(&self, ctx: FaContext<'_>, grad_output: &Tensor) -> FaResult<Gradients> {
        check_grad_output(ctx.output(), grad_output)?;

        let num_layers = ctx.layers.len();
        let mut reversed = Vec::with_capacity(num_layers);
        let mut delta = grad_output.clone();

        for i in (0..num_layers).rev() {
            let weight = delta.matmul_transpose_a(&ctx.activations[i])?;
            let bias = delta.sum_rows()?;

            if i > 0 {
                let feedback = ctx.layers[i].feedback.value();
                delta = delta
                    .matmul(feedback)?
                    .relu_gate(&ctx.pre_activations[i - 1])?;
            }

            trace!(layer = i, grad_shape = ?weight.shape(), "feedback alignment backward");
            reversed.push(LayerGradients {
                weight,
                bias,
                feedback: None,
            });
        }

        reversed.reverse();
        Ok(Gradients {
            input: None,
            layers: reversed,
        })
    }
}
