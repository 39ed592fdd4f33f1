//! Exact backpropagation over the same layer stack
//!
//! Kept as a reference rule: given identical parameters it shares the
//! forward pass and output-layer gradients with [`FeedbackAlignmentOp`],
//! and differs only in carrying the delta through `W_i` instead of `F_i`.
//!
//! [`FeedbackAlignmentOp`]: crate::ops::FeedbackAlignmentOp

use crate::autograd::{CustomOp, Gradients, LayerGradients, LayerParams};
use crate::error::FaResult;
use crate::ops::{check_grad_output, forward_trace, ForwardTrace};
use crate::tensor::Tensor;

/// The standard chain-rule differentiation rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackpropOp;

/// State saved by [`BackpropOp::forward`].
#[derive(Debug)]
pub struct BackpropContext<'a> {
    layers: &'a [LayerParams],
    recorded: ForwardTrace,
}

impl CustomOp for BackpropOp {
    type Context<'a> = BackpropContext<'a>;

    fn forward<'a>(
        &self,
        input: &Tensor,
        layers: &'a [LayerParams],
    ) -> FaResult<(Tensor, BackpropContext<'a>)> {
        let recorded = forward_trace(input, layers)?;
        let output = recorded.activations[layers.len()].clone();
        Ok((output, BackpropContext { layers, recorded }))
    }

    fn backward(&self, ctx: BackpropContext<'_>, grad_output: &Tensor) -> FaResult<Gradients> {
        let num_layers = ctx.layers.len();
        check_grad_output(&ctx.recorded.activations[num_layers], grad_output)?;

        let mut reversed = Vec::with_capacity(num_layers);
        let mut delta = grad_output.clone();

        for i in (0..num_layers).rev() {
            let weight = delta.matmul_transpose_a(&ctx.recorded.activations[i])?;
            let bias = delta.sum_rows()?;

            if i > 0 {
                delta = delta
                    .matmul(ctx.layers[i].weight.value())?
                    .relu_gate(&ctx.recorded.pre_activations[i - 1])?;
            }

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
