//! Differentiation rules for the layered affine/ReLU stack
//!
//! Both rules share one forward pass: `z_i = a_i · W_iᵗ + b_i`, with ReLU on
//! every layer except the last. They differ only in the matrix used to carry
//! the error signal from layer `i` back to layer `i - 1`:
//!
//! - [`FeedbackAlignmentOp`]: the fixed feedback matrix `F_i`
//! - [`BackpropOp`]: the forward weight `W_i` (the exact chain rule)

pub mod backprop;
pub mod feedback_alignment;

pub use backprop::BackpropOp;
pub use feedback_alignment::{FaContext, FeedbackAlignmentOp};

use crate::autograd::LayerParams;
use crate::error::{FaError, FaResult};
use crate::tensor::Tensor;
use tracing::trace;

/// Activations and pre-activations recorded by the shared forward pass.
#[derive(Debug, Clone)]
pub(crate) struct ForwardTrace {
    /// `z_0 .. z_{L-1}`
    pub pre_activations: Vec<Tensor>,
    /// `a_0 .. a_L`; `a_0` is the input, `a_L` the network output.
    pub activations: Vec<Tensor>,
}

/// Check that the input and every layer's tensors chain correctly.
///
/// Runs before any arithmetic so a bad layer never yields partial results.
pub(crate) fn validate_layers(input: &Tensor, layers: &[LayerParams]) -> FaResult<()> {
    if layers.is_empty() {
        return Err(FaError::config("at least one layer is required"));
    }

    let (_, mut width) = input.dims2()?;
    for (i, layer) in layers.iter().enumerate() {
        let (out, inp) = layer.weight.value().dims2()?;
        if out == 0 || inp == 0 {
            return Err(FaError::config(format!(
                "layer {} weight must have positive dimensions, got [{}, {}]",
                i, out, inp
            )));
        }
        if inp != width {
            return Err(FaError::shape(
                format!("layer {} weight", i),
                &[out, width],
                &[out, inp],
            ));
        }
        if layer.bias.shape() != [out] {
            return Err(FaError::shape(
                format!("layer {} bias", i),
                &[out],
                layer.bias.shape(),
            ));
        }
        if layer.feedback.shape() != [out, inp] {
            return Err(FaError::shape(
                format!("layer {} feedback", i),
                &[out, inp],
                layer.feedback.shape(),
            ));
        }
        width = out;
    }
    Ok(())
}

/// Forward pass shared by every rule: affine + ReLU on hidden layers, affine only on the last.
pub(crate) fn forward_trace(input: &Tensor, layers: &[LayerParams]) -> FaResult<ForwardTrace> {
    validate_layers(input, layers)?;

    let last = layers.len() - 1;
    let mut pre_activations = Vec::with_capacity(layers.len());
    let mut activations = Vec::with_capacity(layers.len() + 1);
    activations.push(input.clone());

    for (i, layer) in layers.iter().enumerate() {
        let a = &activations[i];
        let z = a
            .matmul_transpose_b(layer.weight.value())?
            .add_row_broadcast(layer.bias.value())?;
        let next = if i < last { z.relu() } else { z.clone() };
        trace!(layer = i, shape = ?z.shape(), "forward");
        pre_activations.push(z);
        activations.push(next);
    }

    Ok(ForwardTrace {
        pre_activations,
        activations,
    })
}

/// Fail unless `grad_output` has exactly the shape of the network output.
pub(crate) fn check_grad_output(output: &Tensor, grad_output: &Tensor) -> FaResult<()> {
    if grad_output.shape() != output.shape() {
        return Err(FaError::shape("grad_output", output.shape(), grad_output.shape()));
    }
    Ok(())
}
