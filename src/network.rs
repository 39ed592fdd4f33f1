//! Layered feed-forward network trained by feedback alignment
//!
//! [`LayeredNetwork`] owns one [`LayerParams`] record per affine layer and
//! delegates every forward and backward call to [`FeedbackAlignmentOp`].
//! Forward weights and biases are trainable; feedback matrices are created
//! once from a standard normal and flagged fixed for the model's lifetime.

use crate::alignment::alignment_angle;
use crate::autograd::{CustomOp, Gradients, LayerParams, Parameter};
use crate::error::{FaError, FaResult};
use crate::ops::{FaContext, FeedbackAlignmentOp};
use crate::optimizers::Optimizer;
use crate::tensor::Tensor;
use crate::utils::init::{constant_, kaiming_uniform_, standard_normal_, KAIMING_NEGATIVE_SLOPE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Multilayer perceptron whose error signal flows through fixed random matrices.
///
/// Layer `i < L-1` maps to `hidden_sizes[i]` and applies ReLU; the last layer
/// maps to `output_size` with no nonlinearity.
///
/// # Example
///
/// ```
/// use feedback_alignment::{LayeredNetwork, Tensor};
///
/// let net = LayeredNetwork::with_seed(4, &[8, 6], 2, 42).unwrap();
/// let input = Tensor::zeros(&[3, 4]);
/// let (output, ctx) = net.forward(&input).unwrap();
/// assert_eq!(output.shape(), &[3, 2]);
///
/// let grads = net.backward(ctx, &Tensor::filled(&[3, 2], 1.0)).unwrap();
/// assert_eq!(grads.layers[0].weight.shape(), &[8, 4]);
/// assert!(grads.layers.iter().all(|g| g.feedback.is_none()));
/// ```
#[derive(Debug, Clone)]
pub struct LayeredNetwork {
    layers: Vec<LayerParams>,
    op: FeedbackAlignmentOp,
}

impl LayeredNetwork {
    /// Build a network, drawing all random parameters from `rng`.
    ///
    /// # Errors
    ///
    /// `Configuration` if `hidden_sizes` is empty or any size is zero.
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        hidden_sizes: &[usize],
        output_size: usize,
        rng: &mut R,
    ) -> FaResult<Self> {
        validate_sizes(input_size, hidden_sizes, output_size)?;

        let mut sizes = Vec::with_capacity(hidden_sizes.len() + 2);
        sizes.push(input_size);
        sizes.extend_from_slice(hidden_sizes);
        sizes.push(output_size);

        let mut layers = Vec::with_capacity(sizes.len() - 1);
        for (i, pair) in sizes.windows(2).enumerate() {
            let (fan_in, fan_out) = (pair[0], pair[1]);

            let mut feedback = Tensor::zeros(&[fan_out, fan_in]);
            standard_normal_(&mut feedback, rng);

            layers.push(LayerParams {
                weight: Parameter::trainable(
                    format!("weights.{}", i),
                    Tensor::zeros(&[fan_out, fan_in]),
                ),
                bias: Parameter::trainable(format!("biases.{}", i), Tensor::zeros(&[fan_out])),
                feedback: Parameter::fixed(format!("feedback.{}", i), feedback),
            });
        }

        let mut network = Self {
            layers,
            op: FeedbackAlignmentOp,
        };
        network.reset_parameters(rng);

        debug!(
            layers = network.num_layers(),
            sizes = ?sizes,
            trainable = network.trainable_parameter_count(),
            total = network.parameter_count(),
            "constructed feedback alignment network"
        );
        Ok(network)
    }

    /// Build a network from a seeded `StdRng` so construction is reproducible.
    pub fn with_seed(
        input_size: usize,
        hidden_sizes: &[usize],
        output_size: usize,
        seed: u64,
    ) -> FaResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(input_size, hidden_sizes, output_size, &mut rng)
    }

    /// Re-draw forward weights (Kaiming-uniform, `a = √5`) and zero the biases.
    ///
    /// Feedback matrices are not touched.
    pub fn reset_parameters<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for layer in &mut self.layers {
            kaiming_uniform_(layer.weight.value_mut(), KAIMING_NEGATIVE_SLOPE, rng);
            constant_(layer.bias.value_mut(), 0.0);
        }
    }

    /// Forward pass; the returned context feeds exactly one [`backward`](Self::backward) call.
    pub fn forward(&self, input: &Tensor) -> FaResult<(Tensor, FaContext<'_>)> {
        self.op.forward(input, &self.layers)
    }

    /// Forward pass for inference only.
    pub fn predict(&self, input: &Tensor) -> FaResult<Tensor> {
        self.forward(input).map(|(output, _)| output)
    }

    /// Backward pass under the feedback-alignment rule.
    pub fn backward(&self, ctx: FaContext<'_>, grad_output: &Tensor) -> FaResult<Gradients> {
        self.op.backward(ctx, grad_output)
    }

    /// Apply `grads` to every trainable parameter through `optimizer`.
    ///
    /// Fixed parameters are skipped whatever gradient is supplied for them.
    /// All gradient shapes are checked before any parameter changes.
    pub fn apply_gradients(
        &mut self,
        optimizer: &mut dyn Optimizer,
        grads: &Gradients,
    ) -> FaResult<()> {
        if grads.num_layers() != self.layers.len() {
            return Err(FaError::shape(
                "gradient layer count",
                &[self.layers.len()],
                &[grads.num_layers()],
            ));
        }

        for param in self.trainable_parameters() {
            let grad = grads
                .get(param.name())
                .ok_or_else(|| FaError::shape(format!("{} gradient", param.name()), param.shape(), &[]))?;
            if grad.shape() != param.shape() {
                return Err(FaError::shape(
                    format!("{} gradient", param.name()),
                    param.shape(),
                    grad.shape(),
                ));
            }
        }

        for layer in &mut self.layers {
            for param in [&mut layer.weight, &mut layer.bias, &mut layer.feedback] {
                if !param.is_trainable() {
                    trace!(parameter = param.name(), "skipping fixed parameter");
                    continue;
                }
                let name = param.name().to_string();
                if let Some(grad) = grads.get(&name) {
                    optimizer.update(&name, param.value_mut().as_mut_slice(), grad.as_slice());
                }
            }
        }
        Ok(())
    }

    pub fn layers(&self) -> &[LayerParams] {
        &self.layers
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, LayerParams::input_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, LayerParams::output_size)
    }

    /// All parameters: every weight, then every bias, then every feedback matrix.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.layers
            .iter()
            .map(|l| &l.weight)
            .chain(self.layers.iter().map(|l| &l.bias))
            .chain(self.layers.iter().map(|l| &l.feedback))
    }

    pub fn trainable_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters().filter(|p| p.is_trainable())
    }

    /// Look up a parameter by name (`weights.{i}`, `biases.{i}`, `feedback.{i}`).
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters().find(|p| p.name() == name)
    }

    /// Number of scalar values across all parameters, fixed ones included.
    pub fn parameter_count(&self) -> usize {
        self.parameters().map(|p| p.value().len()).sum()
    }

    pub fn trainable_parameter_count(&self) -> usize {
        self.trainable_parameters().map(|p| p.value().len()).sum()
    }

    /// Angle in degrees between `W_i` and `F_i` for each layer `i ≥ 1`.
    ///
    /// Layer 0 is omitted: its feedback matrix never carries error.
    pub fn alignment_angles(&self) -> FaResult<Vec<f32>> {
        self.layers
            .iter()
            .skip(1)
            .map(|l| alignment_angle(l.weight.value(), l.feedback.value()))
            .collect()
    }
}

fn validate_sizes(input_size: usize, hidden_sizes: &[usize], output_size: usize) -> FaResult<()> {
    if hidden_sizes.is_empty() {
        return Err(FaError::config(
            "hidden_sizes must contain at least one layer size",
        ));
    }
    if input_size == 0 {
        return Err(FaError::config("input_size must be positive"));
    }
    if output_size == 0 {
        return Err(FaError::config("output_size must be positive"));
    }
    if let Some(i) = hidden_sizes.iter().position(|&s| s == 0) {
        return Err(FaError::config(format!("hidden_sizes[{}] must be positive", i)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_shapes() {
        let net = LayeredNetwork::with_seed(4, &[8, 6], 2, 1).unwrap();
        let shapes: Vec<&[usize]> = net.layers().iter().map(|l| l.weight.shape()).collect();
        assert_eq!(shapes, vec![&[8, 4][..], &[6, 8][..], &[2, 6][..]]);
        for layer in net.layers() {
            assert_eq!(layer.feedback.shape(), layer.weight.shape());
            assert_eq!(layer.bias.shape(), &[layer.output_size()]);
        }
        assert_eq!(net.input_size(), 4);
        assert_eq!(net.output_size(), 2);
    }

    #[test]
    fn test_parameter_order_and_flags() {
        let net = LayeredNetwork::with_seed(3, &[5], 2, 1).unwrap();
        let names: Vec<&str> = net.parameters().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec!["weights.0", "weights.1", "biases.0", "biases.1", "feedback.0", "feedback.1"]
        );
        assert!(net
            .parameters()
            .all(|p| p.is_trainable() == !p.name().starts_with("feedback")));
    }

    #[test]
    fn test_parameter_counts() {
        let net = LayeredNetwork::with_seed(4, &[8, 6], 2, 1).unwrap();
        let weights = 8 * 4 + 6 * 8 + 2 * 6;
        let biases = 8 + 6 + 2;
        assert_eq!(net.trainable_parameter_count(), weights + biases);
        assert_eq!(net.parameter_count(), 2 * weights + biases);
    }

    #[test]
    fn test_empty_hidden_sizes_rejected() {
        let err = LayeredNetwork::with_seed(4, &[], 2, 1).unwrap_err();
        assert!(matches!(err, FaError::Configuration(_)));
    }

    #[test]
    fn test_zero_sizes_rejected() {
        assert!(LayeredNetwork::with_seed(0, &[3], 2, 1).is_err());
        assert!(LayeredNetwork::with_seed(4, &[3, 0], 2, 1).is_err());
        assert!(LayeredNetwork::with_seed(4, &[3], 0, 1).is_err());
    }

    #[test]
    fn test_reset_parameters_keeps_feedback() {
        let mut net = LayeredNetwork::with_seed(4, &[8], 3, 9).unwrap();
        let feedback_before: Vec<Tensor> =
            net.layers().iter().map(|l| l.feedback.value().clone()).collect();
        let weight_before = net.layers()[0].weight.value().clone();

        let mut rng = StdRng::seed_from_u64(123);
        net.reset_parameters(&mut rng);

        for (layer, before) in net.layers().iter().zip(feedback_before.iter()) {
            assert_eq!(layer.feedback.value(), before);
            assert!(layer.bias.value().as_slice().iter().all(|&b| b == 0.0));
        }
        assert_ne!(net.layers()[0].weight.value(), &weight_before);
    }

    #[test]
    fn test_alignment_angles_skip_first_layer() {
        let net = LayeredNetwork::with_seed(4, &[8, 6], 2, 3).unwrap();
        let angles = net.alignment_angles().unwrap();
        assert_eq!(angles.len(), 2);
        assert!(angles.iter().all(|a| (0.0..=180.0).contains(a)));
    }
}
