// Tests for the forward pass: output shapes, layer semantics, shape errors
// and determinism.

use approx::assert_relative_eq;
use feedback_alignment::{
    CustomOp, FaError, FeedbackAlignmentOp, LayerParams, LayeredNetwork, Parameter, Tensor,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_input(rows: usize, cols: usize, seed: u64) -> Tensor {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..rows * cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Tensor::from_vec(data, &[rows, cols]).unwrap()
}

// ============================================================================
// Shape Law
// ============================================================================

mod shape_tests {
    use super::*;

    #[test]
    fn test_scenario_output_shape() {
        let net = LayeredNetwork::with_seed(4, &[8, 6], 2, 42).unwrap();
        let (output, _ctx) = net.forward(&random_input(3, 4, 1)).unwrap();
        assert_eq!(output.shape(), &[3, 2]);
    }

    #[test]
    fn test_shape_law_across_configurations() {
        let configs: &[(usize, &[usize], usize)] = &[
            (1, &[1], 1),
            (4, &[8], 3),
            (10, &[5, 5, 5], 1),
            (7, &[32, 16, 8, 4], 10),
        ];

        for (seed, &(input_size, hidden, output_size)) in configs.iter().enumerate() {
            let net = LayeredNetwork::with_seed(input_size, hidden, output_size, seed as u64).unwrap();
            for batch in [1usize, 2, 5] {
                let output = net.predict(&random_input(batch, input_size, 7)).unwrap();
                assert_eq!(output.shape(), &[batch, output_size]);
            }
        }
    }

    #[test]
    fn test_context_records_every_layer() {
        let net = LayeredNetwork::with_seed(4, &[8, 6], 2, 42).unwrap();
        let input = random_input(3, 4, 2);
        let (output, ctx) = net.forward(&input).unwrap();

        assert_eq!(ctx.num_layers(), 3);
        assert_eq!(ctx.activation(0).unwrap(), &input);
        assert_eq!(ctx.activation(3).unwrap(), &output);
        assert_eq!(ctx.pre_activation(0).unwrap().shape(), &[3, 8]);
        assert_eq!(ctx.pre_activation(1).unwrap().shape(), &[3, 6]);
        assert_eq!(ctx.pre_activation(2).unwrap().shape(), &[3, 2]);
        assert!(ctx.pre_activation(3).is_none());
    }
}

// ============================================================================
// Layer Semantics
// ============================================================================

mod semantics_tests {
    use super::*;

    #[test]
    fn test_hidden_activations_are_relu_of_pre_activations() {
        let net = LayeredNetwork::with_seed(5, &[7, 3], 2, 9).unwrap();
        let (_, ctx) = net.forward(&random_input(4, 5, 3)).unwrap();

        for i in 0..2 {
            let z = ctx.pre_activation(i).unwrap();
            let a = ctx.activation(i + 1).unwrap();
            for (&zv, &av) in z.as_slice().iter().zip(a.as_slice()) {
                assert_eq!(av, zv.max(0.0));
            }
        }
    }

    #[test]
    fn test_output_layer_has_no_nonlinearity() {
        let net = LayeredNetwork::with_seed(5, &[7], 2, 9).unwrap();
        let (output, ctx) = net.forward(&random_input(4, 5, 3)).unwrap();
        assert_eq!(ctx.pre_activation(1).unwrap(), &output);
    }

    #[test]
    fn test_output_matches_manual_computation() {
        let net = LayeredNetwork::with_seed(3, &[4], 2, 5).unwrap();
        let input = random_input(2, 3, 4);
        let output = net.predict(&input).unwrap();

        let layers = net.layers();
        for n in 0..2 {
            let x = &input.as_slice()[n * 3..n * 3 + 3];
            let mut hidden = [0.0f32; 4];
            for (j, h) in hidden.iter_mut().enumerate() {
                let mut sum = layers[0].bias.value().as_slice()[j];
                for (k, &xv) in x.iter().enumerate() {
                    sum += xv * layers[0].weight.value().get(&[j, k]).unwrap();
                }
                *h = sum.max(0.0);
            }
            for o in 0..2 {
                let mut sum = layers[1].bias.value().as_slice()[o];
                for (j, &hv) in hidden.iter().enumerate() {
                    sum += hv * layers[1].weight.value().get(&[o, j]).unwrap();
                }
                assert_relative_eq!(output.get(&[n, o]).unwrap(), sum, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_forward_does_not_modify_input() {
        let net = LayeredNetwork::with_seed(4, &[8], 2, 1).unwrap();
        let input = random_input(3, 4, 8);
        let copy = input.clone();
        let _ = net.forward(&input).unwrap();
        assert_eq!(input, copy);
    }
}

// ============================================================================
// Errors and Determinism
// ============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_wrong_input_width() {
        let net = LayeredNetwork::with_seed(4, &[8], 2, 1).unwrap();
        let err = net.forward(&Tensor::zeros(&[3, 5])).unwrap_err();
        assert!(matches!(err, FaError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_non_matrix_input() {
        let net = LayeredNetwork::with_seed(4, &[8], 2, 1).unwrap();
        let err = net.forward(&Tensor::zeros(&[4])).unwrap_err();
        assert!(matches!(err, FaError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_zero_width_layer_is_configuration_error() {
        let layers = vec![
            LayerParams {
                weight: Parameter::trainable("weights.0", Tensor::zeros(&[0, 3])),
                bias: Parameter::trainable("biases.0", Tensor::zeros(&[0])),
                feedback: Parameter::fixed("feedback.0", Tensor::zeros(&[0, 3])),
            },
            LayerParams {
                weight: Parameter::trainable("weights.1", Tensor::zeros(&[2, 0])),
                bias: Parameter::trainable("biases.1", Tensor::zeros(&[2])),
                feedback: Parameter::fixed("feedback.1", Tensor::zeros(&[2, 0])),
            },
        ];
        let err = FeedbackAlignmentOp
            .forward(&random_input(2, 3, 5), &layers)
            .unwrap_err();
        assert!(matches!(err, FaError::Configuration(_)));
    }

    #[test]
    fn test_repeated_forward_is_bitwise_identical() {
        let net = LayeredNetwork::with_seed(6, &[10, 4], 3, 77).unwrap();
        let input = random_input(5, 6, 11);
        let first = net.predict(&input).unwrap();
        for _ in 0..5 {
            assert_eq!(net.predict(&input).unwrap(), first);
        }
    }

    #[test]
    fn test_same_seed_same_network() {
        let a = LayeredNetwork::with_seed(6, &[10, 4], 3, 77).unwrap();
        let b = LayeredNetwork::with_seed(6, &[10, 4], 3, 77).unwrap();
        let c = LayeredNetwork::with_seed(6, &[10, 4], 3, 78).unwrap();
        assert_eq!(a.layers(), b.layers());
        assert_ne!(a.layers(), c.layers());
    }
}
