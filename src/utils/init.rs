//! Parameter initialisation schemes
//!
//! Forward weights use Kaiming-uniform with the leaky-ReLU gain, feedback
//! matrices use i.i.d. standard normal values, biases start at a constant.

use crate::tensor::Tensor;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::StandardNormal;

/// Negative-slope parameter used for forward weights: `a = √5`.
///
/// With this value the Kaiming-uniform bound collapses to `1 / √fan_in`.
pub const KAIMING_NEGATIVE_SLOPE: f32 = 2.236_068; // sqrt(5)

/// Gain for a leaky-ReLU nonlinearity with negative slope `a`: `√(2 / (1 + a²))`.
pub fn leaky_relu_gain(a: f32) -> f32 {
    (2.0 / (1.0 + a * a)).sqrt()
}

/// Kaiming-uniform bound for a weight of shape `(fan_out, fan_in)`.
///
/// `bound = √3 · gain / √fan_in`.
pub fn kaiming_uniform_bound(fan_in: usize, a: f32) -> f32 {
    let std = leaky_relu_gain(a) / (fan_in as f32).sqrt();
    3.0f32.sqrt() * std
}

/// Fill a 2-D `(fan_out, fan_in)` tensor from `U(-bound, bound)`.
///
/// Tensors that are not 2-D or have a zero fan-in are left untouched.
pub fn kaiming_uniform_<R: Rng + ?Sized>(tensor: &mut Tensor, a: f32, rng: &mut R) {
    let fan_in = match tensor.shape() {
        [_, fan_in] if *fan_in > 0 => *fan_in,
        _ => return,
    };
    let bound = kaiming_uniform_bound(fan_in, a);
    let dist = Uniform::new_inclusive(-bound, bound);
    for value in tensor.as_mut_slice() {
        *value = dist.sample(rng);
    }
}

/// Fill a tensor with independent `N(0, 1)` samples.
pub fn standard_normal_<R: Rng + ?Sized>(tensor: &mut Tensor, rng: &mut R) {
    for value in tensor.as_mut_slice() {
        *value = StandardNormal.sample(rng);
    }
}

/// Fill a tensor with a constant.
pub fn constant_(tensor: &mut Tensor, value: f32) {
    for v in tensor.as_mut_slice() {
        *v = value;
    }
}
