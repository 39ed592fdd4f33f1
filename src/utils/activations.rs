//! ReLU and its subgradient
//!
//! Hidden layers use ReLU; the output layer is affine only. The backward
//! gate follows the usual convention that the subgradient at exactly zero is 0.

/// ReLU activation applied in-place.
///
/// Sets all negative values to 0.0, keeps positive values unchanged.
pub fn relu_inplace(data: &mut [f32]) {
    for value in data.iter_mut() {
        if *value < 0.0 {
            *value = 0.0;
        }
    }
}

/// ReLU derivative for a single pre-activation: 1 where `z > 0`, else 0.
pub fn relu_derivative(z: f32) -> f32 {
    if z > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Multiply `delta` element-wise by `relu'(pre_activation)`.
///
/// Components whose pre-activation is not strictly positive are zeroed.
/// Both slices must have the same length.
pub fn relu_gate_inplace(delta: &mut [f32], pre_activation: &[f32]) {
    debug_assert_eq!(delta.len(), pre_activation.len());
    for (d, &z) in delta.iter_mut().zip(pre_activation.iter()) {
        *d *= relu_derivative(z);
    }
}
