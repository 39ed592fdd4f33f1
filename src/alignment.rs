//! Alignment diagnostics
//!
//! Under feedback alignment the forward weights drift toward agreement with
//! the fixed feedback matrices. The angle between `vec(W_i)` and `vec(F_i)`
//! tracks this: about 90° for independent random matrices, shrinking as
//! training aligns them.

use crate::error::{FaError, FaResult};
use crate::tensor::Tensor;

/// Angle in degrees between two same-shaped tensors viewed as flat vectors.
///
/// Returns 90.0 when either tensor has zero norm.
pub fn alignment_angle(weight: &Tensor, feedback: &Tensor) -> FaResult<f32> {
    if weight.shape() != feedback.shape() {
        return Err(FaError::shape("alignment angle", weight.shape(), feedback.shape()));
    }
    let denom = weight.norm() * feedback.norm();
    if denom == 0.0 {
        return Ok(90.0);
    }
    let cosine = (weight.dot(feedback)? / denom).clamp(-1.0, 1.0);
    Ok(cosine.acos().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn t(data: &[f32]) -> Tensor {
        Tensor::from_vec(data.to_vec(), &[1, data.len()]).unwrap()
    }

    #[test]
    fn test_parallel_is_zero() {
        let angle = alignment_angle(&t(&[1.0, 2.0]), &t(&[2.0, 4.0])).unwrap();
        assert_relative_eq!(angle, 0.0, epsilon = 0.1);
    }

    #[test]
    fn test_orthogonal_is_ninety() {
        let angle = alignment_angle(&t(&[1.0, 0.0]), &t(&[0.0, 3.0])).unwrap();
        assert_relative_eq!(angle, 90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_opposite_is_one_eighty() {
        let angle = alignment_angle(&t(&[1.0, -1.0]), &t(&[-1.0, 1.0])).unwrap();
        assert_relative_eq!(angle, 180.0, epsilon = 0.1);
    }

    #[test]
    fn test_zero_norm() {
        assert_eq!(alignment_angle(&t(&[0.0, 0.0]), &t(&[1.0, 1.0])).unwrap(), 90.0);
    }

    #[test]
    fn test_shape_mismatch() {
        assert!(alignment_angle(&t(&[1.0, 2.0]), &t(&[1.0, 2.0, 3.0])).is_err());
    }
}
