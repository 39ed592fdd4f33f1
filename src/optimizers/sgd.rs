//! Stochastic Gradient Descent (SGD) optimizer
//!
//! `parameter = parameter - learning_rate * gradient`

use crate::optimizers::Optimizer;

/// Vanilla SGD: `w = w - η * ∇L/∂w`.
///
/// # Example
///
/// ```
/// use feedback_alignment::optimizers::{Optimizer, SGD};
///
/// let mut optimizer = SGD::new(0.1);
/// let mut params = vec![1.0, 2.0, 3.0];
/// optimizer.update("weights.0", &mut params, &[0.1, 0.2, 0.3]);
/// assert!((params[0] - 0.99).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct SGD {
    learning_rate: f32,
}

impl SGD {
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for SGD {
    fn update(&mut self, _name: &str, parameters: &mut [f32], gradients: &[f32]) {
        debug_assert_eq!(parameters.len(), gradients.len());
        for (param, grad) in parameters.iter_mut().zip(gradients.iter()) {
            *param -= self.learning_rate * grad;
        }
    }

    fn reset(&mut self) {}

    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.learning_rate = lr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sgd_update() {
        let mut optimizer = SGD::new(0.5);
        let mut params = vec![1.0, -1.0];
        optimizer.update("biases.0", &mut params, &[2.0, -2.0]);
        assert_eq!(params, vec![0.0, 0.0]);
    }

    #[test]
    fn test_sgd_zero_gradient_is_noop() {
        let mut optimizer = SGD::new(0.1);
        let mut params = vec![1.5, 2.5];
        optimizer.update("weights.0", &mut params, &[0.0, 0.0]);
        assert_eq!(params, vec![1.5, 2.5]);
    }

    #[test]
    fn test_sgd_set_learning_rate() {
        let mut optimizer = SGD::new(0.01);
        optimizer.set_learning_rate(0.2);
        assert_eq!(optimizer.learning_rate(), 0.2);
        optimizer.reset();
        assert_eq!(optimizer.learning_rate(), 0.2);
    }
}
