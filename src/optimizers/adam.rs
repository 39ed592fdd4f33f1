//! Adam (Adaptive Moment Estimation) optimizer
//!
//! Combines momentum and adaptive per-value learning rates with bias
//! correction. State is kept per parameter name.

use crate::optimizers::Optimizer;
use std::collections::HashMap;

/// Moment estimates and step counter for one parameter tensor.
#[derive(Debug, Clone, Default)]
struct Moments {
    m: Vec<f32>,
    v: Vec<f32>,
    t: u32,
}

/// Adam optimizer.
///
/// ```text
/// m_t = β1 * m_{t-1} + (1 - β1) * g
/// v_t = β2 * v_{t-1} + (1 - β2) * g²
/// m_hat = m_t / (1 - β1^t)
/// v_hat = v_t / (1 - β2^t)
/// p = p - α * m_hat / (√v_hat + ε)
/// ```
///
/// Kingma, D. P., & Ba, J. (2014). Adam: A method for stochastic optimization.
/// arXiv preprint arXiv:1412.6980.
#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    state: HashMap<String, Moments>,
}

impl Adam {
    /// Create an Adam optimizer; the paper's defaults are `(0.001, 0.9, 0.999, 1e-8)`.
    pub fn new(learning_rate: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            beta1,
            beta2,
            epsilon,
            state: HashMap::new(),
        }
    }

    /// Number of update steps taken for `name` so far.
    pub fn steps(&self, name: &str) -> u32 {
        self.state.get(name).map_or(0, |s| s.t)
    }
}

impl Optimizer for Adam {
    fn update(&mut self, name: &str, parameters: &mut [f32], gradients: &[f32]) {
        debug_assert_eq!(parameters.len(), gradients.len());

        let moments = self.state.entry(name.to_string()).or_default();
        if moments.m.len() != parameters.len() {
            moments.m = vec![0.0; parameters.len()];
            moments.v = vec![0.0; parameters.len()];
            moments.t = 0;
        }

        moments.t += 1;
        let bias_correction1 = 1.0 - self.beta1.powi(moments.t as i32);
        let bias_correction2 = 1.0 - self.beta2.powi(moments.t as i32);

        for i in 0..parameters.len() {
            let g = gradients[i];
            moments.m[i] = self.beta1 * moments.m[i] + (1.0 - self.beta1) * g;
            moments.v[i] = self.beta2 * moments.v[i] + (1.0 - self.beta2) * g * g;

            let m_hat = moments.m[i] / bias_correction1;
            let v_hat = moments.v[i] / bias_correction2;

            parameters[i] -= self.learning_rate * m_hat / (v_hat.sqrt() + self.epsilon);
        }
    }

    fn reset(&mut self) {
        self.state.clear();
    }

    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.learning_rate = lr;
    }
}
