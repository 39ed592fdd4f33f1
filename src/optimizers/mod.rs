//! Optimizer abstractions for parameter updates
//!
//! Optimizers turn gradients into in-place parameter updates. Each call is
//! keyed by the parameter's name so stateful optimizers (Adam) keep separate
//! moment estimates per tensor.
//!
//! Optimizers never decide *which* parameters to update: the network only
//! hands them trainable parameters, so feedback matrices stay untouched
//! whatever optimizer is plugged in.
//!
//! # Available Optimizers
//!
//! - SGD: Vanilla stochastic gradient descent
//! - Adam: Adaptive moment estimation with bias correction
//!
//! # Example
//!
//! ```ignore
//! use feedback_alignment::optimizers::{Optimizer, Adam};
//!
//! let mut optimizer = Adam::new(0.001, 0.9, 0.999, 1e-8);
//! let (output, ctx) = network.forward(&input)?;
//! let grads = network.backward(ctx, &grad_output)?;
//! network.apply_gradients(&mut optimizer, &grads)?;
//! ```

pub mod adam;
pub mod sgd;

pub use adam::Adam;
pub use sgd::SGD;

/// Core trait for optimizers.
pub trait Optimizer {
    /// Update one parameter tensor in place.
    ///
    /// # Arguments
    ///
    /// * `name` - Stable parameter name (e.g. `weights.0`), used to key optimizer state
    /// * `parameters` - Flat parameter values to update
    /// * `gradients` - Gradient of the loss with respect to each value
    ///
    /// Callers guarantee `parameters.len() == gradients.len()`.
    fn update(&mut self, name: &str, parameters: &mut [f32], gradients: &[f32]);

    /// Clear any accumulated state (moments, step counters).
    fn reset(&mut self);

    /// Base learning rate.
    fn learning_rate(&self) -> f32;

    /// Set the base learning rate.
    fn set_learning_rate(&mut self, lr: f32);
}
