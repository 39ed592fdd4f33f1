//! Network and optimizer configuration
//!
//! Construction parameters can be read from JSON so experiments can vary
//! layer sizes and optimizer settings without code changes.
//!
//! # Example
//!
//! ```json
//! {
//!   "input_size": 4,
//!   "hidden_sizes": [8, 6],
//!   "output_size": 2,
//!   "seed": 42,
//!   "optimizer": {
//!     "optimizer_type": "adam",
//!     "learning_rate": 0.001
//!   }
//! }
//! ```

use crate::error::{FaError, FaResult};
use crate::network::LayeredNetwork;
use crate::optimizers::{Adam, Optimizer, SGD};
use serde::Deserialize;
use std::error::Error;
use std::fs;

const DEFAULT_BETA1: f32 = 0.9;
const DEFAULT_BETA2: f32 = 0.999;
const DEFAULT_EPSILON: f32 = 1e-8;

/// Layer sizes, seed and optional optimizer settings for one network.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub input_size: usize,
    /// Hidden layer widths in order; must be non-empty
    pub hidden_sizes: Vec<usize>,
    pub output_size: usize,
    /// Seed for parameter initialisation; drawn from the OS when absent
    pub seed: Option<u64>,
    pub optimizer: Option<OptimizerConfig>,
}

/// Optimizer selection.
///
/// - **sgd**: uses `learning_rate` only
/// - **adam**: optional `beta1` (0.9), `beta2` (0.999), `epsilon` (1e-8)
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizerConfig {
    /// "sgd" or "adam"
    pub optimizer_type: String,
    pub learning_rate: f32,
    pub beta1: Option<f32>,
    pub beta2: Option<f32>,
    pub epsilon: Option<f32>,
}

impl NetworkConfig {
    /// Build the network described by this configuration.
    pub fn build(&self) -> FaResult<LayeredNetwork> {
        match self.seed {
            Some(seed) => {
                LayeredNetwork::with_seed(self.input_size, &self.hidden_sizes, self.output_size, seed)
            }
            None => LayeredNetwork::new(
                self.input_size,
                &self.hidden_sizes,
                self.output_size,
                &mut rand::thread_rng(),
            ),
        }
    }
}

impl OptimizerConfig {
    /// Build the configured optimizer.
    pub fn build(&self) -> FaResult<Box<dyn Optimizer>> {
        match self.optimizer_type.to_lowercase().as_str() {
            "sgd" => Ok(Box::new(SGD::new(self.learning_rate))),
            "adam" => Ok(Box::new(Adam::new(
                self.learning_rate,
                self.beta1.unwrap_or(DEFAULT_BETA1),
                self.beta2.unwrap_or(DEFAULT_BETA2),
                self.epsilon.unwrap_or(DEFAULT_EPSILON),
            ))),
            other => Err(FaError::config(format!(
                "Unknown optimizer type '{}'. Must be one of: sgd, adam",
                other
            ))),
        }
    }
}

/// Load a network configuration from a JSON file.
///
/// # Returns
///
/// `Ok(NetworkConfig)` on success, or an error if the file cannot be read,
/// the JSON is invalid, or the values fail validation.
///
/// # Examples
///
/// ```no_run
/// use feedback_alignment::config::load_config;
///
/// let cfg = load_config("config/fa_mlp.json").unwrap();
/// let network = cfg.build().unwrap();
/// ```
pub fn load_config(path: &str) -> Result<NetworkConfig, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let config: NetworkConfig = serde_json::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &NetworkConfig) -> FaResult<()> {
    if config.hidden_sizes.is_empty() {
        return Err(FaError::config("hidden_sizes must not be empty"));
    }
    if config.input_size == 0 || config.output_size == 0 {
        return Err(FaError::config("input_size and output_size must be positive"));
    }
    if config.hidden_sizes.contains(&0) {
        return Err(FaError::config("hidden_sizes must all be positive"));
    }

    if let Some(ref optimizer) = config.optimizer {
        if optimizer.learning_rate <= 0.0 {
            return Err(FaError::config("learning_rate must be positive"));
        }
        for (label, beta) in [("beta1", optimizer.beta1), ("beta2", optimizer.beta2)] {
            if let Some(beta) = beta {
                if !(0.0..1.0).contains(&beta) {
                    return Err(FaError::config(format!("{} must be in [0, 1)", label)));
                }
            }
        }
        if let Some(epsilon) = optimizer.epsilon {
            if epsilon <= 0.0 {
                return Err(FaError::config("epsilon must be positive"));
            }
        }
        // Surfaces unknown optimizer types at load time.
        optimizer.build()?;
    }

    Ok(())
}
