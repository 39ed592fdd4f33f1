//! Feedback Alignment for multilayer perceptrons
//!
//! Feedback alignment trains a feed-forward network without the weight
//! transport of backpropagation: the error signal travels backward through
//! fixed random feedback matrices instead of the transposed forward weights.
//!
//! # Modules
//!
//! - `tensor`: Dense row-major `f32` tensors with the ops the rules need
//! - `autograd`: Custom forward/backward seam, parameters and gradients
//! - `ops`: Feedback alignment rule (and exact backprop for comparison)
//! - `network`: `LayeredNetwork`, the model owning weights, biases and feedback matrices
//! - `optimizers`: Optimizer trait and implementations (SGD, Adam)
//! - `alignment`: Weight/feedback alignment diagnostics
//! - `config`: JSON network and optimizer configuration
//! - `utils`: GEMM, activations and initialisation
//! - `error`: Error types

pub mod alignment;
pub mod autograd;
pub mod config;
pub mod error;
pub mod network;
pub mod ops;
pub mod optimizers;
pub mod tensor;
pub mod utils;

pub use autograd::{CustomOp, Gradients, LayerGradients, LayerParams, Parameter};
pub use error::{FaError, FaResult};
pub use network::LayeredNetwork;
pub use ops::{BackpropOp, FaContext, FeedbackAlignmentOp};
pub use tensor::Tensor;
