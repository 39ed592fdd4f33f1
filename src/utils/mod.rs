//! Shared numeric utilities
//!
//! GEMM, activation helpers and parameter initialisation used by the
//! tensor substrate and the network.

pub mod activations;
pub mod gemm;
pub mod init;

pub use activations::{relu_derivative, relu_gate_inplace, relu_inplace};
