//! Error types for feedback-alignment operations
//!
//! Every fallible operation in the crate returns [`FaResult`]. There is no
//! internal recovery layer: errors propagate straight to the caller.

use std::error::Error;
use std::fmt;

/// Error type for network construction and forward/backward computation.
#[derive(Debug, Clone, PartialEq)]
pub enum FaError {
    /// Dimension incompatibility between tensors that must chain.
    ShapeMismatch {
        /// Which operand pair disagreed (e.g. `"layer 1 weight"`)
        context: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    /// Invalid network construction parameters.
    Configuration(String),
}

impl FaError {
    pub(crate) fn shape(context: impl Into<String>, expected: &[usize], actual: &[usize]) -> Self {
        FaError::ShapeMismatch {
            context: context.into(),
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        FaError::Configuration(message.into())
    }
}

impl fmt::Display for FaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaError::ShapeMismatch {
                context,
                expected,
                actual,
            } => write!(
                f,
                "Shape mismatch in {}: expected {:?}, got {:?}",
                context, expected, actual
            ),
            FaError::Configuration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl Error for FaError {}

pub type FaResult<T> = Result<T, FaError>;
