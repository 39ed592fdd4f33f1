//! Dense row-major tensors
//!
//! A [`Tensor`] is a flat `Vec<f32>` plus shape metadata. Only the handful of
//! operations the forward/backward rules need are provided, and every one of
//! them returns a freshly-owned tensor: inputs are never mutated, so saved
//! activations stay intact until their context is dropped.

use crate::error::{FaError, FaResult};
use crate::utils::activations::{relu_gate_inplace, relu_inplace};
use crate::utils::gemm::sgemm_wrapper;

/// Dense tensor of `f32` values stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Vec<f32>,
    shape: Vec<usize>,
}

impl Tensor {
    /// Create a tensor from flat data, checking that the length matches the shape.
    pub fn from_vec(data: Vec<f32>, shape: &[usize]) -> FaResult<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(FaError::shape("tensor data length", &[expected], &[data.len()]));
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
        })
    }

    /// Tensor of the given shape filled with zeros.
    pub fn zeros(shape: &[usize]) -> Self {
        Self::filled(shape, 0.0)
    }

    /// Tensor of the given shape filled with `value`.
    pub fn filled(shape: &[usize], value: f32) -> Self {
        let len = shape.iter().product();
        Self {
            data: vec![value; len],
            shape: shape.to_vec(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Element at a multi-dimensional index, or `None` when out of range.
    pub fn get(&self, index: &[usize]) -> Option<f32> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0;
        for (&i, &dim) in index.iter().zip(self.shape.iter()) {
            if i >= dim {
                return None;
            }
            offset = offset * dim + i;
        }
        self.data.get(offset).copied()
    }

    /// Rows and columns of a 2-D tensor.
    pub fn dims2(&self) -> FaResult<(usize, usize)> {
        match self.shape.as_slice() {
            [rows, cols] => Ok((*rows, *cols)),
            other => Err(FaError::shape("2-D tensor", &[0, 0], other)),
        }
    }

    /// `self · other` for `(m, k) · (k, n)`.
    pub fn matmul(&self, other: &Tensor) -> FaResult<Tensor> {
        let (m, k) = self.dims2()?;
        let (k2, n) = other.dims2()?;
        if k != k2 {
            return Err(FaError::shape("matmul inner dimension", &[k, n], &[k2, n]));
        }
        let mut out = vec![0.0f32; m * n];
        sgemm_wrapper(m, n, k, &self.data, k, &other.data, n, &mut out, n, false, false, 1.0, 0.0);
        Tensor::from_vec(out, &[m, n])
    }

    /// `self · otherᵗ` for `(m, k) · (n, k)ᵗ`.
    pub fn matmul_transpose_b(&self, other: &Tensor) -> FaResult<Tensor> {
        let (m, k) = self.dims2()?;
        let (n, k2) = other.dims2()?;
        if k != k2 {
            return Err(FaError::shape("matmul_transpose_b inner dimension", &[n, k], &[n, k2]));
        }
        let mut out = vec![0.0f32; m * n];
        sgemm_wrapper(m, n, k, &self.data, k, &other.data, k, &mut out, n, false, true, 1.0, 0.0);
        Tensor::from_vec(out, &[m, n])
    }

    /// `selfᵗ · other` for `(k, m)ᵗ · (k, n)`.
    pub fn matmul_transpose_a(&self, other: &Tensor) -> FaResult<Tensor> {
        let (k, m) = self.dims2()?;
        let (k2, n) = other.dims2()?;
        if k != k2 {
            return Err(FaError::shape("matmul_transpose_a inner dimension", &[k, n], &[k2, n]));
        }
        let mut out = vec![0.0f32; m * n];
        sgemm_wrapper(m, n, k, &self.data, m, &other.data, n, &mut out, n, true, false, 1.0, 0.0);
        Tensor::from_vec(out, &[m, n])
    }

    /// Add a 1-D bias to every row of a 2-D tensor.
    pub fn add_row_broadcast(&self, bias: &Tensor) -> FaResult<Tensor> {
        let (_, cols) = self.dims2()?;
        if bias.shape() != [cols] {
            return Err(FaError::shape("bias broadcast", &[cols], bias.shape()));
        }
        let mut out = self.clone();
        if cols > 0 {
            for row in out.data.chunks_exact_mut(cols) {
                for (value, b) in row.iter_mut().zip(bias.data.iter()) {
                    *value += *b;
                }
            }
        }
        Ok(out)
    }

    /// Column-sum over the batch (row) axis: `(rows, cols)` → `(cols)`.
    pub fn sum_rows(&self) -> FaResult<Tensor> {
        let (_, cols) = self.dims2()?;
        let mut out = vec![0.0f32; cols];
        if cols > 0 {
            for row in self.data.chunks_exact(cols) {
                for (sum, value) in out.iter_mut().zip(row.iter()) {
                    *sum += *value;
                }
            }
        }
        Tensor::from_vec(out, &[cols])
    }

    /// Element-wise ReLU.
    pub fn relu(&self) -> Tensor {
        let mut out = self.clone();
        relu_inplace(&mut out.data);
        out
    }

    /// Zero every element whose matching `pre_activation` is not strictly positive.
    pub fn relu_gate(&self, pre_activation: &Tensor) -> FaResult<Tensor> {
        if self.shape != pre_activation.shape {
            return Err(FaError::shape("relu gate", &pre_activation.shape, &self.shape));
        }
        let mut out = self.clone();
        relu_gate_inplace(&mut out.data, &pre_activation.data);
        Ok(out)
    }

    /// Transpose of a 2-D tensor.
    pub fn transpose(&self) -> FaResult<Tensor> {
        let (rows, cols) = self.dims2()?;
        let mut out = vec![0.0f32; rows * cols];
        for r in 0..rows {
            for c in 0..cols {
                out[c * rows + r] = self.data[r * cols + c];
            }
        }
        Tensor::from_vec(out, &[cols, rows])
    }

    /// Frobenius norm over all elements.
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Sum of element-wise products with a tensor of the same shape.
    pub fn dot(&self, other: &Tensor) -> FaResult<f32> {
        if self.shape != other.shape {
            return Err(FaError::shape("dot", &self.shape, &other.shape));
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum())
    }
}
