//! Row-major single-precision GEMM
//!
//! Computes `C = alpha * op(A) * op(B) + beta * C` where `op(X)` is `X` or `Xᵗ`.
//! With the `blas` feature this forwards to `cblas::sgemm`; otherwise a
//! portable loop with the same argument conventions is used.

#[cfg(feature = "blas")]
extern crate blas_src;

/// Single-precision matrix multiply on row-major buffers.
///
/// # Arguments
///
/// * `m`, `n`, `k` - `op(A)` is `m × k`, `op(B)` is `k × n`, `C` is `m × n`
/// * `lda`, `ldb`, `ldc` - Row strides of the stored (untransposed) buffers
/// * `transpose_a`, `transpose_b` - Whether to use the transpose of A / B
///
/// Callers are responsible for validating dimensions; this function assumes
/// the buffers are large enough for the given strides. Only the shape-checked
/// [`Tensor`](crate::tensor::Tensor) products call it.
#[allow(clippy::too_many_arguments)]
pub(crate) fn sgemm_wrapper(
    m: usize,
    n: usize,
    k: usize,
    a: &[f32],
    lda: usize,
    b: &[f32],
    ldb: usize,
    c: &mut [f32],
    ldc: usize,
    transpose_a: bool,
    transpose_b: bool,
    alpha: f32,
    beta: f32,
) {
    #[cfg(feature = "blas")]
    {
        use cblas::{sgemm, Layout, Transpose};

        let trans_a = if transpose_a {
            Transpose::Ordinary
        } else {
            Transpose::None
        };
        let trans_b = if transpose_b {
            Transpose::Ordinary
        } else {
            Transpose::None
        };

        unsafe {
            sgemm(
                Layout::RowMajor,
                trans_a,
                trans_b,
                m as i32,
                n as i32,
                k as i32,
                alpha,
                a,
                lda as i32,
                b,
                ldb as i32,
                beta,
                c,
                ldc as i32,
            );
        }
    }

    #[cfg(not(feature = "blas"))]
    {
        for i in 0..m {
            for j in 0..n {
                let mut sum = 0.0f32;
                for p in 0..k {
                    let a_val = if transpose_a { a[p * lda + i] } else { a[i * lda + p] };
                    let b_val = if transpose_b { b[j * ldb + p] } else { b[p * ldb + j] };
                    sum += a_val * b_val;
                }
                let out = &mut c[i * ldc + j];
                // beta == 0 must not propagate NaN from an uninitialised C
                *out = if beta == 0.0 {
                    alpha * sum
                } else {
                    alpha * sum + beta * *out
                };
            }
        }
    }
}
