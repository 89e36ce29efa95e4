// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Common SIMD Distribution Utilities**
//!
//! Shared SIMD kernel infrastructure for univariate distribution kernels whose
//! parameters are all scalars, so only the input varies per lane.

use std::simd::{LaneCount, Simd, SupportedLaneCount};

use minarrow::{Vec64, utils::is_simd_aligned};

/// SIMD kernel for dense f64->f64 computations (zero-allocation variant).
///
/// Writes directly to caller-provided output buffer.
///
/// ## Parameters
/// - `x`: Input array slice (requires 64-byte alignment for SIMD activation)
/// - `out`: Output buffer (must match input length)
/// - `simd_body`: Vectorised computation function: `Simd<f64, N> -> Simd<f64, N>`
/// - `scalar_body`: Scalar computation function for tail elements: `f64 -> f64`
///
/// ## Panics
/// Panics if `x.len() != out.len()`.
#[inline(always)]
pub fn dense_univariate_kernel_f64_simd_to<const N: usize, FSimd, FScalar>(
    x: &[f64],
    out: &mut [f64],
    simd_body: FSimd,
    scalar_body: FScalar,
) where
    LaneCount<N>: SupportedLaneCount,
    FSimd: Fn(Simd<f64, N>) -> Simd<f64, N>,
    FScalar: Fn(f64) -> f64,
{
    let len = x.len();
    assert_eq!(
        len,
        out.len(),
        "dense_univariate_kernel_f64_simd_to: input/output length mismatch"
    );

    if !is_simd_aligned(x) {
        for (o, &xi) in out.iter_mut().zip(x) {
            *o = scalar_body(xi);
        }
        return;
    }

    let mut i = 0;
    while i + N <= len {
        let x_v = Simd::<f64, N>::from_slice(&x[i..i + N]);
        out[i..i + N].copy_from_slice(simd_body(x_v).as_array());
        i += N;
    }
    // scalar tail
    for j in i..len {
        out[j] = scalar_body(x[j]);
    }
}

/// SIMD kernel for dense f64->f64 computations.
///
/// ## Parameters
/// - `x`: Input array slice (requires 64-byte alignment for SIMD activation)
/// - `simd_body`: Vectorised computation function: `Simd<f64, N> -> Simd<f64, N>`
/// - `scalar_body`: Scalar computation function for tail elements: `f64 -> f64`
#[inline(always)]
pub fn dense_univariate_kernel_f64_simd<const N: usize, FSimd, FScalar>(
    x: &[f64],
    simd_body: FSimd,
    scalar_body: FScalar,
) -> Vec64<f64>
where
    LaneCount<N>: SupportedLaneCount,
    FSimd: Fn(Simd<f64, N>) -> Simd<f64, N>,
    FScalar: Fn(f64) -> f64,
{
    let mut out = Vec64::with_capacity(x.len());
    out.resize(x.len(), 0.0);

    dense_univariate_kernel_f64_simd_to::<N, _, _>(x, out.as_mut_slice(), simd_body, scalar_body);

    out
}
