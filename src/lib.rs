// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// std::simd is only reached through the `simd` feature, so stable
// toolchains build the scalar kernels without any nightly features.
#![cfg_attr(feature = "simd", feature(portable_simd))]

// compile with RUSTFLAGS="-C target-cpu=native" cargo +nightly build --features simd

//! # **Split-Normal Kernels** - *Asymmetric Gaussian pdf, cdf, quantile and gradients*
//!
//! Vectorised kernels for the split-normal distribution: a normal density mirrored
//! about its mode `loc`, with scale `scale_1` below the mode and `scale_2` above it,
//! renormalised to unit mass.
//!
//! Kernels take `&[f64]` inputs plus scalar-or-array parameters (see
//! [`Param`](kernels::scientific::distributions::univariate::common::Param)),
//! broadcast them elementwise and return Arrow-compatible `minarrow::FloatArray<f64>`
//! results. Invalid scales produce `NaN` per element; null placeholders are rejected.

pub mod kernels {
    pub mod scientific {
        #[cfg(feature = "probability_distributions")]
        pub mod distributions;
    }
}

pub mod config;

pub mod errors;

pub mod utils;
