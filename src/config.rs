// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration Constants** - *Runtime Behaviour Parameters*
//!
//! Global configuration constants controlling kernel behaviour and performance thresholds.
//! These values are compile-time constants optimised for typical workloads.

/// Minimum output length before broadcast kernels hand work to rayon.
///
/// Only consulted with the `parallel` feature. Below this length the thread-pool
/// dispatch costs more than the closed-form evaluation itself.
pub const PARALLEL_MIN_LEN: usize = 1 << 16;

/// Number of output elements evaluated per rayon task.
pub const PARALLEL_CHUNK_LEN: usize = 1 << 12;

/// Probabilities below this are mapped through `erfc⁻¹` in the standard normal
/// quantile, as the rational approximation loses relative accuracy there.
pub const QUANTILE_ERFC_TAIL: f64 = 1.110_223_024_625_156_5e-16;
