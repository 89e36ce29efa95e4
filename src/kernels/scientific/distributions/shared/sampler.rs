// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # Statistical Sampling Module — Split-Normal Pseudorandom Sampling
//!
//! Pseudorandom draws from the standard normal, half-normal and split-normal
//! distributions. The free functions take any `Rng`, so callers can supply a
//! seeded generator; `Sampler` wraps the thread-local generator.

use std::f64::consts::PI;

use minarrow::Vec64;
use rand::rngs::ThreadRng;
use rand::{Rng, rng};

/// Thread-local statistical distribution sampler backed by a high-quality PRNG.
pub struct Sampler {
    rng: ThreadRng,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler {
    /// Creates a new sampler instance with a thread-local pseudorandom number generator.
    #[inline]
    pub fn new() -> Self {
        Sampler { rng: rng() }
    }

    /// Generates a single sample from the standard normal distribution N(0, 1).
    #[inline]
    pub fn sample_standard_normal(&mut self) -> f64 {
        sample_standard_normal(&mut self.rng)
    }

    /// Split-normal draw. Preconditions: both scales finite and > 0.
    #[inline]
    pub fn split_normal(&mut self, loc: f64, scale_1: f64, scale_2: f64) -> f64 {
        sample_split_normal(&mut self.rng, loc, scale_1, scale_2)
    }

    /// Vector of iid split-normal samples of length `n`.
    #[inline]
    pub fn split_normal_vec(&mut self, n: usize, loc: f64, scale_1: f64, scale_2: f64) -> Vec64<f64> {
        split_normal_vec(&mut self.rng, n, loc, scale_1, scale_2)
    }
}

// Box–Muller to get one N(0,1)
/// Generates a single sample from the standard normal distribution N(0,1).
#[inline]
pub fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // U1 ∈ (0,1], U2 ∈ [0,1)
    let u1: f64 = rng.random::<f64>().max(f64::MIN_POSITIVE); // avoid log(0)
    let u2: f64 = rng.random::<f64>();
    let r = (-2.0 * u1.ln()).sqrt();
    r * (2.0 * PI * u2).cos()
}

/// Generates a single sample from the standard half-normal distribution |N(0,1)|.
#[inline]
pub fn sample_half_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    sample_standard_normal(rng).abs()
}

/// Generates a single split-normal sample.
///
/// The left half carries mass `scale_1 / (scale_1 + scale_2)`; a draw lands there
/// with that probability and is `loc − scale_1·|Z|`, otherwise `loc + scale_2·|Z|`.
///
/// Preconditions: both scales finite and > 0.
#[inline]
pub fn sample_split_normal<R: Rng + ?Sized>(
    rng: &mut R,
    loc: f64,
    scale_1: f64,
    scale_2: f64,
) -> f64 {
    assert!(
        scale_1.is_finite() && scale_1 > 0.0,
        "scale_1 must be finite and > 0"
    );
    assert!(
        scale_2.is_finite() && scale_2 > 0.0,
        "scale_2 must be finite and > 0"
    );

    let left_mass = 1.0 / (1.0 + scale_2 / scale_1);
    let u: f64 = rng.random::<f64>();
    let h = sample_half_normal(rng);
    if u < left_mass {
        loc - scale_1 * h
    } else {
        loc + scale_2 * h
    }
}

/// Vector of `n` iid split-normal samples drawn from `rng`.
///
/// Preconditions: both scales finite and > 0.
#[inline]
pub fn split_normal_vec<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    loc: f64,
    scale_1: f64,
    scale_2: f64,
) -> Vec64<f64> {
    let mut v = Vec64::with_capacity(n);
    for _ in 0..n {
        v.push(sample_split_normal(rng, loc, scale_1, scale_2));
    }
    v
}
