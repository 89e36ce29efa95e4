// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Mathematical Constants Module** - *High-Precision Constants for Statistical Computing*
//!
//! Hard-coded constants used by the standard normal building blocks and the
//! split-normal kernels.

/// The square root of 2: √2.
pub(crate) const SQRT_2: f64 = 1.4142135623730951_f64;

/// `1/√(2π)`, the standard normal density at its mode.
pub(crate) const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7_f64;

/// `½·ln(2π)`, used by the log-density.
pub(crate) const HALF_LN_2PI: f64 = 0.918_938_533_204_672_7_f64;

/// `√(2/π)`, the mean of a standard half-normal.
pub(crate) const SQRT_2_OVER_PI: f64 = 0.797_884_560_802_865_4_f64;

/// Acklam's inverse normal CDF approximation coefficients (central numerator).
///
/// Minimax rational approximation of Φ⁻¹(p) for the central region
/// 0.02425 < p < 0.97575, refined afterwards by a Halley step.
pub(crate) const A: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];

/// Acklam's inverse normal CDF approximation coefficients (central denominator).
pub(crate) const B: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];

/// Acklam's inverse normal CDF approximation coefficients (tail numerator).
///
/// Used when p < 0.02425, i.e. beyond roughly two standard deviations.
pub(crate) const C: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];

/// Acklam's inverse normal CDF approximation coefficients (tail denominator).
pub(crate) const D: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];

/// Breakpoint between Acklam's central and tail approximations (≈ 2σ).
pub(crate) const P_LOW: f64 = 0.02425;
