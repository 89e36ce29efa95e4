// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Split-Normal Scalar Implementations**
//!
//! Scalar bodies for the split-normal density, log-density, CDF and quantile,
//! and the broadcast kernels that apply them elementwise.
//!
//! Every body is total: invalid scales return `NaN` for that element rather
//! than failing the batch.

use minarrow::Vec64;

use crate::kernels::scientific::distributions::shared::constants::*;
use crate::kernels::scientific::distributions::shared::scalar::{
    std_normal_cdf, std_normal_pdf, std_normal_quantile, std_normal_sf,
};
use crate::kernels::scientific::distributions::univariate::common::BroadcastArgs;
use crate::kernels::scientific::distributions::univariate::common::std::broadcast_kernel_f64_std;

/// Both scales finite and strictly positive.
#[inline(always)]
pub(crate) fn valid_scales(scale_1: f64, scale_2: f64) -> bool {
    scale_1.is_finite() && scale_1 > 0.0 && scale_2.is_finite() && scale_2 > 0.0
}

/// Scale of the half that `x` falls in; `x == loc` takes the upper half.
#[inline(always)]
pub(crate) fn branch_scale(x: f64, loc: f64, scale_1: f64, scale_2: f64) -> f64 {
    if x < loc { scale_1 } else { scale_2 }
}

/// Half of `S = scale_1 + scale_2`, finite for any pair of finite scales.
#[inline(always)]
pub(crate) fn half_total(scale_1: f64, scale_2: f64) -> f64 {
    let s = scale_1 + scale_2;
    if s.is_finite() { 0.5 * s } else { 0.5 * scale_1 + 0.5 * scale_2 }
}

/// Split-normal density `(2/S)·φ((x − loc)/scale_k)` with `S = scale_1 + scale_2`.
#[inline(always)]
pub fn split_normal_pdf_scalar(x: f64, loc: f64, scale_1: f64, scale_2: f64) -> f64 {
    if !valid_scales(scale_1, scale_2) {
        return f64::NAN;
    }
    let z = (x - loc) / branch_scale(x, loc, scale_1, scale_2);
    std_normal_pdf(z) / half_total(scale_1, scale_2)
}

/// Natural log of the split-normal density.
#[inline(always)]
pub fn split_normal_logpdf_scalar(x: f64, loc: f64, scale_1: f64, scale_2: f64) -> f64 {
    if !valid_scales(scale_1, scale_2) {
        return f64::NAN;
    }
    let z = (x - loc) / branch_scale(x, loc, scale_1, scale_2);
    -half_total(scale_1, scale_2).ln() - HALF_LN_2PI - 0.5 * z * z
}

/// Split-normal CDF.
///
/// Below the mode the lower half scales Φ. Above it the mass `w = scale_1/S`
/// is added to the upper half's share of `½ − Q` until `Q` drops under `¼`;
/// past that point `1 − (2·scale_2/S)·Q` keeps probabilities near 1 precise.
#[inline(always)]
pub fn split_normal_cdf_scalar(x: f64, loc: f64, scale_1: f64, scale_2: f64) -> f64 {
    if !valid_scales(scale_1, scale_2) {
        return f64::NAN;
    }
    let h = half_total(scale_1, scale_2);
    if x < loc {
        scale_1 / h * std_normal_cdf((x - loc) / scale_1)
    } else {
        let tail = std_normal_sf((x - loc) / scale_2);
        if tail >= 0.25 {
            0.5 * (scale_1 / h) + scale_2 / h * (0.5 - tail)
        } else {
            1.0 - scale_2 / h * tail
        }
    }
}

/// Split-normal quantile (inverse CDF).
///
/// `p = 0` and `p = 1` map to `∓inf` before the scales are inspected.
#[inline(always)]
pub fn split_normal_quantile_scalar(p: f64, loc: f64, scale_1: f64, scale_2: f64) -> f64 {
    if p.is_nan() || p < 0.0 || p > 1.0 {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }
    if !valid_scales(scale_1, scale_2) {
        return f64::NAN;
    }

    let h = half_total(scale_1, scale_2);
    if p < 0.5 * (scale_1 / h) {
        loc + scale_1 * std_normal_quantile(p * (h / scale_1))
    } else {
        loc - scale_2 * std_normal_quantile((1.0 - p) * (h / scale_2))
    }
}

/// Split-normal PDF over broadcast arguments.
#[inline(always)]
pub fn split_normal_pdf_std(args: &BroadcastArgs<'_>) -> Vec64<f64> {
    broadcast_kernel_f64_std(args, split_normal_pdf_scalar)
}

/// Split-normal log-PDF over broadcast arguments.
#[inline(always)]
pub fn split_normal_logpdf_std(args: &BroadcastArgs<'_>) -> Vec64<f64> {
    broadcast_kernel_f64_std(args, split_normal_logpdf_scalar)
}

/// Split-normal CDF over broadcast arguments.
#[inline(always)]
pub fn split_normal_cdf_std(args: &BroadcastArgs<'_>) -> Vec64<f64> {
    broadcast_kernel_f64_std(args, split_normal_cdf_scalar)
}

/// Split-normal quantile over broadcast arguments.
#[inline(always)]
pub fn split_normal_quantile_std(args: &BroadcastArgs<'_>) -> Vec64<f64> {
    broadcast_kernel_f64_std(args, split_normal_quantile_scalar)
}
