// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Split-Normal Gradients** - *Closed-Form Partial Derivatives*
//!
//! Each scalar body returns `[∂input, ∂loc, ∂scale_1, ∂scale_2]`.
//!
//! With `S = scale_1 + scale_2`, `z = (x − loc)/scale_k` and `f` the density:
//! - pdf: `∂x = −f·z/scale_k`, `∂scale_k = −f/S + f·z²/scale_k`, `∂scale_other = −f/S`
//! - cdf: `∂x = f`; the scale partials combine the mass weight `2·scale_k/S`
//!   with the half-normal tail of the active branch
//! - quantile: implicit differentiation of `cdf(x) = p`
//!
//! A point at infinite distance from the mode has zero sensitivity to every
//! argument, so `±inf` inputs yield zero gradients for the pdf and cdf.

use minarrow::Vec64;

use crate::kernels::scientific::distributions::shared::scalar::{
    std_normal_cdf, std_normal_pdf, std_normal_sf,
};
use crate::kernels::scientific::distributions::univariate::common::BroadcastArgs;
use crate::kernels::scientific::distributions::univariate::common::std::broadcast_kernel_f64x4_std;

use super::std::{half_total, split_normal_quantile_scalar, valid_scales};

const NAN_GRAD: [f64; 4] = [f64::NAN; 4];

/// Gradient of the split-normal density.
#[inline(always)]
pub fn split_normal_pdf_grad_scalar(x: f64, loc: f64, scale_1: f64, scale_2: f64) -> [f64; 4] {
    if !valid_scales(scale_1, scale_2) {
        return NAN_GRAD;
    }
    let h = half_total(scale_1, scale_2);
    let left = x < loc;
    let scale = if left { scale_1 } else { scale_2 };
    let z = (x - loc) / scale;
    if z.is_nan() {
        return NAN_GRAD;
    }
    if z.is_infinite() {
        return [0.0; 4];
    }

    let f = std_normal_pdf(z) / h;
    let d_x = -f * z / scale;
    let d_other = -0.5 * (f / h);
    let d_own = d_other + f * z * z / scale;
    let (d_s1, d_s2) = if left { (d_own, d_other) } else { (d_other, d_own) };
    [d_x, -d_x, d_s1, d_s2]
}

/// Gradient of the split-normal CDF.
#[inline(always)]
pub fn split_normal_cdf_grad_scalar(x: f64, loc: f64, scale_1: f64, scale_2: f64) -> [f64; 4] {
    if !valid_scales(scale_1, scale_2) {
        return NAN_GRAD;
    }
    // 2·scale_k·m/S² with h = S/2
    let h = half_total(scale_1, scale_2);
    let weigh = |scale: f64, m: f64| 0.5 * (scale / h) * (m / h);

    if x < loc {
        let z = (x - loc) / scale_1;
        if z.is_nan() {
            return NAN_GRAD;
        }
        let f = std_normal_pdf(z) / h;
        let fz = if z.is_infinite() { 0.0 } else { f * z };
        let mass = std_normal_cdf(z);
        [f, -f, weigh(scale_2, mass) - fz, -weigh(scale_1, mass)]
    } else {
        let z = (x - loc) / scale_2;
        if z.is_nan() {
            return NAN_GRAD;
        }
        let f = std_normal_pdf(z) / h;
        let fz = if z.is_infinite() { 0.0 } else { f * z };
        let tail = std_normal_sf(z);
        [f, -f, weigh(scale_2, tail), -weigh(scale_1, tail) - fz]
    }
}

/// Gradient of the split-normal quantile.
///
/// At `p ∈ {0, 1}` the quantile is infinite and `∂p` is `+inf` with the
/// remaining components `0`.
#[inline(always)]
pub fn split_normal_quantile_grad_scalar(
    p: f64,
    loc: f64,
    scale_1: f64,
    scale_2: f64,
) -> [f64; 4] {
    if p.is_nan() || p < 0.0 || p > 1.0 {
        return NAN_GRAD;
    }
    if p == 0.0 || p == 1.0 {
        return [f64::INFINITY, 0.0, 0.0, 0.0];
    }
    if !valid_scales(scale_1, scale_2) {
        return NAN_GRAD;
    }

    let x = split_normal_quantile_scalar(p, loc, scale_1, scale_2);
    let [f, _, c_s1, c_s2] = split_normal_cdf_grad_scalar(x, loc, scale_1, scale_2);
    [1.0 / f, 1.0, -c_s1 / f, -c_s2 / f]
}

/// Split-normal PDF gradient over broadcast arguments.
#[inline(always)]
pub fn split_normal_pdf_grad_std(args: &BroadcastArgs<'_>) -> [Vec64<f64>; 4] {
    broadcast_kernel_f64x4_std(args, split_normal_pdf_grad_scalar)
}

/// Split-normal CDF gradient over broadcast arguments.
#[inline(always)]
pub fn split_normal_cdf_grad_std(args: &BroadcastArgs<'_>) -> [Vec64<f64>; 4] {
    broadcast_kernel_f64x4_std(args, split_normal_cdf_grad_scalar)
}

/// Split-normal quantile gradient over broadcast arguments.
#[inline(always)]
pub fn split_normal_quantile_grad_std(args: &BroadcastArgs<'_>) -> [Vec64<f64>; 4] {
    broadcast_kernel_f64x4_std(args, split_normal_quantile_grad_scalar)
}
