// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Split-Normal SIMD Implementations**
//!
//! SIMD density kernel for the common case of scalar parameters.
//!
//! ## SIMD Vector Lane Configuration
//! - **Lane width**: configured by `W64` constant (8×f64 on AVX-512, 4×f64 on AVX2)
//! - **Branch selection**: a lane mask on `x < loc` selects the active scale
//! - **Automatic fallback**: per-element parameters, invalid scales and unaligned
//!   input all take the scalar path
include!(concat!(env!("OUT_DIR"), "/simd_lanes.rs"));

use std::simd::cmp::SimdPartialOrd;
use std::simd::{Simd, StdFloat};

use minarrow::Vec64;

use super::std::{half_total, split_normal_pdf_scalar, split_normal_pdf_std, valid_scales};
use crate::kernels::scientific::distributions::shared::constants::INV_SQRT_2PI;
use crate::kernels::scientific::distributions::univariate::common::simd::dense_univariate_kernel_f64_simd;
use crate::kernels::scientific::distributions::univariate::common::{BroadcastArgs, Lane};

/// Split-normal PDF, vectorised over `x` when `loc`, `scale_1` and `scale_2` are scalars.
#[inline(always)]
pub fn split_normal_pdf_simd(args: &BroadcastArgs<'_>) -> Vec64<f64> {
    const N: usize = W64;

    let (x, (loc, scale_1, scale_2)) = match (args.input, args.scalar_params()) {
        (Lane::Slice(x), Some(params)) if valid_scales(params.1, params.2) => (x, params),
        _ => {
            log::trace!("split_normal_pdf: scalar path for per-element parameters");
            return split_normal_pdf_std(args);
        }
    };

    let norm = INV_SQRT_2PI / half_total(scale_1, scale_2);
    let loc_v = Simd::<f64, N>::splat(loc);
    let s1_v = Simd::<f64, N>::splat(scale_1);
    let s2_v = Simd::<f64, N>::splat(scale_2);
    let norm_v = Simd::<f64, N>::splat(norm);
    let half_v = Simd::<f64, N>::splat(0.5);

    let simd_body = |x_v: Simd<f64, N>| {
        // NaN lanes compare false and fall to the upper branch, as in the scalar body
        let scale = x_v.simd_lt(loc_v).select(s1_v, s2_v);
        let z = (x_v - loc_v) / scale;
        norm_v * (-(z * z) * half_v).exp()
    };

    let scalar_body = |xi: f64| split_normal_pdf_scalar(xi, loc, scale_1, scale_2);

    dense_univariate_kernel_f64_simd::<N, _, _>(x, simd_body, scalar_body)
}
