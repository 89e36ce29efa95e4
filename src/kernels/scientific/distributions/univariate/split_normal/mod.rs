// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Split-Normal Distribution Module** - *Asymmetric Gaussian with a Shared Mode*
//!
//! Two half-normal densities joined at the mode `loc`: scale `scale_1` governs
//! the left half and `scale_2` the right half, and the whole is renormalised so
//! the left half carries mass `scale_1 / (scale_1 + scale_2)`. With equal
//! scales it is exactly the normal distribution.
//!
//! ## Mathematical Definition
//! With `S = scale_1 + scale_2` and `scale_k` the scale of the half containing `x`:
//! - **PDF**: `f(x) = (2/S)·φ((x − loc)/scale_k)`
//! - **CDF**: `(2·scale_1/S)·Φ((x − loc)/scale_1)` below the mode,
//!   `1 − (2·scale_2/S)·Q((x − loc)/scale_2)` from the mode up
//! - **Quantile**: branch on `p < scale_1/S`, then a standard normal inverse
//!
//! The mode itself belongs to the upper half.
//!
//! ## Broadcasting
//! `loc`, `scale_1` and `scale_2` accept anything convertible to
//! [`Param`]: an `f64`, a slice, a `Vec64` or a `FloatArray`. Every operand has
//! length `1` or the common output length.
//!
//! ## Usage Examples
//! ```rust,ignore
//! use minarrow::vec64;
//! use split_normal::kernels::scientific::distributions::univariate::split_normal::*;
//!
//! let x = vec64![-2.0, -0.5, 0.0, 1.0, 2.0, 3.0, 4.0];
//! let pdf = split_normal_pdf(&x, 1.0, 1.0, 2.0, None, None).unwrap();
//! let cdf = split_normal_cdf(&x, 1.0, 1.0, 2.0, None, None).unwrap();
//!
//! // per-element scales broadcast against a scalar input
//! let s1 = vec64![1.0, 2.0, 3.0];
//! let q = split_normal_quantile(&[0.5], 0.0, &s1, 1.0, None, None).unwrap();
//!
//! // gradients with respect to the input and every parameter
//! let g = split_normal_cdf_grad(&x, 1.0, 1.0, 2.0, None, None).unwrap();
//! assert_eq!(g.wrt_input.data, pdf.data);
//! ```

mod grad;
#[cfg(feature = "simd")]
mod simd;
mod std;

use minarrow::{Bitmask, FloatArray, Vec64};
use rand::Rng;

pub use self::grad::{
    split_normal_cdf_grad_scalar, split_normal_pdf_grad_scalar, split_normal_quantile_grad_scalar,
};
pub use self::std::{
    split_normal_cdf_scalar, split_normal_logpdf_scalar, split_normal_pdf_scalar,
    split_normal_quantile_scalar,
};
use self::std::valid_scales;
use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::constants::SQRT_2_OVER_PI;
use crate::kernels::scientific::distributions::shared::sampler::split_normal_vec;
use crate::kernels::scientific::distributions::univariate::common::{BroadcastArgs, Param};

/// Partial derivatives of a split-normal function, one array per argument.
///
/// Every array has the broadcast output length.
#[derive(Debug, Clone)]
pub struct SplitNormalGrad {
    /// With respect to `x` (or `p` for the quantile).
    pub wrt_input: FloatArray<f64>,
    pub wrt_loc: FloatArray<f64>,
    pub wrt_scale_1: FloatArray<f64>,
    pub wrt_scale_2: FloatArray<f64>,
}

/// Closed-form summary moments of a split-normal distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitNormalMoments {
    pub mode: f64,
    pub mean: f64,
    pub variance: f64,
}

/// Split-normal PDF - vectorised, SIMD where available.
///
/// # Parameters
/// - `x`: input data
/// - `loc`: mode, scalar or per element
/// - `scale_1`: scale below the mode
/// - `scale_2`: scale at and above the mode
/// - `null_mask`: optional input null bitmap
/// - `null_count`: optional input null count, used only when no mask is given
///
/// # Errors
/// - `KernelError::UnsupportedType` if any argument holds a null
/// - `KernelError::LengthMismatch` if the arguments cannot be broadcast
///
/// Invalid scales yield `NaN` for the affected elements.
#[inline(always)]
pub fn split_normal_pdf<'a>(
    x: &'a [f64],
    loc: impl Into<Param<'a>>,
    scale_1: impl Into<Param<'a>>,
    scale_2: impl Into<Param<'a>>,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    let args = BroadcastArgs::resolve(
        "split_normal_pdf",
        "x",
        x,
        loc.into(),
        scale_1.into(),
        scale_2.into(),
        null_mask,
        null_count,
    )?;

    #[cfg(feature = "simd")]
    let out = simd::split_normal_pdf_simd(&args);

    #[cfg(not(feature = "simd"))]
    let out = std::split_normal_pdf_std(&args);

    Ok(into_array(out, &args))
}

/// Split-normal log-PDF.
///
/// Same arguments, errors and `NaN` policy as [`split_normal_pdf`];
/// `x = ±inf` gives `-inf`.
#[inline(always)]
pub fn split_normal_logpdf<'a>(
    x: &'a [f64],
    loc: impl Into<Param<'a>>,
    scale_1: impl Into<Param<'a>>,
    scale_2: impl Into<Param<'a>>,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    let args = BroadcastArgs::resolve(
        "split_normal_logpdf",
        "x",
        x,
        loc.into(),
        scale_1.into(),
        scale_2.into(),
        null_mask,
        null_count,
    )?;
    Ok(into_array(std::split_normal_logpdf_std(&args), &args))
}

/// Split-normal CDF.
///
/// # Parameters
/// - `x`: input data
/// - `loc`: mode, scalar or per element
/// - `scale_1`: scale below the mode
/// - `scale_2`: scale at and above the mode
/// - `null_mask`: optional input null bitmap
/// - `null_count`: optional input null count, used only when no mask is given
#[inline(always)]
pub fn split_normal_cdf<'a>(
    x: &'a [f64],
    loc: impl Into<Param<'a>>,
    scale_1: impl Into<Param<'a>>,
    scale_2: impl Into<Param<'a>>,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    let args = BroadcastArgs::resolve(
        "split_normal_cdf",
        "x",
        x,
        loc.into(),
        scale_1.into(),
        scale_2.into(),
        null_mask,
        null_count,
    )?;
    Ok(into_array(std::split_normal_cdf_std(&args), &args))
}

/// Split-normal quantile (inverse CDF).
///
/// `p = 0` gives `-inf` and `p = 1` gives `+inf` whatever the scales;
/// `p` outside `[0, 1]`, `NaN`, or invalid scales give `NaN`.
#[inline(always)]
pub fn split_normal_quantile<'a>(
    p: &'a [f64],
    loc: impl Into<Param<'a>>,
    scale_1: impl Into<Param<'a>>,
    scale_2: impl Into<Param<'a>>,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    let args = BroadcastArgs::resolve(
        "split_normal_quantile",
        "p",
        p,
        loc.into(),
        scale_1.into(),
        scale_2.into(),
        null_mask,
        null_count,
    )?;
    Ok(into_array(std::split_normal_quantile_std(&args), &args))
}

/// Gradient of the split-normal PDF with respect to `x`, `loc`, `scale_1` and `scale_2`.
#[inline(always)]
pub fn split_normal_pdf_grad<'a>(
    x: &'a [f64],
    loc: impl Into<Param<'a>>,
    scale_1: impl Into<Param<'a>>,
    scale_2: impl Into<Param<'a>>,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<SplitNormalGrad, KernelError> {
    let args = BroadcastArgs::resolve(
        "split_normal_pdf_grad",
        "x",
        x,
        loc.into(),
        scale_1.into(),
        scale_2.into(),
        null_mask,
        null_count,
    )?;
    Ok(into_grad(grad::split_normal_pdf_grad_std(&args), &args))
}

/// Gradient of the split-normal CDF; `wrt_input` is the density.
#[inline(always)]
pub fn split_normal_cdf_grad<'a>(
    x: &'a [f64],
    loc: impl Into<Param<'a>>,
    scale_1: impl Into<Param<'a>>,
    scale_2: impl Into<Param<'a>>,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<SplitNormalGrad, KernelError> {
    let args = BroadcastArgs::resolve(
        "split_normal_cdf_grad",
        "x",
        x,
        loc.into(),
        scale_1.into(),
        scale_2.into(),
        null_mask,
        null_count,
    )?;
    Ok(into_grad(grad::split_normal_cdf_grad_std(&args), &args))
}

/// Gradient of the split-normal quantile by implicit differentiation of `cdf(x) = p`.
///
/// `p ∈ {0, 1}` gives `wrt_input = +inf` and zero parameter gradients.
#[inline(always)]
pub fn split_normal_quantile_grad<'a>(
    p: &'a [f64],
    loc: impl Into<Param<'a>>,
    scale_1: impl Into<Param<'a>>,
    scale_2: impl Into<Param<'a>>,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<SplitNormalGrad, KernelError> {
    let args = BroadcastArgs::resolve(
        "split_normal_quantile_grad",
        "p",
        p,
        loc.into(),
        scale_1.into(),
        scale_2.into(),
        null_mask,
        null_count,
    )?;
    Ok(into_grad(grad::split_normal_quantile_grad_std(&args), &args))
}

/// Draws `n` split-normal samples from the thread-local generator.
///
/// # Errors
/// `KernelError::InvalidArguments` unless `loc` is finite and both scales are finite and > 0.
#[inline]
pub fn split_normal_sample(
    n: usize,
    loc: f64,
    scale_1: f64,
    scale_2: f64,
) -> Result<FloatArray<f64>, KernelError> {
    split_normal_sample_with(&mut rand::rng(), n, loc, scale_1, scale_2)
}

/// Draws `n` split-normal samples from `rng`.
#[inline]
pub fn split_normal_sample_with<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    loc: f64,
    scale_1: f64,
    scale_2: f64,
) -> Result<FloatArray<f64>, KernelError> {
    check_scalar_params("split_normal_sample", loc, scale_1, scale_2)?;
    Ok(FloatArray::from_vec64(
        split_normal_vec(rng, n, loc, scale_1, scale_2),
        None,
    ))
}

/// Mode, mean and variance of the split-normal distribution.
///
/// - mean: `loc + √(2/π)·(scale_2 − scale_1)`
/// - variance: `(1 − 2/π)·(scale_2 − scale_1)² + scale_1·scale_2`
pub fn split_normal_moments(
    loc: f64,
    scale_1: f64,
    scale_2: f64,
) -> Result<SplitNormalMoments, KernelError> {
    check_scalar_params("split_normal_moments", loc, scale_1, scale_2)?;
    let d = scale_2 - scale_1;
    Ok(SplitNormalMoments {
        mode: loc,
        mean: loc + SQRT_2_OVER_PI * d,
        variance: (1.0 - core::f64::consts::FRAC_2_PI) * d * d + scale_1 * scale_2,
    })
}

fn check_scalar_params(fname: &str, loc: f64, scale_1: f64, scale_2: f64) -> Result<(), KernelError> {
    if loc.is_finite() && valid_scales(scale_1, scale_2) {
        return Ok(());
    }
    log::debug!("{fname}: rejecting loc={loc}, scale_1={scale_1}, scale_2={scale_2}");
    Err(KernelError::InvalidArguments(format!(
        "{fname}: requires finite `loc` and finite `scale_1`, `scale_2` > 0; \
         got loc={loc}, scale_1={scale_1}, scale_2={scale_2}"
    )))
}

#[inline(always)]
fn into_array(out: Vec64<f64>, args: &BroadcastArgs<'_>) -> FloatArray<f64> {
    FloatArray {
        data: out.into(),
        null_mask: args.out_mask(),
    }
}

#[inline(always)]
fn into_grad(cols: [Vec64<f64>; 4], args: &BroadcastArgs<'_>) -> SplitNormalGrad {
    let [d_input, d_loc, d_s1, d_s2] = cols;
    SplitNormalGrad {
        wrt_input: into_array(d_input, args),
        wrt_loc: into_array(d_loc, args),
        wrt_scale_1: into_array(d_s1, args),
        wrt_scale_2: into_array(d_s2, args),
    }
}

#[cfg(test)]
mod tests {
    use minarrow::{Bitmask, vec64};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::kernels::scientific::distributions::univariate::common::{
        assert_close, dense_data, single_null_mask,
    };

    // see "./tests" for the reference and property suites

    #[test]
    fn pdf_reference_values() {
        let x = vec64![-2.0, -0.5, 0.0, 1.0, 2.0, 3.0, 4.0];
        let expect = [
            0.00295457, 0.08634506, 0.16131382, 0.26596152, 0.23471022, 0.16131382, 0.08634506,
        ];
        let out = dense_data(split_normal_pdf(&x, 1.0, 1.0, 2.0, None, None).unwrap());
        for (a, e) in out.iter().zip(expect.iter()) {
            assert_close(*a, *e, 5e-9);
        }
    }

    #[test]
    fn cdf_mixed_scale_validity_is_elementwise() {
        let s1 = vec64![1.0, -1.0, 1.0, -1.0];
        let s2 = vec64![2.0, 2.0, -2.0, -2.0];
        let out = dense_data(split_normal_cdf(&[1.0], 1.0, &s1, &s2, None, None).unwrap());
        assert_eq!(out.len(), 4);
        assert_close(out[0], 1.0 / 3.0, 1e-15);
        assert!(out[1].is_nan() && out[2].is_nan() && out[3].is_nan());
    }

    #[test]
    fn quantile_boundaries_and_invalid_scales() {
        let p = vec64![0.5, 0.5, 0.5, 0.5, 0.0, 1.0, -2.0, 2.0];
        let s1 = vec64![1.0, -1.0, 1.0, -1.0, 1.0, 1.0, 1.0, 1.0];
        let s2 = vec64![2.0, 2.0, -2.0, -2.0, 2.0, 2.0, 2.0, 2.0];
        let out = dense_data(split_normal_quantile(&p, 1.0, &s1, &s2, None, None).unwrap());
        assert_close(out[0], 1.6372787279287504, 1e-12);
        assert!(out[1].is_nan() && out[2].is_nan() && out[3].is_nan());
        assert_eq!(out[4], f64::NEG_INFINITY);
        assert_eq!(out[5], f64::INFINITY);
        assert!(out[6].is_nan() && out[7].is_nan());
    }

    #[test]
    fn quantile_with_array_parameters() {
        let p = vec64![0.05, 0.95];
        let loc = vec64![-1.0, 1.0];
        let s1 = vec64![1.0, 2.0];
        let s2 = vec64![2.0, 1.0];
        let out = dense_data(split_normal_quantile(&p, &loc, &s1, &s2, None, None).unwrap());
        assert_close(out[0], -2.439531470938456, 1e-12);
        assert_close(out[1], 2.439531470938456, 1e-12);
    }

    #[test]
    fn logpdf_kernel_matches_scalar() {
        let x = vec64![-2.0, 2.0];
        let out = dense_data(split_normal_logpdf(&x, 1.0, 1.0, 2.0, None, None).unwrap());
        assert_close(out[0], -5.824403641312837, 1e-14);
        assert_close(out[1], -1.449403641312837, 1e-14);
    }

    #[test]
    fn empty_input() {
        let out = split_normal_pdf(&[], 0.0, 1.0, 1.0, None, None).unwrap();
        assert_eq!(out.data.len(), 0);
        let g = split_normal_cdf_grad(&[], 0.0, 1.0, 1.0, None, None).unwrap();
        assert_eq!(g.wrt_scale_2.data.len(), 0);
    }

    #[test]
    fn clean_mask_yields_all_valid_mask() {
        let x = vec64![0.0, 1.0, 2.0];
        let mask = Bitmask::new_set_all(3, true);
        let out = split_normal_cdf(&x, 1.0, 1.0, 2.0, Some(&mask), Some(0)).unwrap();
        let m = out.null_mask.as_ref().unwrap();
        assert!((0..3).all(|i| m.get(i)));
    }

    #[test]
    fn null_input_is_unsupported() {
        let x = vec64![0.0, 1.0, 2.0];
        let mask = single_null_mask(3, 2);
        let err = split_normal_pdf(&x, 1.0, 1.0, 2.0, Some(&mask), None).unwrap_err();
        assert!(matches!(err, KernelError::UnsupportedType(_)));
        let err = split_normal_quantile_grad(&x, 1.0, 1.0, 2.0, Some(&mask), Some(1)).unwrap_err();
        assert!(matches!(err, KernelError::UnsupportedType(_)));
    }

    #[test]
    fn null_parameter_is_unsupported() {
        let x = vec64![1.0, 1.0, 1.0, 1.0];
        let s1 = vec64![1.0, -1.0, 1.0, f64::NAN];
        let mask = single_null_mask(4, 3);
        let err =
            split_normal_cdf(&x, 1.0, Param::Nullable(&s1, &mask), 2.0, None, None).unwrap_err();
        assert!(matches!(err, KernelError::UnsupportedType(_)));
    }

    #[test]
    fn mismatched_lengths_error() {
        let x = vec64![0.0, 1.0, 2.0];
        let loc = vec64![0.0, 1.0];
        let err = split_normal_pdf(&x, &loc, 1.0, 1.0, None, None).unwrap_err();
        assert!(matches!(err, KernelError::LengthMismatch(_)));
    }

    #[test]
    fn grad_arrays_share_output_shape() {
        let x = vec64![-1.3, 0.4, 2.7];
        let g = split_normal_pdf_grad(&x, 0.5, 0.8, 1.7, None, None).unwrap();
        assert_close(g.wrt_input.data[0], 0.07141421663025169, 1e-14);
        assert_close(g.wrt_loc.data[1], -0.04947971086809368, 1e-14);
        assert_close(g.wrt_scale_1.data[1], -0.12048309596380814, 1e-14);
        assert_close(g.wrt_scale_2.data[2], 0.0808342939595401, 1e-14);

        let q = split_normal_quantile_grad(&[0.1, 0.9], 0.5, 0.8, 1.7, None, None).unwrap();
        assert_close(q.wrt_input.data[0], 5.218041581336657, 1e-9);
        assert_close(q.wrt_scale_1.data[1], -0.3586008588968107, 1e-9);
        assert_close(q.wrt_scale_2.data[1], 1.6187522541036552, 1e-9);
        assert!(q.wrt_loc.data.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn moments_closed_form() {
        let m = split_normal_moments(0.5, 0.8, 1.7).unwrap();
        assert_eq!(m.mode, 0.5);
        assert_close(m.mean, 1.2180961047225787, 1e-14);
        assert_close(m.variance, 1.6543379843822592, 1e-14);

        let sym = split_normal_moments(2.0, 1.5, 1.5).unwrap();
        assert_eq!(sym.mean, 2.0);
        assert_close(sym.variance, 2.25, 1e-15);
    }

    #[test]
    fn scalar_apis_reject_invalid_parameters() {
        assert!(matches!(
            split_normal_moments(0.0, 0.0, 1.0),
            Err(KernelError::InvalidArguments(_))
        ));
        assert!(matches!(
            split_normal_moments(f64::NAN, 1.0, 1.0),
            Err(KernelError::InvalidArguments(_))
        ));
        assert!(matches!(
            split_normal_sample(10, 0.0, 1.0, f64::INFINITY),
            Err(KernelError::InvalidArguments(_))
        ));
    }

    #[test]
    fn seeded_samples_match_moments() {
        let mut rng = StdRng::seed_from_u64(2025);
        let n = 200_000;
        let draws = split_normal_sample_with(&mut rng, n, 0.5, 0.8, 1.7).unwrap();
        assert_eq!(draws.data.len(), n);
        assert!(draws.null_mask.is_none());

        let mean = draws.data.iter().sum::<f64>() / n as f64;
        let var = draws.data.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n as f64 - 1.0);
        let m = split_normal_moments(0.5, 0.8, 1.7).unwrap();
        assert!((mean - m.mean).abs() < 0.02, "mean {mean} vs {}", m.mean);
        assert!((var - m.variance).abs() < 0.04, "var {var} vs {}", m.variance);
    }

    #[test]
    fn thread_local_sampling() {
        let draws = split_normal_sample(32, -1.0, 2.0, 0.5).unwrap();
        assert_eq!(draws.data.len(), 32);
        assert!(draws.data.iter().all(|v| v.is_finite()));
    }
}
