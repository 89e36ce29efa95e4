// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Common Distribution Utilities** - *Broadcast Arguments and Kernel Drivers*
//!
//! Shared argument handling for univariate kernels whose parameters may be
//! scalars or arrays.
//!
//! ## Broadcasting
//! Each operand, the input included, has length `1` or the common length `n`.
//! [`BroadcastArgs::resolve`] validates the lengths, rejects null slots and
//! reduces every operand to a [`Lane`]: either a splatted scalar or a slice
//! indexed per output element.
//!
//! ## Test Helpers
//! Array extraction and tolerance checks shared by the kernel unit tests.

#[cfg(feature = "simd")]
pub mod simd;
/// Scalar implementations of the broadcast kernel drivers.
pub mod std;

use minarrow::{Bitmask, FloatArray, Vec64};

use crate::errors::KernelError;
use crate::utils::{broadcast_len, count_nulls};

/// A distribution parameter supplied either as a scalar or per element.
///
/// Arrays broadcast against the input: length `1` applies to every element,
/// otherwise the length must match the output. `Nullable` carries an Arrow
/// validity bitmap; any null slot makes the kernel fail with
/// `KernelError::UnsupportedType`.
#[derive(Clone, Copy)]
pub enum Param<'a> {
    Scalar(f64),
    Array(&'a [f64]),
    Nullable(&'a [f64], &'a Bitmask),
}

impl<'a> Param<'a> {
    /// Broadcast length of the parameter; scalars count as `1`.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Param::Scalar(_) => 1,
            Param::Array(v) | Param::Nullable(v, _) => v.len(),
        }
    }

    /// True for an empty array parameter.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<f64> for Param<'_> {
    #[inline]
    fn from(v: f64) -> Self {
        Param::Scalar(v)
    }
}

impl<'a> From<&'a [f64]> for Param<'a> {
    #[inline]
    fn from(v: &'a [f64]) -> Self {
        Param::Array(v)
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for Param<'a> {
    #[inline]
    fn from(v: &'a [f64; N]) -> Self {
        Param::Array(v)
    }
}

impl<'a> From<&'a Vec64<f64>> for Param<'a> {
    #[inline]
    fn from(v: &'a Vec64<f64>) -> Self {
        Param::Array(&v[..])
    }
}

impl<'a> From<&'a FloatArray<f64>> for Param<'a> {
    #[inline]
    fn from(arr: &'a FloatArray<f64>) -> Self {
        match arr.null_mask.as_ref() {
            Some(mask) => Param::Nullable(&arr.data[..], mask),
            None => Param::Array(&arr.data[..]),
        }
    }
}

/// A null-free operand reduced for per-element access.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lane<'a> {
    /// One value shared by every element.
    Splat(f64),
    /// One value per output element.
    Slice(&'a [f64]),
}

impl<'a> Lane<'a> {
    /// Value for output element `i`.
    #[inline(always)]
    pub fn at(self, i: usize) -> f64 {
        match self {
            Lane::Splat(v) => v,
            Lane::Slice(s) => s[i],
        }
    }

    /// The shared value when the operand does not vary per element.
    #[inline(always)]
    pub fn splat(self) -> Option<f64> {
        match self {
            Lane::Splat(v) => Some(v),
            Lane::Slice(_) => None,
        }
    }

    #[inline(always)]
    fn from_slice(v: &'a [f64]) -> Self {
        if v.len() == 1 { Lane::Splat(v[0]) } else { Lane::Slice(v) }
    }
}

/// Validated, broadcast-ready arguments for a `(input, loc, scale_1, scale_2)` kernel.
#[derive(Clone, Copy, Debug)]
pub struct BroadcastArgs<'a> {
    pub input: Lane<'a>,
    pub loc: Lane<'a>,
    pub scale_1: Lane<'a>,
    pub scale_2: Lane<'a>,
    /// Output length.
    pub len: usize,
    /// Whether the caller supplied a validity mask for the input.
    pub has_mask: bool,
}

impl<'a> BroadcastArgs<'a> {
    /// Checks null slots and broadcast lengths, then reduces every operand to a [`Lane`].
    ///
    /// # Errors
    /// - `KernelError::UnsupportedType` if the input or a nullable parameter holds a null
    /// - `KernelError::LengthMismatch` if the operands cannot be broadcast together
    pub fn resolve(
        fname: &str,
        input_name: &str,
        input: &'a [f64],
        loc: Param<'a>,
        scale_1: Param<'a>,
        scale_2: Param<'a>,
        null_mask: Option<&Bitmask>,
        null_count: Option<usize>,
    ) -> Result<Self, KernelError> {
        // a supplied mask is authoritative; the count alone only speaks without one
        let nulls = match null_mask {
            Some(mask) => count_nulls(mask, input.len()),
            None => null_count.unwrap_or(0),
        };
        if nulls > 0 {
            return Err(null_error(fname, input_name, nulls));
        }

        let params = [("loc", loc), ("scale_1", scale_1), ("scale_2", scale_2)];
        for (name, p) in params.iter() {
            if let Param::Nullable(v, mask) = p {
                let nulls = count_nulls(mask, v.len());
                if nulls > 0 {
                    return Err(null_error(fname, name, nulls));
                }
            }
        }

        let len = broadcast_len(
            fname,
            &[
                (input_name, input.len()),
                ("loc", loc.len()),
                ("scale_1", scale_1.len()),
                ("scale_2", scale_2.len()),
            ],
        )?;

        Ok(BroadcastArgs {
            input: Lane::from_slice(input),
            loc: param_lane(loc),
            scale_1: param_lane(scale_1),
            scale_2: param_lane(scale_2),
            len,
            has_mask: null_mask.is_some(),
        })
    }

    /// `(loc, scale_1, scale_2)` when none of the parameters vary per element.
    #[inline]
    pub fn scalar_params(&self) -> Option<(f64, f64, f64)> {
        Some((self.loc.splat()?, self.scale_1.splat()?, self.scale_2.splat()?))
    }

    /// Output validity mask: all-valid when the caller supplied one, otherwise absent.
    #[inline]
    pub fn out_mask(&self) -> Option<Bitmask> {
        if self.has_mask {
            Some(Bitmask::new_set_all(self.len, true))
        } else {
            None
        }
    }
}

#[inline]
fn param_lane(p: Param<'_>) -> Lane<'_> {
    match p {
        Param::Scalar(v) => Lane::Splat(v),
        Param::Array(v) | Param::Nullable(v, _) => Lane::from_slice(v),
    }
}

fn null_error(fname: &str, arg: &str, nulls: usize) -> KernelError {
    log::debug!("{fname}: rejecting `{arg}` with {nulls} null slot(s)");
    KernelError::UnsupportedType(format!(
        "{fname}: `{arg}` contains {nulls} null value(s); nulls have no floating-point \
         encoding, pass NaN explicitly for missing values"
    ))
}

// Common test helpers

/// Test Helper: unwrap `FloatArray`, assert *no* null mask, return data.
#[cfg(test)]
pub(crate) fn dense_data(arr: FloatArray<f64>) -> minarrow::Buffer<f64> {
    assert!(arr.null_mask.is_none(), "unexpected mask on dense path");
    arr.data
}

/// Create a mask of given length with exactly the lane `idx` null.
#[cfg(test)]
pub(crate) fn single_null_mask(len: usize, idx: usize) -> Bitmask {
    let mut m = Bitmask::new_set_all(len, true);
    unsafe { m.set_unchecked(idx, false) };
    m
}

/// Assert absolute difference ≤ `tol`, treating matching NaN/inf as equal.
#[cfg(test)]
pub(crate) fn assert_close(a: f64, b: f64, tol: f64) {
    if b.is_nan() {
        assert!(a.is_nan(), "assert_close failed: expected NaN, got {}", a);
        return;
    }
    if b.is_infinite() {
        assert_eq!(a, b, "assert_close failed: expected {}, got {}", b, a);
        return;
    }
    assert!(
        (a - b).abs() < tol,
        "assert_close failed: {} vs {} (tol={})",
        a,
        b,
        tol
    );
}

#[cfg(test)]
mod tests {
    use minarrow::vec64;

    use super::*;

    fn resolve<'a>(
        x: &'a [f64],
        loc: Param<'a>,
        s1: Param<'a>,
        s2: Param<'a>,
    ) -> Result<BroadcastArgs<'a>, KernelError> {
        BroadcastArgs::resolve("test_kernel", "x", x, loc, s1, s2, None, None)
    }

    #[test]
    fn scalars_splat_and_arrays_slice() {
        let x = vec64![1.0, 2.0, 3.0];
        let s1 = vec64![1.0, 2.0, 3.0];
        let args = resolve(&x, 0.0.into(), (&s1).into(), (&[2.0][..]).into()).unwrap();
        assert_eq!(args.len, 3);
        assert_eq!(args.loc, Lane::Splat(0.0));
        assert_eq!(args.scale_2, Lane::Splat(2.0));
        assert_eq!(args.scale_1.at(2), 3.0);
        assert!(args.scalar_params().is_none());
        assert!(args.out_mask().is_none());
    }

    #[test]
    fn scalar_input_broadcasts_against_parameter_arrays() {
        let s2 = [2.0, 3.0, 4.0, 5.0];
        let args = resolve(&[1.0], 1.0.into(), 1.0.into(), (&s2).into()).unwrap();
        assert_eq!(args.len, 4);
        assert_eq!(args.input.at(3), 1.0);
        assert_eq!(args.scale_2.at(3), 5.0);
    }

    #[test]
    fn incompatible_lengths_error() {
        let x = [1.0, 2.0, 3.0];
        let loc = [0.0, 1.0];
        let err = resolve(&x, (&loc).into(), 1.0.into(), 1.0.into()).err().unwrap();
        assert!(matches!(err, KernelError::LengthMismatch(_)));
    }

    #[test]
    fn input_nulls_are_rejected() {
        let x = vec64![1.0, 2.0, 3.0];
        let mask = single_null_mask(3, 1);
        let err = BroadcastArgs::resolve(
            "test_kernel",
            "x",
            &x,
            0.0.into(),
            1.0.into(),
            1.0.into(),
            Some(&mask),
            None,
        )
        .err()
        .unwrap();
        assert_eq!(
            err.to_string(),
            "Unsupported type: test_kernel: `x` contains 1 null value(s); nulls have no \
             floating-point encoding, pass NaN explicitly for missing values"
        );
    }

    #[test]
    fn all_valid_mask_passes_and_is_reflected() {
        let x = vec64![1.0, 2.0];
        let mask = Bitmask::new_set_all(2, true);
        let args = BroadcastArgs::resolve(
            "test_kernel",
            "x",
            &x,
            0.0.into(),
            1.0.into(),
            1.0.into(),
            Some(&mask),
            None,
        )
        .unwrap();
        let out = args.out_mask().unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.get(0) && out.get(1));
    }

    #[test]
    fn mask_nulls_win_over_a_zero_count() {
        let x = vec64![0.1, 0.2, 0.3];
        let mask = single_null_mask(3, 1);
        let err = BroadcastArgs::resolve(
            "test_kernel",
            "x",
            &x,
            0.0.into(),
            1.0.into(),
            1.0.into(),
            Some(&mask),
            Some(0),
        )
        .err()
        .unwrap();
        assert!(matches!(err, KernelError::UnsupportedType(_)));

        // a count without a mask is still honoured
        let err = BroadcastArgs::resolve(
            "test_kernel",
            "x",
            &x,
            0.0.into(),
            1.0.into(),
            1.0.into(),
            None,
            Some(2),
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("2 null value(s)"));
    }

    #[test]
    fn nullable_parameter_nulls_are_rejected() {
        let x = vec64![1.0, 1.0, 1.0, 1.0];
        let s1 = vec64![1.0, -1.0, 1.0, 0.0];
        let mask = single_null_mask(4, 3);
        let err = resolve(&x, 1.0.into(), Param::Nullable(&s1, &mask), 2.0.into())
            .err()
            .unwrap();
        match err {
            KernelError::UnsupportedType(msg) => assert!(msg.contains("`scale_1`")),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn float_array_parameter_with_clean_mask_is_accepted() {
        let mut arr = FloatArray::<f64>::from_slice(&[1.0, 2.0]);
        arr.null_mask = Some(Bitmask::new_set_all(2, true));
        let x = [0.5, 0.5];
        let args = resolve(&x, 0.0.into(), (&arr).into(), 1.0.into()).unwrap();
        assert_eq!(args.scale_1.at(1), 2.0);
    }
}
