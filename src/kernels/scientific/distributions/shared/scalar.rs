// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Standard Normal Building Blocks** - *φ, Φ, Q and Φ⁻¹*
//!
//! Scalar standard normal functions composed by the split-normal kernels. The
//! complementary error function is `libm`'s port of the fdlibm routine, good to
//! about one ulp; the inverse CDF is Acklam's rational approximation polished by
//! one Halley step, with `statrs`'s `erfc⁻¹` covering the deepest tail.

use libm::erfc;
use statrs::function::erf::erfc_inv;

use crate::config::QUANTILE_ERFC_TAIL;
use crate::kernels::scientific::distributions::shared::constants::*;

/// Standard normal density φ(z).
#[inline(always)]
pub fn std_normal_pdf(z: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * z * z).exp()
}

/// Standard normal CDF Φ(z), evaluated as `½·erfc(−z/√2)` so the lower tail
/// keeps full relative precision.
#[inline(always)]
pub fn std_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Standard normal survival function Q(z) = 1 − Φ(z), accurate in the upper tail.
#[inline(always)]
pub fn std_normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / SQRT_2)
}

/// Core inverse standard normal for left tail probabilities.
///
/// Computes Φ⁻¹(p) for p ∈ (0, 0.5] using Acklam's rational approximation
/// (relative error ≈ 1.15e-9 before refinement).
#[inline(always)]
pub fn inv_std_normal_core(p: f64) -> f64 {
    debug_assert!(p > 0.0 && p <= 0.5);

    if p > P_LOW {
        // central region
        let r = p - 0.5;
        let s = r * r;
        let num = (((((A[0] * s + A[1]) * s + A[2]) * s + A[3]) * s + A[4]) * s + A[5]) * r;
        let den = ((((B[0] * s + B[1]) * s + B[2]) * s + B[3]) * s + B[4]) * s + 1.0;
        num / den
    } else {
        // lower tail; `num` is already negative
        let r = (-2.0 * p.ln()).sqrt();
        let num = ((((C[0] * r + C[1]) * r + C[2]) * r + C[3]) * r + C[4]) * r + C[5];
        let den = (((D[0] * r + D[1]) * r + D[2]) * r + D[3]) * r + 1.0;
        num / den
    }
}

/// Inverse CDF Φ⁻¹(p) of the standard normal distribution.
///
/// # Domain and Range
/// - `p = 0` returns `-inf`, `p = 1` returns `+inf`, `p = 0.5` returns `0`
/// - `p` outside `[0, 1]` or `NaN` returns `NaN`
///
/// Away from the extreme tails the Halley step against the ulp-accurate Φ leaves
/// an error of a few ulps. Below `QUANTILE_ERFC_TAIL` the value comes from
/// `−√2·erfc⁻¹(2p)` directly.
pub fn std_normal_quantile(p: f64) -> f64 {
    if p.is_nan() || p < 0.0 || p > 1.0 {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }
    if p == 0.5 {
        return 0.0;
    }

    // symmetry reduction onto the lower half
    let (q, sign) = if p < 0.5 { (p, 1.0) } else { (1.0 - p, -1.0) };

    if q < QUANTILE_ERFC_TAIL {
        return sign * -SQRT_2 * erfc_inv(2.0 * q);
    }

    let mut z = inv_std_normal_core(q);

    // Halley: f = Φ(z) − q, f' = φ(z), f'' = −z·φ(z)
    let u = (std_normal_cdf(z) - q) / std_normal_pdf(z);
    z -= u / (1.0 + 0.5 * z * u);

    sign * z
}

#[cfg(test)]
mod tests {
    use super::*;

    // Expected values from scipy.stats.norm (SciPy 1.16).

    #[test]
    fn pdf_known_values() {
        // scipy.stats.norm.pdf([0, 1, -2]) == [0.3989422804014327, 0.24197072451914337, 0.05399096651318806]
        assert!((std_normal_pdf(0.0) - 0.3989422804014327).abs() < 1e-15);
        assert!((std_normal_pdf(1.0) - 0.24197072451914337).abs() < 1e-15);
        assert!((std_normal_pdf(-2.0) - 0.05399096651318806).abs() < 1e-15);
        assert_eq!(std_normal_pdf(f64::INFINITY), 0.0);
    }

    #[test]
    fn cdf_and_sf_known_values() {
        // scipy.stats.norm.cdf(1.0) == 0.8413447460685429
        assert!((std_normal_cdf(1.0) - 0.8413447460685429).abs() < 1e-15);
        // scipy.stats.norm.cdf(-1.96) == 0.024997895148220435
        assert!((std_normal_cdf(-1.96) - 0.024997895148220435).abs() < 1e-15);
        // scipy.stats.norm.sf(8.0) == 6.220960574271819e-16
        assert!((std_normal_sf(8.0) / 6.220960574271819e-16 - 1.0).abs() < 1e-10);
        assert_eq!(std_normal_cdf(0.0), 0.5);
        assert_eq!(std_normal_cdf(f64::NEG_INFINITY), 0.0);
        assert_eq!(std_normal_sf(f64::INFINITY), 0.0);
        assert!(std_normal_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn quantile_known_values() {
        // scipy.stats.norm.ppf([0.001, 0.025, 0.975]) ==
        // [-3.090232306167813, -1.9599639845400545, 1.959963984540054]
        assert!((std_normal_quantile(0.001) + 3.090232306167813).abs() < 1e-12);
        assert!((std_normal_quantile(0.025) + 1.9599639845400545).abs() < 1e-12);
        assert!((std_normal_quantile(0.975) - 1.959963984540054).abs() < 1e-12);
        // scipy.stats.norm.ppf(1e-10) == -6.361340902404056
        assert!((std_normal_quantile(1e-10) + 6.361340902404056).abs() < 1e-9);
        assert_eq!(std_normal_quantile(0.5), 0.0);
    }

    #[test]
    fn quantile_deep_tail_uses_erfc_inverse() {
        // scipy.stats.norm.ppf(1e-300) == -37.0470962993612
        let z = std_normal_quantile(1e-300);
        assert!((z + 37.0470962993612).abs() < 1e-8, "{z}");
        assert!(z.is_finite());
    }

    #[test]
    fn quantile_domain() {
        assert_eq!(std_normal_quantile(0.0), f64::NEG_INFINITY);
        assert_eq!(std_normal_quantile(1.0), f64::INFINITY);
        assert!(std_normal_quantile(-0.1).is_nan());
        assert!(std_normal_quantile(1.1).is_nan());
        assert!(std_normal_quantile(f64::NAN).is_nan());
    }

    #[test]
    fn quantile_inverts_cdf() {
        for &z in &[-5.0, -2.5, -0.3, 0.0, 0.7, 2.2, 4.0] {
            let back = std_normal_quantile(std_normal_cdf(z));
            assert!((back - z).abs() < 1e-9, "z={z} back={back}");
        }
    }
}
