// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Statistical Distributions Module** - *Split-Normal Probability Kernels*
//!
//! Distribution kernels providing probability density functions (PDFs), cumulative
//! distribution functions (CDFs), quantile functions, analytic gradients and random
//! sampling for the split-normal distribution.
//!
//! ## Core Statistical Functions
//! - **Probability density**: piecewise Gaussian density joined at the mode
//! - **Cumulative distribution**: weighted half-normal CDFs, upper branch evaluated via the survival function
//! - **Quantile functions**: branch selection on the left-mass weight, then a standard normal inverse
//! - **Gradients**: closed-form partial derivatives with respect to the input and every parameter
//! - **Random sampling**: two-piece half-normal draws
//!
//! ## Arrow Integration and Null Handling
//! Inputs are plain `&[f64]` slices with an optional Arrow validity bitmap, and
//! outputs are `minarrow::FloatArray<f64>`. Unlike most kernels in this family,
//! null slots are rejected with `KernelError::UnsupportedType` rather than
//! propagated: the gradients and quantiles here have no meaningful value for a
//! missing element, and a null has no floating-point encoding to carry through.
//!
//! ### Domain Errors
//! We recognise inf and NaN as valid float values (consistent with Apache Arrow
//! semantics). A non-positive or non-finite scale turns the affected output slot
//! into `NaN` without aborting the batch, so mixed parameter arrays evaluate
//! independently per element.
//!
//! ## Disclaimer
//! This implementation is provided on a best-effort basis and is intended for
//! general scientific and engineering use. Reference values in `./tests` were
//! produced with SciPy's normal distribution and closed-form split-normal
//! identities; platform specific differences may impact your results.

/// # **Shared Distribution Utilities** - *Common Infrastructure for Distribution Computing*
///
/// ## Modules
/// - **`constants`**: Mathematical constants and precomputed values
/// - **`sampler`**: Random number generation and sampling utilities
/// - **`scalar`**: Standard normal building blocks
pub mod shared {
    pub mod constants;
    pub mod sampler;
    pub mod scalar;
}

/// # **Univariate Distributions** - *Single-Variable Probability Distributions*
///
/// - **Continuous**: split_normal
/// - **Common utilities**: broadcast parameters, argument resolution and kernel drivers
pub mod univariate {
    // common kernel patterns
    pub mod common;

    // distributions
    pub mod split_normal;
}
