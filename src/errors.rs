// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Kernel Operation Error Handling*
//!
//! Error types for kernel operations with structured error reporting.
//!
//! ## Error Categories
//! - **Dimension Errors**: operands that cannot be broadcast together
//! - **Type Errors**: inputs with no floating-point encoding, i.e. nulls
//! - **Argument Errors**: invalid scalar parameters where no output element exists to carry `NaN`
//!
//! Domain errors inside a batch (for example a non-positive scale) are *not*
//! errors: they surface as `NaN` in the affected output slots.

use core::fmt;
use std::error::Error;

/// Error type for all kernel operations.
///
/// Each variant includes a contextual message string naming the kernel and
/// argument involved.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Operand lengths that are neither `1` nor the common broadcast length.
    LengthMismatch(String),

    /// Unsupported element representation, e.g. a null slot in a numeric input.
    UnsupportedType(String),

    /// Invalid arguments provided to kernel function.
    InvalidArguments(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            KernelError::UnsupportedType(msg) => write!(f, "Unsupported type: {}", msg),
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// Creates a formatted error message for an operand whose length cannot be
/// broadcast against the others.
///
/// # Arguments
/// * `fname` - Function name where the mismatch occurred
/// * `arg` - Name of the offending argument
/// * `len` - Length of the offending argument
/// * `expected` - Broadcast length established by the other operands
pub fn log_length_mismatch(fname: &str, arg: &str, len: usize, expected: usize) -> String {
    format!(
        "{} => `{}` has length {}, expected 1 or {}",
        fname, arg, len, expected
    )
}
