// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Utility Functions** - *Null Detection and Broadcast Helpers*
//!
//! Small helpers shared by the kernel entry points: exact null counting over a
//! validity mask and 1-D broadcast length resolution.

use minarrow::Bitmask;

use crate::errors::{KernelError, log_length_mismatch};

/// Counts the null (unset) slots among the first `len` bits of `mask`.
///
/// Slots beyond the mask's own length are treated as valid.
#[inline]
pub fn count_nulls(mask: &Bitmask, len: usize) -> usize {
    let n = len.min(mask.len());
    (0..n).filter(|&i| !mask.get(i)).count()
}

/// Resolves the output length of a 1-D elementwise broadcast.
///
/// Every operand must have length `1` or the common length `n`; the result is `n`,
/// or `1` when all operands have length `1`. Scalars are passed as length `1`.
///
/// # Parameters
/// - `fname`: kernel name used in the error message
/// - `operands`: `(argument name, length)` pairs in argument order
#[inline]
pub fn broadcast_len(fname: &str, operands: &[(&str, usize)]) -> Result<usize, KernelError> {
    let mut out = 1;
    for &(name, len) in operands {
        if len == 1 {
            continue;
        }
        if out == 1 {
            out = len;
        } else if len != out {
            log::debug!("{fname}: cannot broadcast `{name}` of length {len} against {out}");
            return Err(KernelError::LengthMismatch(log_length_mismatch(
                fname, name, len, out,
            )));
        }
    }
    Ok(out)
}
