// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use minarrow::Vec64;

#[cfg(feature = "parallel")]
use crate::config::{PARALLEL_CHUNK_LEN, PARALLEL_MIN_LEN};

use super::BroadcastArgs;

/// Broadcast kernel helper
///
/// Evaluates `scalar_body(input, loc, scale_1, scale_2)` for every output
/// element, reading each operand through its [`Lane`](super::Lane).
///
/// ### Null handling
/// - Nulls are rejected before this point, so every slot is evaluated.
/// - Any `NaN` or `inf` values generated in the kernel function
/// are kept verbatim, without `nulling` them in the (optional)
/// mask, as they carry the per-element domain result.
///
/// With the `parallel` feature, outputs of at least `PARALLEL_MIN_LEN`
/// elements are evaluated in `PARALLEL_CHUNK_LEN` chunks on the rayon pool.
#[inline(always)]
pub fn broadcast_kernel_f64_std<FScalar>(args: &BroadcastArgs<'_>, scalar_body: FScalar) -> Vec64<f64>
where
    FScalar: Fn(f64, f64, f64, f64) -> f64 + Sync + Send,
{
    #[cfg(feature = "parallel")]
    if args.len >= PARALLEL_MIN_LEN {
        return broadcast_kernel_f64_par(args, scalar_body);
    }

    let len = args.len;
    let mut out = Vec64::with_capacity(len);
    for i in 0..len {
        out.push(scalar_body(
            args.input.at(i),
            args.loc.at(i),
            args.scale_1.at(i),
            args.scale_2.at(i),
        ));
    }
    out
}

#[cfg(feature = "parallel")]
fn broadcast_kernel_f64_par<FScalar>(args: &BroadcastArgs<'_>, scalar_body: FScalar) -> Vec64<f64>
where
    FScalar: Fn(f64, f64, f64, f64) -> f64 + Sync + Send,
{
    use rayon::prelude::*;

    let mut out = Vec64::with_capacity(args.len);
    out.resize(args.len, 0.0);

    out.as_mut_slice()
        .par_chunks_mut(PARALLEL_CHUNK_LEN)
        .enumerate()
        .for_each(|(c, chunk)| {
            let base = c * PARALLEL_CHUNK_LEN;
            for (j, o) in chunk.iter_mut().enumerate() {
                let i = base + j;
                *o = scalar_body(
                    args.input.at(i),
                    args.loc.at(i),
                    args.scale_1.at(i),
                    args.scale_2.at(i),
                );
            }
        });
    out
}

/// Broadcast kernel helper for bodies with four outputs per element,
/// returned as one column per output.
#[inline(always)]
pub fn broadcast_kernel_f64x4_std<FScalar>(
    args: &BroadcastArgs<'_>,
    scalar_body: FScalar,
) -> [Vec64<f64>; 4]
where
    FScalar: Fn(f64, f64, f64, f64) -> [f64; 4] + Sync + Send,
{
    let len = args.len;

    #[cfg(feature = "parallel")]
    if len >= PARALLEL_MIN_LEN {
        use rayon::prelude::*;

        let rows: Vec<[f64; 4]> = (0..len)
            .into_par_iter()
            .with_min_len(PARALLEL_CHUNK_LEN)
            .map(|i| {
                scalar_body(
                    args.input.at(i),
                    args.loc.at(i),
                    args.scale_1.at(i),
                    args.scale_2.at(i),
                )
            })
            .collect();
        return split_columns(rows.into_iter(), len);
    }

    split_columns(
        (0..len).map(|i| {
            scalar_body(
                args.input.at(i),
                args.loc.at(i),
                args.scale_1.at(i),
                args.scale_2.at(i),
            )
        }),
        len,
    )
}

#[inline(always)]
fn split_columns(rows: impl Iterator<Item = [f64; 4]>, len: usize) -> [Vec64<f64>; 4] {
    let mut cols = [
        Vec64::with_capacity(len),
        Vec64::with_capacity(len),
        Vec64::with_capacity(len),
        Vec64::with_capacity(len),
    ];
    for row in rows {
        for (col, v) in cols.iter_mut().zip(row) {
            col.push(v);
        }
    }
    cols
}
