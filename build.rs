// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use std::env;
use std::fs;
use std::path::Path;

/// True if `feature` is listed in comma-separated `CARGO_CFG_TARGET_FEATURE`
fn has_feature(list: &str, feature: &str) -> bool {
    list.split(',').any(|f| f == feature)
}

fn main() {
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let feats = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();

    // Only f64 kernels live in this crate, so only the 64-bit lane count is emitted.
    // Override with SIMD_LANES_OVERRIDE="8".
    let w64 = match env::var("SIMD_LANES_OVERRIDE").ok() {
        Some(val) => match val.trim().parse::<usize>() {
            Ok(n) if n.is_power_of_two() && n <= 64 => {
                println!("cargo:warning=SIMD_LANES_OVERRIDE applied: {}", n);
                n
            }
            _ => panic!("Invalid SIMD_LANES_OVERRIDE. Expected a power of two <= 64, e.g. \"8\""),
        },
        None => match arch.as_str() {
            "x86_64" | "x86" => {
                if has_feature(&feats, "avx512f") {
                    8
                } else if has_feature(&feats, "avx2") {
                    4
                } else if has_feature(&feats, "sse2") {
                    2
                } else {
                    1
                }
            }
            "aarch64" => {
                if has_feature(&feats, "neon") {
                    2
                } else {
                    1
                }
            }
            "wasm32" => {
                if has_feature(&feats, "simd128") {
                    2
                } else {
                    1
                }
            }
            _ => 1,
        },
    };

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let out_path = Path::new(&out_dir).join("simd_lanes.rs");

    fs::write(
        &out_path,
        format!(
            "
/// Auto-generated SIMD lane width from build.rs

/// SIMD lane count for f64 elements.
/// Determined at build time from the target architecture,
/// or overridden via `SIMD_LANES_OVERRIDE`.
#[allow(non_upper_case_globals)]
pub const W64: usize = {w64};
"
        ),
    )
    .expect("failed to write simd_lanes.rs");

    println!("cargo:rerun-if-env-changed=CARGO_CFG_TARGET_ARCH");
    println!("cargo:rerun-if-env-changed=CARGO_CFG_TARGET_FEATURE");
    println!("cargo:rerun-if-env-changed=SIMD_LANES_OVERRIDE");
}
