//! NEON lane primitives

use std::arch::aarch64::*;

/// 16-lane byte gather through `tbl`, which already returns 0 for
/// indices >= 16.
pub(super) fn swizzle_u8x16(table: [u8; 16], indices: [u8; 16]) -> [u8; 16] {
    let mut out = [0u8; 16];
    // SAFETY: NEON is mandatory on aarch64; loads and stores stay inside
    // the 16-byte arrays.
    unsafe {
        let result = vqtbl1q_u8(vld1q_u8(table.as_ptr()), vld1q_u8(indices.as_ptr()));
        vst1q_u8(out.as_mut_ptr(), result);
    }
    out
}
