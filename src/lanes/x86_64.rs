//! SSSE3 lane primitives

use std::arch::x86_64::*;

/// 16-lane byte gather through `pshufb`.
///
/// `pshufb` zeroes a lane when its index has the high bit set and otherwise
/// reads only the low nibble. A saturating add of 0x70 maps 0..=15 onto
/// 0x70..=0x7F and every larger index onto 0x80..=0xFF, so out-of-range
/// lanes come back as 0.
///
/// # Safety
///
/// The caller must ensure SSSE3 is available.
#[target_feature(enable = "ssse3")]
pub(super) unsafe fn swizzle_u8x16(table: [u8; 16], indices: [u8; 16]) -> [u8; 16] {
    let mut out = [0u8; 16];
    unsafe {
        let table = _mm_loadu_si128(table.as_ptr().cast());
        let indices = _mm_adds_epu8(
            _mm_loadu_si128(indices.as_ptr().cast()),
            _mm_set1_epi8(0x70),
        );
        _mm_storeu_si128(out.as_mut_ptr().cast(), _mm_shuffle_epi8(table, indices));
    }
    out
}
