//! Branch-free base64 decoding
//!
//! Every chunk of 4 ASCII bytes is decoded with the same fixed sequence of
//! lane operations, valid or not:
//!
//! 1. A perfect hash `(c >> 4) - (c == '/')` sorts each byte into one of the
//!    alphabet's classes: `/` => 1, `+` => 2, `0-9` => 3, `A-Z` => 4 or 5,
//!    `a-z` => 6 or 7.
//! 2. The class selects an offset which, added with wraparound, turns the
//!    character into its 6-bit value.
//! 3. Two nibble-indexed tables encode the valid-character matrix; a byte
//!    is valid iff its low-nibble and high-nibble entries share no bit.
//! 4. The sextets are widened, shifted into place, split into low and high
//!    bytes, and the high bytes are rotated one lane down to merge with
//!    their neighbours.
//! 5. A gather drops every fourth lane, leaving 3 bytes per chunk.
//!
//! The padding character `=` is not part of the alphabet and is rejected
//! like any other invalid byte.
//!
//! Based on techniques from:
//! - Wojciech Muła's SIMD base64 work
//! - https://github.com/mcy/vb64 (portable-simd formulation)

use crate::errors::DecodeError;
use crate::lanes::{LaneMask, Lanes, swizzle};

/// Input bytes per chunk.
pub const CHUNK_LEN: usize = 4;
/// Decoded bytes per chunk.
pub const DECODED_CHUNK_LEN: usize = 3;
/// Input bytes per wide block (four chunks).
pub const BLOCK_LEN: usize = 16;

/// Offset added to each character, indexed by its perfect hash.
/// Entry 0 (`!0`) only serves bytes that fail validation anyway.
pub const OFFSETS: Lanes<u8, 8> = Lanes::from_array([!0, 16, 19, 4, 191, 191, 185, 185]);

/// Validation bits by low nibble.
pub const LO_LUT: Lanes<u8, 16> = Lanes::from_array([
    0b10101, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001,
    0b10011, 0b11010, 0b11011, 0b11011, 0b11011, 0b11010,
]);

/// Validation bits by high nibble.
pub const HI_LUT: Lanes<u8, 16> = Lanes::from_array([
    0b10000, 0b10000, 0b00001, 0b00010, 0b00100, 0b01000, 0b00100, 0b01000, 0b10000, 0b10000,
    0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000,
]);

/// `OFFSETS` zero-extended to 16 entries. Hashes 8..=15 read 0 either way.
const OFFSETS_16: Lanes<u8, 16> = Lanes::from_array([
    !0, 16, 19, 4, 191, 191, 185, 185, 0, 0, 0, 0, 0, 0, 0, 0,
]);

/// Per-lane left shift that moves each sextet to its bit offset.
const SHIFTS: [u16; CHUNK_LEN] = [2, 4, 6, 8];

/// Decodes a whole buffer of unpadded base64.
///
/// Returns the decoded bytes and `true`, or an empty buffer and `false` if
/// the length is not a multiple of 4 or any chunk is invalid. Empty input
/// decodes to `([], true)`.
pub fn decode(ascii: &[u8]) -> (Vec<u8>, bool) {
    match try_decode(ascii) {
        Ok(decoded) => (decoded, true),
        Err(_) => (Vec::new(), false),
    }
}

/// Same contract as [`decode`], reporting why the input was rejected.
pub fn try_decode(ascii: &[u8]) -> Result<Vec<u8>, DecodeError> {
    if ascii.len() % CHUNK_LEN != 0 {
        return Err(DecodeError::InvalidLength {
            actual: ascii.len(),
        });
    }

    let mut decoded = Vec::with_capacity(ascii.len() / CHUNK_LEN * DECODED_CHUNK_LEN);

    let mut blocks = ascii.chunks_exact(BLOCK_LEN);
    for (i, block) in blocks.by_ref().enumerate() {
        let input = Lanes::load_padded(block);
        let (output, valid) = decode_block(input);
        if !valid {
            return Err(locate_invalid(input, i * BLOCK_LEN));
        }
        decoded.extend_from_slice(&output.as_array()[..BLOCK_LEN / CHUNK_LEN * DECODED_CHUNK_LEN]);
    }

    let tail_start = ascii.len() - blocks.remainder().len();
    for (i, chunk) in blocks.remainder().chunks_exact(CHUNK_LEN).enumerate() {
        let input = Lanes::load_padded(chunk);
        let (output, valid) = decode_chunk(input);
        if !valid {
            return Err(locate_invalid(input, tail_start + i * CHUNK_LEN));
        }
        decoded.extend_from_slice(&output);
    }

    Ok(decoded)
}

/// Decodes one 4-byte chunk into 3 bytes plus a validity flag.
///
/// The bytes are only meaningful when the flag is `true`.
pub fn decode_chunk(ascii: Lanes<u8, CHUNK_LEN>) -> ([u8; DECODED_CHUNK_LEN], bool) {
    let (output, valid) = decode_lanes(ascii);
    let [a, b, c, _] = output.to_array();
    ([a, b, c], valid)
}

/// Decodes `N / 4` chunks at once with the portable gather.
///
/// The decoded bytes occupy the low `3 * N / 4` lanes of the result.
/// `N` must be a multiple of 4.
pub fn decode_lanes<const N: usize>(ascii: Lanes<u8, N>) -> (Lanes<u8, N>, bool) {
    const { assert!(N % CHUNK_LEN == 0, "lane count must be a multiple of 4") };

    let sextets = ascii + swizzle(OFFSETS, perfect_hash(ascii));

    let lo = swizzle(LO_LUT, ascii & Lanes::splat(0x0f));
    let hi = swizzle(HI_LUT, ascii.shr(4));
    let valid = (lo & hi).reduce_or() == 0;

    (swizzle(repack(sextets), output_pattern()), valid)
}

/// Decodes four chunks at once through [`Lanes::swizzle_dyn`].
///
/// Produces exactly what `decode_lanes::<16>` produces; the tables are
/// looked up on the active lane backend.
pub fn decode_block(ascii: Lanes<u8, BLOCK_LEN>) -> (Lanes<u8, BLOCK_LEN>, bool) {
    let sextets = ascii + OFFSETS_16.swizzle_dyn(perfect_hash(ascii));

    let lo = LO_LUT.swizzle_dyn(ascii & Lanes::splat(0x0f));
    let hi = HI_LUT.swizzle_dyn(ascii.shr(4));
    let valid = (lo & hi).reduce_or() == 0;

    (repack(sextets).swizzle_dyn(output_pattern()), valid)
}

/// Lanes holding a byte outside the alphabet.
pub fn invalid_lanes<const N: usize>(ascii: Lanes<u8, N>) -> LaneMask<N> {
    let lo = swizzle(LO_LUT, ascii & Lanes::splat(0x0f));
    let hi = swizzle(HI_LUT, ascii.shr(4));
    (lo & hi).simd_ne(Lanes::splat(0))
}

fn perfect_hash<const N: usize>(ascii: Lanes<u8, N>) -> Lanes<u8, N> {
    // The all-ones lane of the mask subtracts one for '/'.
    ascii.shr(4) + ascii.compare_eq(b'/').to_int()
}

fn repack<const N: usize>(sextets: Lanes<u8, N>) -> Lanes<u8, N> {
    let shifted = sextets.widening_shl(Lanes::from_fn(|i| SHIFTS[i % CHUNK_LEN]));
    let lo: Lanes<u8, N> = shifted.truncate();
    let hi: Lanes<u8, N> = shifted.shr(8).truncate();
    lo | hi.rotate_left(1)
}

/// `i + i / 3`: keeps lanes 0, 1, 2 of each chunk and skips lane 3.
fn output_pattern<const N: usize>() -> Lanes<u8, N> {
    Lanes::from_fn(|i| u8::try_from(i + i / 3).unwrap_or(u8::MAX))
}

fn locate_invalid<const N: usize>(ascii: Lanes<u8, N>, offset: usize) -> DecodeError {
    let lane = invalid_lanes(ascii).first_set().unwrap_or(0);
    DecodeError::InvalidCharacter {
        byte: ascii[lane],
        position: offset + lane,
    }
}
