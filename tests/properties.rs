//! Property-based tests for the kernels.
//!
//! base64-simd and the standard library's IPv4 parser serve as reference
//! implementations.

use proptest::prelude::*;
use std::net::Ipv4Addr;

use lanekit::kernels::base64::{decode_block, decode_lanes};
use lanekit::{DecodeError, Lanes, decode, parse, swizzle, try_decode};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn in_alphabet(b: u8) -> bool {
    ALPHABET.contains(&b)
}

// =============================================================================
// Base64
// =============================================================================

proptest! {
    /// Decoding reverses a reference encoder on whole 3-byte groups
    #[test]
    fn prop_decode_reverses_reference_encoder(
        data in prop::collection::vec(any::<u8>(), 0..40).prop_map(|mut v| {
            v.truncate(v.len() / 3 * 3);
            v
        })
    ) {
        let encoded = base64_simd::STANDARD_NO_PAD.encode_to_string(&data);
        let (decoded, ok) = decode(encoded.as_bytes());
        prop_assert!(ok);
        prop_assert_eq!(decoded, data);
    }

    /// Valid inputs decode to three bytes per four characters
    #[test]
    fn prop_decoded_length(chunks in prop::collection::vec(prop::sample::select(ALPHABET), 0..16)) {
        let input: Vec<u8> = chunks.iter().cycle().take(chunks.len() * 4).copied().collect();
        let (decoded, ok) = decode(&input);
        prop_assert!(ok);
        prop_assert_eq!(decoded.len(), input.len() / 4 * 3);
    }

    /// Any length that is not a multiple of 4 fails without output
    #[test]
    fn prop_bad_length_fails(input in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assume!(input.len() % 4 != 0);
        let (decoded, ok) = decode(&input);
        prop_assert!(!ok);
        prop_assert!(decoded.is_empty());
        prop_assert_eq!(try_decode(&input), Err(DecodeError::InvalidLength { actual: input.len() }));
    }

    /// Acceptance is exactly "every byte is in the alphabet"
    #[test]
    fn prop_validity_matches_alphabet(input in prop::collection::vec(any::<u8>(), 0..12)) {
        let input: Vec<u8> = input.iter().cycle().take(input.len() * 4).copied().collect();
        let (_, ok) = decode(&input);
        prop_assert_eq!(ok, input.iter().all(|&b| in_alphabet(b)));
    }

    /// One foreign byte anywhere spoils the whole input and is located exactly
    #[test]
    fn prop_single_corruption_detected(
        data in prop::collection::vec(any::<u8>(), 3..60),
        at in any::<prop::sample::Index>(),
        bad in any::<u8>().prop_filter("outside the alphabet", |b| !in_alphabet(*b)),
    ) {
        let data = &data[..data.len() / 3 * 3];
        let mut encoded = base64_simd::STANDARD_NO_PAD.encode_to_string(data).into_bytes();
        let position = at.index(encoded.len());
        encoded[position] = bad;

        prop_assert_eq!(decode(&encoded), (Vec::new(), false));
        prop_assert_eq!(
            try_decode(&encoded),
            Err(DecodeError::InvalidCharacter { byte: bad, position })
        );
    }

    /// The backend-dispatched block matches the portable 16-lane decode
    #[test]
    fn prop_block_matches_portable(bytes: [u8; 16]) {
        let ascii = Lanes::from_array(bytes);
        prop_assert_eq!(decode_block(ascii), decode_lanes::<16>(ascii));
    }
}

// =============================================================================
// Lanes
// =============================================================================

proptest! {
    /// Accelerated byte shuffle matches the portable swizzle
    #[test]
    fn prop_swizzle_dyn_matches_portable(table: [u8; 16], indices: [u8; 16]) {
        let table = Lanes::from_array(table);
        let indices = Lanes::from_array(indices);
        prop_assert_eq!(table.swizzle_dyn(indices), swizzle(table, indices));
    }

    /// Rotating left then right is the identity
    #[test]
    fn prop_rotate_inverse(values: [u32; 8], k in 0usize..32) {
        let v = Lanes::from_array(values);
        prop_assert_eq!(v.rotate_left(k).rotate_right(k), v);
    }

    /// Widening then truncating is the identity
    #[test]
    fn prop_widen_truncate(values: [u16; 8]) {
        let v = Lanes::from_array(values);
        prop_assert_eq!(v.widen().truncate::<u16>(), v);
    }
}

// =============================================================================
// IPv4
// =============================================================================

proptest! {
    /// Agrees with the standard library on dotted-decimal-looking strings
    #[test]
    fn prop_parse_agrees_with_std(s in "[0-9.]{0,17}") {
        let ours = parse(&s).ok();
        let reference = s.parse::<Ipv4Addr>().ok().map(|a| a.octets());
        prop_assert_eq!(ours, reference);
    }

    /// Agrees with the standard library on near-miss addresses
    #[test]
    fn prop_parse_agrees_with_std_fields(s in "(0|[1-9][0-9]{0,3}|0[0-9]{1,2})(\\.(0|[1-9][0-9]{0,3}|0[0-9]{1,2})){2,4}") {
        let ours = parse(&s).ok();
        let reference = s.parse::<Ipv4Addr>().ok().map(|a| a.octets());
        prop_assert_eq!(ours, reference);
    }

    /// Every address survives formatting and parsing
    #[test]
    fn prop_octets_roundtrip(octets: [u8; 4]) {
        let text = Ipv4Addr::from(octets).to_string();
        prop_assert_eq!(parse(&text), Ok(octets));
    }

    /// Anything that parses has three dots and only digits otherwise
    #[test]
    fn prop_accepted_shape(s in "\\PC{0,16}") {
        if parse(&s).is_ok() {
            prop_assert_eq!(s.bytes().filter(|&b| b == b'.').count(), 3);
            prop_assert!(s.bytes().all(|b| b == b'.' || b.is_ascii_digit()));
        }
    }
}
