//! Lane-parallel IPv4 dotted-quad parsing
//!
//! The input is padded into one 16-byte vector and classified in a single
//! pass. Dot positions come out of the packed dot mask, and the four fields
//! are then converted side by side in a 4-lane vector, one lane per octet.
//!
//! Based on techniques from:
//! - Wojciech Muła's SSE IPv4 parser (parseip4)

use std::net::Ipv4Addr;

use crate::errors::{ParseError, ParseErrorKind};
use crate::lanes::{LaneMask, Lanes, swizzle};

/// Shortest accepted input, `"0.0.0.0"`.
pub const MIN_LEN: usize = 7;
/// Longest accepted input, `"255.255.255.255"`.
pub const MAX_LEN: usize = 15;

const WIDTH: usize = 16;
const FIELDS: usize = 4;

/// Parses a dotted-decimal IPv4 address into its four octets.
///
/// Each field must have 1 to 3 digits, no leading zero unless the field is
/// exactly `"0"`, and a value of at most 255. When several fields are bad,
/// the error belongs to the leftmost one.
pub fn parse(s: &str) -> Result<[u8; 4], ParseError> {
    let bytes = s.as_bytes();
    if !(MIN_LEN..=MAX_LEN).contains(&bytes.len()) {
        return Err(ParseError::new(s, ParseErrorKind::Length { len: bytes.len() }));
    }

    let input = Lanes::<u8, WIDTH>::load_padded(bytes);

    let is_dot = input.compare_eq(b'.');
    let is_digit = input.simd_ge(Lanes::splat(b'0')) & input.simd_le(Lanes::splat(b'9'));
    let is_valid = is_dot | is_digit | input.compare_eq(0);

    if !is_valid.all() {
        let position = (!is_valid).first_set().unwrap_or(0);
        return Err(unexpected_character(s, position));
    }

    let dot_count = is_dot
        .select(Lanes::splat(1u8), Lanes::splat(0))
        .reduce_sum();
    if dot_count != 3 {
        return Err(ParseError::new(
            s,
            ParseErrorKind::DotCount {
                count: usize::from(dot_count),
            },
        ));
    }

    let [dot0, dot1, dot2] = dot_positions(is_dot);
    // Lengths are at most MAX_LEN here.
    let len = bytes.len() as u8;
    let starts = Lanes::from_array([0, dot0 + 1, dot1 + 1, dot2 + 1]);
    let ends = Lanes::from_array([dot0, dot1, dot2, len]);
    let lens = ends - starts;

    let bad_len = lens.simd_lt(Lanes::splat(1)) | lens.simd_gt(Lanes::splat(3));
    if let Some(field) = bad_len.first_set() {
        return Err(field_error(s, ParseErrorKind::FieldLength { field }, starts, lens));
    }

    // Padding and NUL bytes wrap to values above 9.
    let digits = input - Lanes::splat(b'0');
    let d0 = swizzle(digits, starts);
    let d1 = swizzle(digits, starts + Lanes::splat(1));
    let d2 = swizzle(digits, starts + Lanes::splat(2));

    let nine = Lanes::splat(9u8);
    let non_digit = d0.simd_gt(nine)
        | (d1.simd_gt(nine) & lens.simd_ge(Lanes::splat(2)))
        | (d2.simd_gt(nine) & lens.simd_ge(Lanes::splat(3)));

    let (w0, w1, w2) = (d0.widen(), d1.widen(), d2.widen());
    let ten = Lanes::splat(10u16);
    let hundred = Lanes::splat(100u16);
    let two_digits = w0 * ten + w1;
    let three_digits = w0 * hundred + w1 * ten + w2;
    let values = lens
        .compare_eq(1)
        .select(w0, lens.compare_eq(2).select(two_digits, three_digits));

    let leading_zero = lens.simd_gt(Lanes::splat(1)) & d0.compare_eq(0);
    let too_large = values.simd_gt(Lanes::splat(255));

    let failed = non_digit | leading_zero | too_large;
    if let Some(field) = failed.first_set() {
        if non_digit.test(field) {
            let start = usize::from(starts[field]);
            let offset = bytes[start..]
                .iter()
                .position(|b| !b.is_ascii_digit())
                .unwrap_or(0);
            return Err(unexpected_character(s, start + offset));
        }
        let kind = if leading_zero.test(field) {
            ParseErrorKind::LeadingZero { field }
        } else {
            ParseErrorKind::ValueTooLarge { field }
        };
        return Err(field_error(s, kind, starts, lens));
    }

    Ok(values.truncate::<u8>().to_array())
}

/// [`parse`], returning a standard library address.
pub fn parse_addr(s: &str) -> Result<Ipv4Addr, ParseError> {
    parse(s).map(Ipv4Addr::from)
}

/// Indices of the three lowest set lanes, ascending.
fn dot_positions(is_dot: LaneMask<WIDTH>) -> [u8; 3] {
    let mut mask = is_dot.to_bitmask() as u16;
    let mut dots = [0u8; 3];
    for dot in &mut dots {
        *dot = mask.trailing_zeros() as u8;
        mask &= mask.wrapping_sub(1);
    }
    dots
}

fn unexpected_character(s: &str, position: usize) -> ParseError {
    let err = ParseError::new(s, ParseErrorKind::UnexpectedCharacter { position });
    match s.get(position..).and_then(|rest| rest.chars().next()) {
        Some(c) => err.at(c),
        None => err,
    }
}

fn field_error(
    s: &str,
    kind: ParseErrorKind,
    starts: Lanes<u8, FIELDS>,
    lens: Lanes<u8, FIELDS>,
) -> ParseError {
    let err = ParseError::new(s, kind);
    let Some(field) = kind.field() else {
        return err;
    };
    let start = usize::from(starts[field]);
    let end = start + usize::from(lens[field]);
    match s.get(start..end) {
        Some(text) if !text.is_empty() => err.at(text),
        _ => err,
    }
}
