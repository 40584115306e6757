//! Scalar element types that can live in a lane.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// Unsigned integer usable as a lane element.
///
/// Every operation is total: arithmetic wraps, and shifting by the element
/// width or more produces zero instead of panicking.
pub trait LaneInt:
    Copy
    + Default
    + Debug
    + Eq
    + Ord
    + Hash
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    const BITS: u32;
    const ZERO: Self;
    const MAX: Self;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;

    /// Logical left shift, zero when `amount >= BITS`.
    fn shl_total(self, amount: u32) -> Self;

    /// Logical right shift, zero when `amount >= BITS`.
    fn shr_total(self, amount: u32) -> Self;

    /// Value as a table index. Saturates on targets where it cannot fit.
    fn to_index(self) -> usize;

    /// Value as a shift amount, saturating at `u32::MAX`.
    fn to_shift(self) -> u32;
}

/// Element type with a double-width counterpart.
pub trait Widen: LaneInt {
    type Wide: LaneInt;

    fn widen(self) -> Self::Wide;

    /// Keeps the low `Self::BITS` bits of `wide`.
    fn truncate(wide: Self::Wide) -> Self;
}

macro_rules! impl_lane_int {
    ($($t:ty),*) => {$(
        impl LaneInt for $t {
            const BITS: u32 = <$t>::BITS;
            const ZERO: Self = 0;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }

            #[inline]
            fn shl_total(self, amount: u32) -> Self {
                self.checked_shl(amount).unwrap_or(0)
            }

            #[inline]
            fn shr_total(self, amount: u32) -> Self {
                self.checked_shr(amount).unwrap_or(0)
            }

            #[inline]
            fn to_index(self) -> usize {
                usize::try_from(self).unwrap_or(usize::MAX)
            }

            #[inline]
            fn to_shift(self) -> u32 {
                u32::try_from(self).unwrap_or(u32::MAX)
            }
        }
    )*};
}

impl_lane_int!(u8, u16, u32, u64);

macro_rules! impl_widen {
    ($($narrow:ty => $wide:ty),*) => {$(
        impl Widen for $narrow {
            type Wide = $wide;

            #[inline]
            fn widen(self) -> $wide {
                <$wide>::from(self)
            }

            #[inline]
            fn truncate(wide: $wide) -> Self {
                wide as $narrow
            }
        }
    )*};
}

impl_widen!(u8 => u16, u16 => u32, u32 => u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_past_width_is_zero() {
        assert_eq!(0xFFu8.shl_total(8), 0);
        assert_eq!(0xFFu8.shr_total(9), 0);
        assert_eq!(0x8000u16.shr_total(15), 1);
        assert_eq!(1u64.shl_total(u32::MAX), 0);
    }

    #[test]
    fn test_wrapping_arithmetic() {
        assert_eq!(LaneInt::wrapping_add(b'A', 191u8), 0);
        assert_eq!(LaneInt::wrapping_sub(0u8, 1), 255);
        assert_eq!(LaneInt::wrapping_mul(200u16, 400), 14464);
    }

    #[test]
    fn test_widen_and_truncate() {
        assert_eq!(0xABu8.widen(), 0x00ABu16);
        assert_eq!(u8::truncate(0x1234u16), 0x34);
        assert_eq!(u16::truncate(0xDEAD_BEEFu32), 0xBEEF);
    }
}
