//! Boolean lane vectors produced by comparisons.

use std::ops::{BitAnd, BitOr, BitXor, Not};

use super::{LaneInt, Lanes};

/// One boolean per lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneMask<const N: usize>([bool; N]);

impl<const N: usize> LaneMask<N> {
    pub const fn from_array(lanes: [bool; N]) -> Self {
        Self(lanes)
    }

    pub const fn splat(value: bool) -> Self {
        Self([value; N])
    }

    pub fn from_fn(f: impl FnMut(usize) -> bool) -> Self {
        Self(std::array::from_fn(f))
    }

    pub const fn to_array(self) -> [bool; N] {
        self.0
    }

    /// Lane `i`, or `false` past the end.
    pub fn test(&self, i: usize) -> bool {
        self.0.get(i).copied().unwrap_or(false)
    }

    /// True iff every lane is set. Vacuously true for `N == 0`.
    pub fn all(self) -> bool {
        self.0.iter().all(|&b| b)
    }

    /// True iff at least one lane is set.
    pub fn any(self) -> bool {
        self.0.iter().any(|&b| b)
    }

    pub fn none(self) -> bool {
        !self.any()
    }

    /// Number of set lanes.
    pub fn count(self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }

    /// Packs lanes into an integer, lane 0 in the least significant bit.
    ///
    /// Only the first 64 lanes are representable.
    pub fn to_bitmask(self) -> u64 {
        self.0
            .iter()
            .take(64)
            .enumerate()
            .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << i))
    }

    /// Index of the lowest-numbered set lane, `None` if no lane is set.
    pub fn first_set(self) -> Option<usize> {
        self.0.iter().position(|&b| b)
    }

    /// Per-lane blend: `if_true[i]` where set, `if_false[i]` elsewhere.
    pub fn select<T: LaneInt>(self, if_true: Lanes<T, N>, if_false: Lanes<T, N>) -> Lanes<T, N> {
        Lanes::from_fn(|i| if self.0[i] { if_true[i] } else { if_false[i] })
    }

    /// All-ones for set lanes, zero elsewhere.
    pub fn to_int<T: LaneInt>(self) -> Lanes<T, N> {
        self.select(Lanes::splat(T::MAX), Lanes::splat(T::ZERO))
    }

    fn zip(self, rhs: Self, f: impl Fn(bool, bool) -> bool) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }
}

impl<const N: usize> Default for LaneMask<N> {
    fn default() -> Self {
        Self::splat(false)
    }
}

impl<const N: usize> From<[bool; N]> for LaneMask<N> {
    fn from(lanes: [bool; N]) -> Self {
        Self(lanes)
    }
}

impl<const N: usize> BitAnd for LaneMask<N> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a & b)
    }
}

impl<const N: usize> BitOr for LaneMask<N> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a | b)
    }
}

impl<const N: usize> BitXor for LaneMask<N> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a ^ b)
    }
}

impl<const N: usize> Not for LaneMask<N> {
    type Output = Self;

    fn not(self) -> Self {
        Self(self.0.map(|b| !b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reductions_on_empty_mask() {
        let none = LaneMask::<16>::splat(false);
        assert!(!none.any());
        assert!(!none.all());
        assert!(none.none());
        assert_eq!(none.first_set(), None);
        assert_eq!(none.to_bitmask(), 0);

        // Vacuous over zero lanes.
        assert!(LaneMask::<0>::default().all());
        assert!(!LaneMask::<0>::default().any());
    }

    #[test]
    fn test_bitmask_lane_order() {
        let mask = LaneMask::from_array([true, false, false, true]);
        assert_eq!(mask.to_bitmask(), 0b1001);
        assert_eq!(mask.first_set(), Some(0));
        assert_eq!((!mask).first_set(), Some(1));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_first_set_on_full_mask() {
        let all = LaneMask::<16>::splat(true);
        assert!(all.all());
        assert_eq!(all.first_set(), Some(0));
        assert_eq!(all.to_bitmask(), 0xFFFF);
    }

    #[test]
    fn test_select_and_to_int() {
        let mask = LaneMask::from_array([true, false, true, false]);
        let picked = mask.select(Lanes::splat(7u8), Lanes::from_array([1, 2, 3, 4]));
        assert_eq!(picked.to_array(), [7, 2, 7, 4]);
        assert_eq!(mask.to_int::<u16>().to_array(), [0xFFFF, 0, 0xFFFF, 0]);
    }

    #[test]
    fn test_logic_ops() {
        let a = LaneMask::from_array([true, true, false, false]);
        let b = LaneMask::from_array([true, false, true, false]);
        assert_eq!((a & b).to_array(), [true, false, false, false]);
        assert_eq!((a | b).to_array(), [true, true, true, false]);
        assert_eq!((a ^ b).to_array(), [false, true, true, false]);
        assert!(a.test(0));
        assert!(!a.test(99));
    }
}
