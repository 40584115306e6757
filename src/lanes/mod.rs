//! Fixed-width lane vectors.
//!
//! A [`Lanes<T, N>`] holds `N` unsigned integers that are always operated on
//! together: every method applies the same operation to each lane, and no
//! lane observes another lane's intermediate value within one operation.
//! Comparisons produce a [`LaneMask<N>`], which feeds the boolean reductions
//! and [`LaneMask::select`].
//!
//! The portable implementation is a plain per-lane loop. On x86_64 (SSSE3)
//! and aarch64 (NEON) the 16-lane byte gather, [`Lanes::swizzle_dyn`], is
//! dispatched to a single table-lookup instruction when the `simd` feature
//! is enabled. Runtime CPU feature detection is cached; every backend
//! produces bit-identical results.

mod element;
mod mask;

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod x86_64;

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
mod aarch64;

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Index, Mul, Not, Sub};

pub use element::{LaneInt, Widen};
pub use mask::LaneMask;

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
static HAS_SSSE3: std::sync::OnceLock<bool> = std::sync::OnceLock::new();

/// Check if SSSE3 is available (cached after first call)
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
pub fn has_ssse3() -> bool {
    *HAS_SSSE3.get_or_init(|| is_x86_feature_detected!("ssse3"))
}

#[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
pub fn has_ssse3() -> bool {
    false
}

/// Check if NEON is available (aarch64 only)
pub fn has_neon() -> bool {
    // NEON is mandatory on aarch64
    cfg!(all(feature = "simd", target_arch = "aarch64"))
}

/// Strategy used to execute the accelerated lane operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Portable,
    Ssse3,
    Neon,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Portable => "portable",
            Backend::Ssse3 => "ssse3",
            Backend::Neon => "neon",
        };
        f.write_str(name)
    }
}

/// Backend selected for this process.
pub fn active_backend() -> Backend {
    if has_ssse3() {
        Backend::Ssse3
    } else if has_neon() {
        Backend::Neon
    } else {
        Backend::Portable
    }
}

/// An ordered, fixed-length group of `N` lanes of `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lanes<T, const N: usize>([T; N]);

impl<T: LaneInt, const N: usize> Lanes<T, N> {
    pub const fn from_array(lanes: [T; N]) -> Self {
        Self(lanes)
    }

    pub fn splat(value: T) -> Self {
        Self([value; N])
    }

    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self(std::array::from_fn(f))
    }

    /// Copies exactly `N` elements, or `None` if `src` has a different length.
    pub fn from_slice(src: &[T]) -> Option<Self> {
        src.try_into().ok().map(Self)
    }

    /// Copies up to `N` elements from `src` and zero-fills the rest.
    pub fn load_padded(src: &[T]) -> Self {
        let mut lanes = [T::ZERO; N];
        let len = src.len().min(N);
        lanes[..len].copy_from_slice(&src[..len]);
        Self(lanes)
    }

    pub const fn to_array(self) -> [T; N] {
        self.0
    }

    pub const fn as_array(&self) -> &[T; N] {
        &self.0
    }

    pub fn map(self, f: impl Fn(T) -> T) -> Self {
        Self(self.0.map(f))
    }

    fn zip_map(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        Self::from_fn(|i| f(self.0[i], rhs.0[i]))
    }

    fn compare(self, rhs: Self, f: impl Fn(T, T) -> bool) -> LaneMask<N> {
        LaneMask::from_fn(|i| f(self.0[i], rhs.0[i]))
    }

    /// Logical left shift of every lane by the same amount.
    pub fn shl(self, amount: u32) -> Self {
        self.map(|v| v.shl_total(amount))
    }

    /// Logical right shift of every lane by the same amount.
    pub fn shr(self, amount: u32) -> Self {
        self.map(|v| v.shr_total(amount))
    }

    /// Logical left shift of lane `i` by `amounts[i]`.
    pub fn shl_lanes(self, amounts: Self) -> Self {
        self.zip_map(amounts, |v, n| v.shl_total(n.to_shift()))
    }

    /// Logical right shift of lane `i` by `amounts[i]`.
    pub fn shr_lanes(self, amounts: Self) -> Self {
        self.zip_map(amounts, |v, n| v.shr_total(n.to_shift()))
    }

    /// Lanes equal to `scalar`.
    pub fn compare_eq(self, scalar: T) -> LaneMask<N> {
        self.simd_eq(Self::splat(scalar))
    }

    pub fn simd_eq(self, rhs: Self) -> LaneMask<N> {
        self.compare(rhs, |a, b| a == b)
    }

    pub fn simd_ne(self, rhs: Self) -> LaneMask<N> {
        self.compare(rhs, |a, b| a != b)
    }

    pub fn simd_lt(self, rhs: Self) -> LaneMask<N> {
        self.compare(rhs, |a, b| a < b)
    }

    pub fn simd_le(self, rhs: Self) -> LaneMask<N> {
        self.compare(rhs, |a, b| a <= b)
    }

    pub fn simd_gt(self, rhs: Self) -> LaneMask<N> {
        self.compare(rhs, |a, b| a > b)
    }

    pub fn simd_ge(self, rhs: Self) -> LaneMask<N> {
        self.compare(rhs, |a, b| a >= b)
    }

    /// Moves lane `(i + k) % N` into lane `i`.
    pub fn rotate_left(self, k: usize) -> Self {
        if N == 0 {
            return self;
        }
        let k = k % N;
        Self::from_fn(|i| self.0[(i + k) % N])
    }

    /// Moves lane `i` into lane `(i + k) % N`.
    pub fn rotate_right(self, k: usize) -> Self {
        if N == 0 {
            return self;
        }
        self.rotate_left(N - k % N)
    }

    /// Bitwise OR of all lanes; zero for `N == 0`.
    pub fn reduce_or(self) -> T {
        self.0.iter().fold(T::ZERO, |acc, &v| acc | v)
    }

    /// Bitwise AND of all lanes; all-ones for `N == 0`.
    pub fn reduce_and(self) -> T {
        self.0.iter().fold(T::MAX, |acc, &v| acc & v)
    }

    /// Wrapping sum of all lanes.
    pub fn reduce_sum(self) -> T {
        self.0.iter().fold(T::ZERO, |acc, &v| acc.wrapping_add(v))
    }
}

impl<T: Widen, const N: usize> Lanes<T, N> {
    /// Zero-extends every lane to the double-width type.
    pub fn widen(self) -> Lanes<T::Wide, N> {
        Lanes(self.0.map(T::widen))
    }

    /// Widens, then shifts lane `i` left by `amounts[i]` without losing
    /// the bits that spill past the narrow width.
    pub fn widening_shl(self, amounts: Lanes<T::Wide, N>) -> Lanes<T::Wide, N> {
        self.widen().shl_lanes(amounts)
    }
}

impl<W: LaneInt, const N: usize> Lanes<W, N> {
    /// Keeps the low bits of every lane.
    pub fn truncate<T: Widen<Wide = W>>(self) -> Lanes<T, N> {
        Lanes(self.0.map(T::truncate))
    }
}

impl Lanes<u8, 16> {
    /// Uses `self` as a 16-entry table: lane `i` of the result is
    /// `self[indices[i]]`, or 0 when `indices[i] >= 16`.
    ///
    /// Same contract as [`swizzle`], executed on the active [`Backend`].
    pub fn swizzle_dyn(self, indices: Self) -> Self {
        match active_backend() {
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            // SAFETY: Ssse3 is only reported after runtime detection.
            Backend::Ssse3 => Self(unsafe { x86_64::swizzle_u8x16(self.0, indices.0) }),
            #[cfg(all(feature = "simd", target_arch = "aarch64"))]
            Backend::Neon => Self(aarch64::swizzle_u8x16(self.0, indices.0)),
            _ => swizzle(self, indices),
        }
    }
}

/// Per-lane table lookup.
///
/// Lane `i` of the result is `table[indices[i]]` when the index is in
/// bounds and 0 otherwise. The table and the index vector may have
/// different lengths; the result has as many lanes as `indices`.
pub fn swizzle<T: LaneInt, I: LaneInt, const M: usize, const N: usize>(
    table: Lanes<T, M>,
    indices: Lanes<I, N>,
) -> Lanes<T, N> {
    Lanes::from_fn(|i| {
        table
            .0
            .get(indices.0[i].to_index())
            .copied()
            .unwrap_or(T::ZERO)
    })
}

impl<T: LaneInt, const N: usize> Default for Lanes<T, N> {
    fn default() -> Self {
        Self([T::ZERO; N])
    }
}

impl<T: LaneInt, const N: usize> From<[T; N]> for Lanes<T, N> {
    fn from(lanes: [T; N]) -> Self {
        Self(lanes)
    }
}

impl<T, const N: usize> Index<usize> for Lanes<T, N> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.0[i]
    }
}

impl<T: LaneInt, const N: usize> Add for Lanes<T, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_map(rhs, T::wrapping_add)
    }
}

impl<T: LaneInt, const N: usize> Sub for Lanes<T, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_map(rhs, T::wrapping_sub)
    }
}

impl<T: LaneInt, const N: usize> Mul for Lanes<T, N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.zip_map(rhs, T::wrapping_mul)
    }
}

impl<T: LaneInt, const N: usize> BitAnd for Lanes<T, N> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a & b)
    }
}

impl<T: LaneInt, const N: usize> BitOr for Lanes<T, N> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a | b)
    }
}

impl<T: LaneInt, const N: usize> BitXor for Lanes<T, N> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a ^ b)
    }
}

impl<T: LaneInt, const N: usize> Not for Lanes<T, N> {
    type Output = Self;

    fn not(self) -> Self {
        self.map(|v| !v)
    }
}
