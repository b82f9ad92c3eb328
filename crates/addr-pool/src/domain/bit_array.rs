//! Fixed-width bit pattern primitive
//!
//! A `BitArray` is a 64-bit word with immutable value semantics: every
//! operation consumes a value and returns a new one. The allocation trie
//! uses it as its path representation (one bit per level), but the type is
//! a general-purpose primitive.
//!
//! INVARIANTS:
//! - `mirror` is its own inverse.
//! - `rotate_left(n)` and `rotate_right(n)` are mutually inverse for all n.
//! - `count_on() + count_off() == 64` for all values.

use std::fmt;

/// Immutable 64-bit bit pattern.
///
/// All index-taking operations require `index < BitArray::WIDTH`. Violating
/// that contract is a caller bug and panics; it is not a recoverable error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitArray(u64);

impl BitArray {
    /// Number of bits in the pattern.
    pub const WIDTH: u32 = u64::BITS;

    /// Wrap a raw 64-bit value.
    #[must_use]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// All bits on.
    #[must_use]
    pub const fn set_all() -> Self {
        Self(u64::MAX)
    }

    /// All bits off.
    #[must_use]
    pub const fn reset_all() -> Self {
        Self(0)
    }

    /// Turn the bit at `index` on.
    ///
    /// # Panics
    /// Panics if `index >= 64`.
    #[must_use]
    pub const fn with_bit_on(self, index: u32) -> Self {
        assert!(index < Self::WIDTH);
        Self(self.0 | (1 << index))
    }

    /// Turn the bit at `index` off.
    ///
    /// # Panics
    /// Panics if `index >= 64`.
    #[must_use]
    pub const fn with_bit_off(self, index: u32) -> Self {
        assert!(index < Self::WIDTH);
        Self(self.0 & !(1 << index))
    }

    /// Assign the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index >= 64`.
    #[must_use]
    pub const fn with_bit(self, index: u32, value: bool) -> Self {
        assert!(index < Self::WIDTH);
        Self((self.0 & !(1 << index)) | ((value as u64) << index))
    }

    /// Read the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index >= 64`.
    #[must_use]
    pub const fn get(self, index: u32) -> bool {
        assert!(index < Self::WIDTH);
        (self.0 >> index) & 1 == 1
    }

    /// Reverse the bit order across all 64 positions.
    #[must_use]
    pub const fn mirror(self) -> Self {
        Self(self.0.reverse_bits())
    }

    /// Toggle the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index >= 64`.
    #[must_use]
    pub const fn flip(self, index: u32) -> Self {
        assert!(index < Self::WIDTH);
        Self(self.0 ^ (1 << index))
    }

    /// Circular rotation toward the low end by `n mod 64` positions.
    #[must_use]
    pub const fn rotate_right(self, n: u32) -> Self {
        Self(self.0.rotate_right(n % Self::WIDTH))
    }

    /// Circular rotation toward the high end by `n mod 64` positions.
    #[must_use]
    pub const fn rotate_left(self, n: u32) -> Self {
        Self(self.0.rotate_left(n % Self::WIDTH))
    }

    /// Number of bits that are on.
    #[must_use]
    pub const fn count_on(self) -> u32 {
        self.0.count_ones()
    }

    /// Number of bits that are off.
    #[must_use]
    pub const fn count_off(self) -> u32 {
        self.0.count_zeros()
    }

    /// The raw 64-bit value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// 64-character '0'/'1' rendering, most significant bit first.
    #[must_use]
    pub fn to_bit_string(self) -> String {
        format!("{:064b}", self.0)
    }
}

impl fmt::Display for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:064b}", self.0)
    }
}

impl From<u64> for BitArray {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<BitArray> for u64 {
    fn from(array: BitArray) -> Self {
        array.0
    }
}
