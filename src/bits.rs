//! Bit primitives used by the cell address encoding.
//!
//! The shuffle functions interleave the two halves of a word so that bit `i`
//! of the low half lands on position `2i` and bit `i` of the high half on
//! position `2i + 1`. That is exactly the Z-order (Morton) interleave of an
//! `(x, y)` pair when `x` sits in the low half and `y` in the high half.

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width unsigned integers the primitives operate on.
pub trait Word: Copy + Eq + sealed::Sealed {
    /// Width in bits.
    const BITS: u32;

    fn count_set(self) -> u32;
    fn rotl(self, shift: u32) -> Self;
    fn clear_lowest_set(self) -> Self;
    fn lowest_set_index(self) -> u32;
    fn is_zero(self) -> bool;
}

macro_rules! impl_word {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl Word for $t {
                const BITS: u32 = <$t>::BITS;

                #[inline]
                fn count_set(self) -> u32 {
                    self.count_ones()
                }

                #[inline]
                fn rotl(self, shift: u32) -> Self {
                    self.rotate_left(shift % <$t>::BITS)
                }

                #[inline]
                fn clear_lowest_set(self) -> Self {
                    self & self.wrapping_sub(1)
                }

                #[inline]
                fn lowest_set_index(self) -> u32 {
                    self.trailing_zeros()
                }

                #[inline]
                fn is_zero(self) -> bool {
                    self == 0
                }
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64, u128, usize);

/// Number of set bits in `word`.
#[inline]
pub fn popcount<W: Word>(word: W) -> u32 {
    word.count_set()
}

/// Total number of set bits across a run of words. An empty slice counts zero.
pub fn popcount_slice<W: Word>(words: &[W]) -> u64 {
    words.iter().map(|w| u64::from(w.count_set())).sum()
}

/// Zero-based position of the `k`-th set bit (`k >= 1`), counting from the
/// least significant bit.
///
/// Returns `W::BITS` when `k` is zero or the word has fewer than `k` set
/// bits, so the function is total.
///
/// # Examples
///
/// ```
/// use quadcell::bits::select1;
///
/// assert_eq!(select1(1u32, 1), 0);
/// assert_eq!(select1(0b1010_0000u8, 2), 7);
/// assert_eq!(select1(0b1u32, 2), 32);
/// ```
pub fn select1<W: Word>(word: W, k: u32) -> u32 {
    if k == 0 || word.count_set() < k {
        return W::BITS;
    }
    let mut w = word;
    for _ in 1..k {
        w = w.clear_lowest_set();
    }
    w.lowest_set_index()
}

/// Cyclic left rotation. Any shift is reduced modulo the word width.
#[inline]
pub fn rotate_left<W: Word>(word: W, shift: u32) -> W {
    word.rotl(shift)
}

/// Interleave the low and high 16-bit halves of `x`.
///
/// # Examples
///
/// ```
/// use quadcell::bits::{perfect_shuffle, perfect_unshuffle};
///
/// assert_eq!(perfect_shuffle(557851022), 201547860);
/// assert_eq!(perfect_unshuffle(201547860), 557851022);
/// ```
#[inline]
pub const fn perfect_shuffle(mut x: u32) -> u32 {
    x = ((x & 0x0000_FF00) << 8) | ((x >> 8) & 0x0000_FF00) | (x & 0xFF00_00FF);
    x = ((x & 0x00F0_00F0) << 4) | ((x >> 4) & 0x00F0_00F0) | (x & 0xF00F_F00F);
    x = ((x & 0x0C0C_0C0C) << 2) | ((x >> 2) & 0x0C0C_0C0C) | (x & 0xC3C3_C3C3);
    x = ((x & 0x2222_2222) << 1) | ((x >> 1) & 0x2222_2222) | (x & 0x9999_9999);
    x
}

/// Inverse of [`perfect_shuffle`].
#[inline]
pub const fn perfect_unshuffle(mut x: u32) -> u32 {
    x = ((x & 0x2222_2222) << 1) | ((x >> 1) & 0x2222_2222) | (x & 0x9999_9999);
    x = ((x & 0x0C0C_0C0C) << 2) | ((x >> 2) & 0x0C0C_0C0C) | (x & 0xC3C3_C3C3);
    x = ((x & 0x00F0_00F0) << 4) | ((x >> 4) & 0x00F0_00F0) | (x & 0xF00F_F00F);
    x = ((x & 0x0000_FF00) << 8) | ((x >> 8) & 0x0000_FF00) | (x & 0xFF00_00FF);
    x
}

/// Interleave the low and high 32-bit halves of `x`.
#[inline]
pub const fn perfect_shuffle_u64(mut x: u64) -> u64 {
    x = ((x & 0x0000_0000_FFFF_0000) << 16)
        | ((x >> 16) & 0x0000_0000_FFFF_0000)
        | (x & 0xFFFF_0000_0000_FFFF);
    x = ((x & 0x0000_FF00_0000_FF00) << 8)
        | ((x >> 8) & 0x0000_FF00_0000_FF00)
        | (x & 0xFF00_00FF_FF00_00FF);
    x = ((x & 0x00F0_00F0_00F0_00F0) << 4)
        | ((x >> 4) & 0x00F0_00F0_00F0_00F0)
        | (x & 0xF00F_F00F_F00F_F00F);
    x = ((x & 0x0C0C_0C0C_0C0C_0C0C) << 2)
        | ((x >> 2) & 0x0C0C_0C0C_0C0C_0C0C)
        | (x & 0xC3C3_C3C3_C3C3_C3C3);
    x = ((x & 0x2222_2222_2222_2222) << 1)
        | ((x >> 1) & 0x2222_2222_2222_2222)
        | (x & 0x9999_9999_9999_9999);
    x
}

/// Inverse of [`perfect_shuffle_u64`].
#[inline]
pub const fn perfect_unshuffle_u64(mut x: u64) -> u64 {
    x = ((x & 0x2222_2222_2222_2222) << 1)
        | ((x >> 1) & 0x2222_2222_2222_2222)
        | (x & 0x9999_9999_9999_9999);
    x = ((x & 0x0C0C_0C0C_0C0C_0C0C) << 2)
        | ((x >> 2) & 0x0C0C_0C0C_0C0C_0C0C)
        | (x & 0xC3C3_C3C3_C3C3_C3C3);
    x = ((x & 0x00F0_00F0_00F0_00F0) << 4)
        | ((x >> 4) & 0x00F0_00F0_00F0_00F0)
        | (x & 0xF00F_F00F_F00F_F00F);
    x = ((x & 0x0000_FF00_0000_FF00) << 8)
        | ((x >> 8) & 0x0000_FF00_0000_FF00)
        | (x & 0xFF00_00FF_FF00_00FF);
    x = ((x & 0x0000_0000_FFFF_0000) << 16)
        | ((x >> 16) & 0x0000_0000_FFFF_0000)
        | (x & 0xFFFF_0000_0000_FFFF);
    x
}

/// Interleave `x` (even bits) and `y` (odd bits) into one 64-bit key.
#[inline]
pub const fn bitwise_merge(x: u32, y: u32) -> u64 {
    perfect_shuffle_u64(((y as u64) << 32) | x as u64)
}

/// Inverse of [`bitwise_merge`]: returns `(x, y)`.
#[inline]
pub const fn bitwise_split(key: u64) -> (u32, u32) {
    let v = perfect_unshuffle_u64(key);
    (v as u32, (v >> 32) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn popcount_naive(mut x: u64) -> u32 {
        let mut res = 0;
        while x != 0 {
            if x & 1 == 1 {
                res += 1;
            }
            x >>= 1;
        }
        res
    }

    #[test]
    fn test_popcount_matches_naive() {
        for i in 0u32..10_000 {
            assert_eq!(popcount(i), popcount_naive(u64::from(i)));
            let hi = 0xC200_0000 | i;
            assert_eq!(popcount(hi), popcount_naive(u64::from(hi)));
        }
        assert_eq!(popcount(0u64), 0);
        assert_eq!(popcount(u64::MAX), 64);
    }

    #[test]
    fn test_popcount_slice() {
        let words: Vec<u32> = (0..277u32)
            .map(|i| i.wrapping_mul(0x9E37_79B9).rotate_left(i % 32))
            .collect();
        let expected: u64 = words.iter().map(|&w| u64::from(popcount_naive(u64::from(w)))).sum();
        assert_eq!(popcount_slice(&words), expected);
        assert_eq!(popcount_slice::<u32>(&[]), 0);
    }

    #[test]
    fn test_select1() {
        assert_eq!(select1(1u32, 1), 0);
        assert_eq!(select1(0b1011_0100u8, 1), 2);
        assert_eq!(select1(0b1011_0100u8, 2), 4);
        assert_eq!(select1(0b1011_0100u8, 3), 5);
        assert_eq!(select1(0b1011_0100u8, 4), 7);
        assert_eq!(select1(u64::MAX, 64), 63);
    }

    #[test]
    fn test_select1_past_last_bit_returns_width() {
        assert_eq!(select1(0u32, 1), 32);
        assert_eq!(select1(0b11u16, 3), 16);
        assert_eq!(select1(0b11u16, 0), 16);
    }

    #[test]
    fn test_rotate_left() {
        assert_eq!(rotate_left(0u32, 1), 0);
        assert_eq!(rotate_left(u32::MAX, 1), u32::MAX);
        assert_eq!(rotate_left(128u8 | 32 | 4, 1), 64u8 | 8 | 1);
        assert_eq!(rotate_left(0x8000_0001u32, 0), 0x8000_0001);
        assert_eq!(rotate_left(0x8000_0001u32, 32), 0x8000_0001);
        assert_eq!(rotate_left(0x8000_0001u32, 33), 0x0000_0003);
    }

    #[test]
    fn test_perfect_shuffle_known_value() {
        assert_eq!(perfect_shuffle(557851022), 201547860);
        assert_eq!(perfect_unshuffle(201547860), 557851022);
    }

    #[test]
    fn test_shuffle_bit_positions() {
        assert_eq!(perfect_shuffle(1), 0b01);
        assert_eq!(perfect_shuffle(1 << 16), 0b10);
        assert_eq!(perfect_shuffle_u64(1), 0b01);
        assert_eq!(perfect_shuffle_u64(1 << 32), 0b10);
        assert_eq!(perfect_shuffle_u64(0xFFFF_FFFF), 0x5555_5555_5555_5555);
    }

    #[test]
    fn test_merge_split() {
        let key = bitwise_merge(0b011, 0b101);
        // quadrant pairs (y, x) from the top: (1,0) (0,1) (1,1)
        assert_eq!(key, 0b10_01_11);
        assert_eq!(bitwise_split(key), (0b011, 0b101));
        assert_eq!(bitwise_split(bitwise_merge(u32::MAX, 0)), (u32::MAX, 0));
    }
}
