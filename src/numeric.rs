//! 256-bit integer support.
//!
//! Wraps `crypto_bigint::U256` with the handful of operations the field and
//! multiexp layers need: msb/bit queries and bit-range slicing. Words are
//! 4 x u64 in little-endian order (word 0 least significant), matching the
//! field element limb layout.

use crypto_bigint::Uint;

/// 256-bit unsigned integer, backed by `crypto_bigint::U256`.
pub type U256 = Uint<4>;

/// Extension methods over `U256` used by scalar recoding and heap ordering.
pub trait U256Ext {
    /// Position of the most significant set bit (0-indexed). Returns 0 for
    /// zero input.
    fn get_msb(&self) -> u32;

    /// Extract a single bit.
    fn get_bit(&self, index: u32) -> bool;

    /// Extract the bit-range `[start, end)` as a u64. Requires
    /// `end - start <= 64`.
    fn slice(&self, start: u32, end: u32) -> u64;
}

impl U256Ext for U256 {
    fn get_msb(&self) -> u32 {
        let bits = self.bits_vartime();
        if bits == 0 {
            0
        } else {
            bits - 1
        }
    }

    fn get_bit(&self, index: u32) -> bool {
        self.bit_vartime(index)
    }

    fn slice(&self, start: u32, end: u32) -> u64 {
        debug_assert!(end > start, "end must be greater than start");
        debug_assert!(end - start <= 64, "slice range must fit in u64");

        let shifted = self.wrapping_shr_vartime(start);
        let mask = if end - start == 64 {
            u64::MAX
        } else {
            (1u64 << (end - start)) - 1
        };
        shifted.as_words()[0] & mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_roundtrip() {
        let words = [
            0x1111_2222_3333_4444u64,
            0x5555_6666_7777_8888,
            0x9999_aaaa_bbbb_cccc,
            0xdddd_eeee_ffff_0000,
        ];
        let val = U256::from_words(words);
        assert_eq!(val.to_words(), words);
    }

    #[test]
    fn msb_positions() {
        assert_eq!(U256::ZERO.get_msb(), 0);
        assert_eq!(U256::ONE.get_msb(), 0);
        assert_eq!(U256::from_words([0, 0, 0, 1]).get_msb(), 192);
        assert_eq!(U256::from_words([0, 0, 0, 1 << 63]).get_msb(), 255);
    }

    #[test]
    fn bit_extraction() {
        let val = U256::from_words([0b1010, 0, 0, 0]);
        assert!(val.get_bit(1));
        assert!(!val.get_bit(2));
        assert!(val.get_bit(3));
        assert!(!val.get_bit(4));
    }

    #[test]
    fn slice_within_limb() {
        let val = U256::from_words([0xABCD_EF01_2345_6789, 0, 0, 0]);
        assert_eq!(val.slice(0, 16), 0x6789);
        assert_eq!(val.slice(16, 32), 0x2345);
    }

    #[test]
    fn slice_across_limbs() {
        let val = U256::from_words([u64::MAX, 0x00FF, 0, 0]);
        assert_eq!(val.slice(60, 72), 0xFFF);
    }

    #[test]
    fn ordering_is_numeric() {
        let a = U256::from_words([u64::MAX, 0, 0, 0]);
        let b = U256::from_words([0, 1, 0, 0]);
        assert!(a < b);
    }
}
