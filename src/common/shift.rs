//! Byte-width logical shifts.
//!
//! Plain `<<`/`>>` on `u8` overflow when the shift amount reaches the type
//! width. The packing code routinely computes shift amounts in `0..=8`, so
//! these helpers saturate to zero instead: every bit that is shifted out is
//! gone, and nothing is ever sign-extended back in.

/// Shift `byte` left by `n` bits, filling with zeros. Returns 0 for `n >= 8`.
#[inline]
pub fn shift_left(byte: u8, n: u32) -> u8 {
    byte.checked_shl(n).unwrap_or(0)
}

/// Shift `byte` right by `n` bits, filling with zeros. Returns 0 for `n >= 8`.
#[inline]
pub fn shift_right(byte: u8, n: u32) -> u8 {
    byte.checked_shr(n).unwrap_or(0)
}

/// Keep the `n` most significant bits of `byte` and clear the rest.
#[inline]
pub fn keep_high_bits(byte: u8, n: u32) -> u8 {
    if n >= u8::BITS {
        return byte;
    }
    shift_left(shift_right(byte, u8::BITS - n), u8::BITS - n)
}

/// The most significant byte of a left-justified `u64` bit pattern.
#[inline]
pub fn top_byte(bits: u64) -> u8 {
    bits.to_be_bytes()[0]
}

/// Bit `idx` of `byte`, counted from the most significant bit.
#[inline]
pub fn msb_bit(byte: u8, idx: u32) -> bool {
    shift_right(shift_left(byte, idx), u8::BITS - 1) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_saturate_to_zero() {
        assert_eq!(shift_left(0xFF, 8), 0);
        assert_eq!(shift_right(0xFF, 8), 0);
        assert_eq!(shift_left(0xFF, 200), 0);
        assert_eq!(shift_right(0xFF, 9), 0);
    }

    #[test]
    fn shifts_never_sign_extend() {
        assert_eq!(shift_right(0b1000_0000, 1), 0b0100_0000);
        assert_eq!(shift_right(0b1000_0000, 7), 1);
        assert_eq!(shift_left(0b0000_0001, 7), 0b1000_0000);
        assert_eq!(shift_left(0b1100_0000, 1), 0b1000_0000);
        assert_eq!(shift_left(0xAB, 0), 0xAB);
        assert_eq!(shift_right(0xAB, 0), 0xAB);
    }

    #[test]
    fn high_bits() {
        assert_eq!(keep_high_bits(0xFF, 0), 0);
        assert_eq!(keep_high_bits(0xFF, 3), 0b1110_0000);
        assert_eq!(keep_high_bits(0b1011_0110, 4), 0b1011_0000);
        assert_eq!(keep_high_bits(0b1011_0110, 8), 0b1011_0110);
    }

    #[test]
    fn top_byte_and_bits() {
        assert_eq!(top_byte(0xDEAD_0000_0000_0000), 0xDE);
        assert_eq!(top_byte(0x00FF_FFFF_FFFF_FFFF), 0x00);
        assert!(msb_bit(0b1000_0000, 0));
        assert!(!msb_bit(0b1000_0000, 1));
        assert!(msb_bit(0b0000_0001, 7));
    }
}
