use crate::common::MAX_CODE_BITS;
use core::fmt;

/// The prefix code of one leaf.
///
/// `bits` is left-justified: the first bit on the wire (the step taken from the
/// root) is bit 63, and everything below the top `len` bits is zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

impl Code {
    pub const EMPTY: Code = Code { bits: 0, len: 0 };

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit `idx` of the code, counted from the root. `None` past the end.
    pub fn bit(&self, idx: u8) -> Option<bool> {
        if idx >= self.len {
            return None;
        }
        Some((self.bits >> (MAX_CODE_BITS - 1 - u32::from(idx))) & 1 == 1)
    }

    /// The code as right-aligned value, e.g. `0b110` for a 3 bit code `110`.
    pub fn value(&self) -> u64 {
        if self.len == 0 {
            return 0;
        }
        self.bits >> (MAX_CODE_BITS - u32::from(self.len))
    }

    /// Returns a code one bit longer, with `one` as the new first bit.
    ///
    /// Returns `None` if the code is already [`MAX_CODE_BITS`] long.
    pub(crate) fn prepend(self, one: bool) -> Option<Code> {
        if u32::from(self.len) >= MAX_CODE_BITS {
            return None;
        }
        let high: u64 = if one { 1 << (MAX_CODE_BITS - 1) } else { 0 };
        Some(Code {
            bits: (self.bits >> 1) | high,
            len: self.len + 1,
        })
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in 0..self.len {
            let bit = if self.bit(idx) == Some(true) { '1' } else { '0' };
            fmt::Write::write_char(f, bit)?;
        }
        Ok(())
    }
}
