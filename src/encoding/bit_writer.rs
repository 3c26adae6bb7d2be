use crate::common::shift::{keep_high_bits, shift_right, top_byte};
use crate::common::{BYTE_BITS, MAX_CODE_BITS};
use alloc::vec::Vec;

/// An interface for writing an arbitrary number of bits into a buffer,
/// most significant bit first.
pub(crate) struct BitWriter {
    /// The buffer that's filled with bits
    output: Vec<u8>,
    /// The index pointing to the next unoccupied bit. Effectively just
    /// the number of bits that have been written into the buffer so far.
    bit_idx: usize,
}

impl BitWriter {
    /// Initialize a new writer. Write new bits into the buffer with `write_bits`, and
    /// obtain the output using `dump`
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Like [`BitWriter::new`] but reserves room for `bytes` bytes up front.
    /// The buffer still grows if more is written.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            bit_idx: 0,
        }
    }

    /// Write the `num_bits` most significant bits of `bits` into the writer.
    ///
    /// `bits` is left-justified: the first bit written is bit 63. Anything below
    /// the top `num_bits` bits is ignored.
    pub fn write_bits(&mut self, bits: u64, num_bits: u32) {
        debug_assert!(num_bits <= MAX_CODE_BITS);
        let mut bits = bits;
        let mut remaining = num_bits;

        // Each pass fills the current output byte as far as it can. Either the
        // byte becomes full or the input runs out, never both across a boundary.
        //
        // 76543210 ◄─── Bit index in the output byte
        // 101─────      3 bits already in the byte (`used`)
        // ───11───      next chunk, masked to `take` bits and shifted right by `used`
        while remaining > 0 {
            let used = self.misaligned_by();
            if used == 0 {
                self.output.push(0);
            }
            let take = (BYTE_BITS - used).min(remaining);
            let chunk = keep_high_bits(top_byte(bits), take);
            self.output[self.bit_idx / 8] |= shift_right(chunk, used);

            bits = bits.checked_shl(take).unwrap_or(0);
            remaining -= take;
            self.bit_idx += take as usize;
        }
    }

    /// Number of bits still free in the last output byte. Zero when the writer
    /// is byte aligned.
    pub fn misaligned(&self) -> u32 {
        match self.misaligned_by() {
            0 => 0,
            used => BYTE_BITS - used,
        }
    }

    /// Number of bits already occupied in the last output byte.
    fn misaligned_by(&self) -> u32 {
        (self.bit_idx % 8) as u32
    }

    pub fn bits_written(&self) -> usize {
        self.bit_idx
    }

    /// Returns the populated buffer that you've been writing bits into.
    /// Unwritten bits of a partial last byte are zero.
    ///
    /// This function consumes the writer, so it cannot be used after
    /// dumping
    pub fn dump(self) -> Vec<u8> {
        self.output
    }
}
