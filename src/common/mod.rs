//! Values and helpers shared between the encoding side
//! and the decoding side.

pub mod shift;

/// Codes are stored left-justified in a `u64`, so no code can be longer than this.
pub const MAX_CODE_BITS: u32 = u64::BITS;

/// Bits in one byte of the packed stream.
pub const BYTE_BITS: u32 = u8::BITS;
