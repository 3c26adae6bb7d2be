use crate::common::shift::msb_bit;
use crate::common::MAX_CODE_BITS;

/// Reads bits most significant bit first, never past a fixed bit limit.
pub struct BitReader<'s> {
    idx: usize, //index counts bits already read
    limit: usize,
    source: &'s [u8],
}

#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum GetBitsError {
    TooManyBits { requested: u32, limit: u32 },
    NotEnoughBits { requested: u32, remaining: usize },
    LimitExceedsSource { limit: usize, available: usize },
}

#[cfg(feature = "std")]
impl std::error::Error for GetBitsError {}

impl core::fmt::Display for GetBitsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GetBitsError::TooManyBits { requested, limit } => {
                write!(
                    f,
                    "Cant serve this request. The reader is limited to {} bits, requested {} bits",
                    limit, requested,
                )
            }
            GetBitsError::NotEnoughBits {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "Can't read {} bits, only have {} bits left",
                    requested, remaining,
                )
            }
            GetBitsError::LimitExceedsSource { limit, available } => {
                write!(
                    f,
                    "Bit limit {} is larger than the {} bits in the source",
                    limit, available,
                )
            }
        }
    }
}

impl<'s> BitReader<'s> {
    /// A reader over every bit of `source`.
    pub fn new(source: &'s [u8]) -> BitReader<'s> {
        BitReader {
            idx: 0,
            limit: source.len() * 8,
            source,
        }
    }

    /// A reader over the first `num_bits` bits of `source`.
    pub fn with_limit(source: &'s [u8], num_bits: usize) -> Result<BitReader<'s>, GetBitsError> {
        let available = source.len() * 8;
        if num_bits > available {
            return Err(GetBitsError::LimitExceedsSource {
                limit: num_bits,
                available,
            });
        }
        Ok(BitReader {
            idx: 0,
            limit: num_bits,
            source,
        })
    }

    pub fn bits_left(&self) -> usize {
        self.limit - self.idx
    }

    pub fn bits_read(&self) -> usize {
        self.idx
    }

    pub fn get_bit(&mut self) -> Result<bool, GetBitsError> {
        if self.bits_left() == 0 {
            return Err(GetBitsError::NotEnoughBits {
                requested: 1,
                remaining: 0,
            });
        }
        let bit = msb_bit(self.source[self.idx / 8], (self.idx % 8) as u32);
        self.idx += 1;
        Ok(bit)
    }

    /// Read `n` bits and return them right-aligned, first bit read in the highest position.
    pub fn get_bits(&mut self, n: u32) -> Result<u64, GetBitsError> {
        if n > MAX_CODE_BITS {
            return Err(GetBitsError::TooManyBits {
                requested: n,
                limit: MAX_CODE_BITS,
            });
        }
        if self.bits_left() < n as usize {
            return Err(GetBitsError::NotEnoughBits {
                requested: n,
                remaining: self.bits_left(),
            });
        }

        let mut value = 0u64;
        for _ in 0..n {
            value = (value << 1) | u64::from(self.get_bit()?);
        }
        Ok(value)
    }

    pub fn reset(&mut self, new_source: &'s [u8]) {
        self.idx = 0;
        self.limit = new_source.len() * 8;
        self.source = new_source;
    }
}
