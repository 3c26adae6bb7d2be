use super::HuffmanCodec;
use crate::encoding::bit_writer::BitWriter;
use alloc::vec::Vec;

#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum HuffmanEncoderError {
    /// The symbol at `index` of the input is not in the frequency table.
    UnknownSymbol { index: usize },
}

#[cfg(feature = "std")]
impl std::error::Error for HuffmanEncoderError {}

impl core::fmt::Display for HuffmanEncoderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HuffmanEncoderError::UnknownSymbol { index } => {
                write!(
                    f,
                    "Symbol at index {} is not part of the frequency table",
                    index,
                )
            }
        }
    }
}

/// Packs symbols into bytes, one code after the other, most significant bit first.
///
/// Finishing the encoder fills the rest of the last byte with as much of the
/// stop code as fits. A stream that ends byte aligned gets no stop bits at all.
pub struct HuffmanEncoder<'c, T> {
    codec: &'c HuffmanCodec<T>,
    writer: BitWriter,
    symbols_written: usize,
}

impl<'c, T: Ord> HuffmanEncoder<'c, T> {
    pub fn new(codec: &'c HuffmanCodec<T>) -> Self {
        HuffmanEncoder {
            codec,
            writer: BitWriter::new(),
            symbols_written: 0,
        }
    }

    /// An encoder whose buffer is pre-sized for `num_symbols` symbols.
    pub fn with_capacity(codec: &'c HuffmanCodec<T>, num_symbols: usize) -> Self {
        HuffmanEncoder {
            codec,
            writer: BitWriter::with_capacity(codec.estimate_buffer_size(num_symbols)),
            symbols_written: 0,
        }
    }

    pub fn encode_symbol(&mut self, symbol: &T) -> Result<(), HuffmanEncoderError> {
        let code = self
            .codec
            .code(symbol)
            .ok_or(HuffmanEncoderError::UnknownSymbol {
                index: self.symbols_written,
            })?;
        self.writer.write_bits(code.bits, u32::from(code.len));
        self.symbols_written += 1;
        Ok(())
    }

    pub fn symbols_written(&self) -> usize {
        self.symbols_written
    }

    pub fn bits_written(&self) -> usize {
        self.writer.bits_written()
    }

    /// Terminate the stream and return the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        let free = self.writer.misaligned();
        if free > 0 {
            let stop = self.codec.stop_code();
            self.writer.write_bits(stop.bits, free.min(u32::from(stop.len)));
        }
        self.writer.dump()
    }
}
