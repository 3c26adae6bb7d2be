use super::tree::{NodeId, NodeKind};
use super::HuffmanCodec;
use crate::decoding::bit_reader::GetBitsError;

/// Walks the tree one bit at a time.
///
/// The state starts at the root, follows the one-child on a `1` and the
/// zero-child on a `0`, and jumps back to the root after every real symbol.
/// Reaching the stop leaf ends the stream.
pub struct HuffmanDecoder<'c, T> {
    codec: &'c HuffmanCodec<T>,
    state: NodeId,
    bits_consumed: usize,
}

/// What a single bit did to the decoder.
#[derive(Debug, PartialEq, Eq)]
pub enum DecodeStep<'c, T> {
    /// Still inside the tree.
    Pending,
    /// Reached the leaf of a real symbol. The decoder is back at the root.
    Symbol(&'c T),
    /// Reached the stop leaf.
    Stop,
}

#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum HuffmanDecoderError {
    GetBitsError(GetBitsError),
    /// A bit arrived while the decoder was resting on a leaf, e.g. after the stop leaf.
    DescendFromLeaf { bit_offset: usize },
}

#[cfg(feature = "std")]
impl std::error::Error for HuffmanDecoderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HuffmanDecoderError::GetBitsError(source) => Some(source),
            _ => None,
        }
    }
}

impl core::fmt::Display for HuffmanDecoderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HuffmanDecoderError::GetBitsError(e) => write!(f, "{}", e),
            HuffmanDecoderError::DescendFromLeaf { bit_offset } => {
                write!(
                    f,
                    "Corrupt stream: bit {} would descend from a leaf",
                    bit_offset,
                )
            }
        }
    }
}

impl From<GetBitsError> for HuffmanDecoderError {
    fn from(val: GetBitsError) -> Self {
        Self::GetBitsError(val)
    }
}

impl<'c, T> HuffmanDecoder<'c, T> {
    pub fn new(codec: &'c HuffmanCodec<T>) -> HuffmanDecoder<'c, T> {
        HuffmanDecoder {
            codec,
            state: codec.tree.root,
            bits_consumed: 0,
        }
    }

    pub fn reset(&mut self) {
        self.state = self.codec.tree.root;
        self.bits_consumed = 0;
    }

    /// True between symbols, i.e. when no partial code has been consumed.
    pub fn is_at_root(&self) -> bool {
        self.state == self.codec.tree.root
    }

    pub fn bits_consumed(&self) -> usize {
        self.bits_consumed
    }

    pub fn next_bit(&mut self, bit: bool) -> Result<DecodeStep<'c, T>, HuffmanDecoderError> {
        let codec: &'c HuffmanCodec<T> = self.codec;
        let nodes = &codec.tree.nodes;

        let next = match nodes[self.state].kind {
            NodeKind::Branch { zero, one } => {
                if bit {
                    one
                } else {
                    zero
                }
            }
            NodeKind::Leaf { .. } => {
                return Err(HuffmanDecoderError::DescendFromLeaf {
                    bit_offset: self.bits_consumed,
                })
            }
        };
        self.bits_consumed += 1;

        match &nodes[next].kind {
            NodeKind::Branch { .. } => {
                self.state = next;
                Ok(DecodeStep::Pending)
            }
            NodeKind::Leaf {
                symbol: Some(symbol),
                ..
            } => {
                self.state = codec.tree.root;
                Ok(DecodeStep::Symbol(symbol))
            }
            NodeKind::Leaf { symbol: None, .. } => {
                self.state = next;
                Ok(DecodeStep::Stop)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DecodeStep, HuffmanDecoder, HuffmanDecoderError};
    use crate::decoding::bit_reader::GetBitsError;
    use crate::huffman::{HuffmanCodec, StopSymbol};
    use alloc::vec;
    use alloc::vec::Vec;

    fn abc() -> HuffmanCodec<char> {
        // a = 0, b = 10, c = 110, stop = 111
        HuffmanCodec::build([('a', 5), ('b', 2), ('c', 1)], StopSymbol::Null).unwrap()
    }

    #[test]
    fn stops_at_stop_code() {
        let codec = abc();
        assert_eq!(codec.decode(&[0b0010_0111]).unwrap(), vec!['a', 'a', 'b', 'a']);
        // Everything after the stop code is ignored.
        assert_eq!(codec.decode(&[0b0111_0000, 0xFF]).unwrap(), vec!['a']);
    }

    #[test]
    fn ends_on_partial_stop_code() {
        let codec = abc();
        assert_eq!(codec.decode(&[0b1010_1001]).unwrap(), vec!['b', 'b', 'b', 'a']);
        assert_eq!(codec.decode(&[0b1010_1011]).unwrap(), vec!['b', 'b', 'b']);
    }

    #[test]
    fn ends_on_exhaustion() {
        let codec = abc();
        assert_eq!(codec.decode(&[0]).unwrap(), vec!['a'; 8]);
        assert_eq!(codec.decode(&[]).unwrap(), Vec::<char>::new());
    }

    #[test]
    fn bit_limit() {
        let codec = abc();
        // 10 10 10 0 1 cut after the second b
        assert_eq!(codec.decode_bits(&[0b1010_1001], 4).unwrap(), vec!['b', 'b']);
        assert_eq!(codec.decode_bits(&[0b1010_1001], 5).unwrap(), vec!['b', 'b']);
        assert_eq!(codec.decode_bits(&[0b1010_1001], 0).unwrap(), Vec::<char>::new());
        assert_eq!(
            codec.decode_bits(&[0b1010_1001], 9),
            Err(HuffmanDecoderError::GetBitsError(
                GetBitsError::LimitExceedsSource {
                    limit: 9,
                    available: 8
                }
            ))
        );
    }

    #[test]
    fn step_by_step() {
        let codec = abc();
        let mut decoder = HuffmanDecoder::new(&codec);
        assert!(decoder.is_at_root());
        assert_eq!(decoder.next_bit(true).unwrap(), DecodeStep::Pending);
        assert!(!decoder.is_at_root());
        assert_eq!(decoder.next_bit(true).unwrap(), DecodeStep::Pending);
        assert_eq!(decoder.next_bit(false).unwrap(), DecodeStep::Symbol(&'c'));
        assert!(decoder.is_at_root());
        assert_eq!(decoder.next_bit(true).unwrap(), DecodeStep::Pending);
        assert_eq!(decoder.next_bit(true).unwrap(), DecodeStep::Pending);
        assert_eq!(decoder.next_bit(true).unwrap(), DecodeStep::Stop);
        assert_eq!(decoder.bits_consumed(), 6);
    }

    #[test]
    fn descending_past_the_stop_leaf_is_corrupt() {
        let codec = abc();
        let mut decoder = HuffmanDecoder::new(&codec);
        for _ in 0..3 {
            decoder.next_bit(true).unwrap();
        }
        assert_eq!(
            decoder.next_bit(false),
            Err(HuffmanDecoderError::DescendFromLeaf { bit_offset: 3 })
        );

        decoder.reset();
        assert!(decoder.is_at_root());
        assert_eq!(decoder.next_bit(false).unwrap(), DecodeStep::Symbol(&'a'));
    }
}
