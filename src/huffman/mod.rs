//! Huffman coding is a method of encoding where symbols are assigned a code,
//! and more commonly used symbols get shorter codes, and less commonly
//! used symbols get longer codes. Codes are prefix free, meaning no code
//! is the start of another code.
//!
//! The tree here is canonical: nodes of equal frequency are ordered by a
//! tie-breaker derived from the symbol order, so the same table always
//! produces the same codes. A synthetic stop symbol with frequency zero
//! marks the end of a sequence whose last byte is not full.
mod code;
mod entropy;
mod frequency;
mod huffman_decoder;
mod huffman_encoder;
mod tree;

pub use code::Code;
pub use entropy::{entropy, estimate_buffer_size};
pub use frequency::count_frequencies;
pub use huffman_decoder::*;
pub use huffman_encoder::*;
pub use tree::{HuffmanTreeError, StopSymbol};

use crate::decoding::bit_reader::BitReader;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use tree::{HuffmanTree, NodeId};

/// A prefix codec built once from a frequency table.
///
/// The codec never changes after construction, so a shared reference can be
/// used from several threads at once.
pub struct HuffmanCodec<T> {
    tree: HuffmanTree<T>,
    /// Leaf of every real symbol. The stop leaf is kept in the tree only.
    leaves: BTreeMap<T, NodeId>,
    stop: StopSymbol<T>,
    entropy: f64,
}

impl<T: Ord + Clone> HuffmanCodec<T> {
    /// Build a codec from `(symbol, frequency)` pairs.
    ///
    /// The input order does not matter. Entries with frequency zero take no
    /// part in the tree, but a [`StopSymbol::Value`] still must not appear
    /// anywhere in the table.
    pub fn build(
        frequencies: impl IntoIterator<Item = (T, u64)>,
        stop: StopSymbol<T>,
    ) -> Result<Self, HuffmanTreeError> {
        let mut table = BTreeMap::new();
        for (position, (symbol, frequency)) in frequencies.into_iter().enumerate() {
            if stop.as_value() == Some(&symbol) {
                return Err(HuffmanTreeError::StopSymbolInTable);
            }
            if table.insert(symbol, frequency).is_some() {
                return Err(HuffmanTreeError::DuplicateSymbol { position });
            }
        }
        table.retain(|_, frequency| *frequency > 0);

        let entropy = entropy(table.values().copied());
        let leaves = table
            .keys()
            .cloned()
            .enumerate()
            .map(|(leaf, symbol)| (symbol, leaf))
            .collect();
        let tree = HuffmanTree::build(table)?;

        Ok(HuffmanCodec {
            tree,
            leaves,
            stop,
            entropy,
        })
    }

    /// Count the symbols in `samples` and build a codec from the counts.
    pub fn from_samples(
        samples: impl IntoIterator<Item = T>,
        stop: StopSymbol<T>,
    ) -> Result<Self, HuffmanTreeError> {
        Self::build(count_frequencies(samples), stop)
    }

    /// Pack `symbols` into bytes. Every symbol must be part of the table.
    pub fn encode(&self, symbols: &[T]) -> Result<Vec<u8>, HuffmanEncoderError> {
        let mut encoder = HuffmanEncoder::with_capacity(self, symbols.len());
        for symbol in symbols {
            encoder.encode_symbol(symbol)?;
        }
        Ok(encoder.finish())
    }

    /// Unpack symbols until the stop code or the end of `source`.
    pub fn decode(&self, source: &[u8]) -> Result<Vec<T>, HuffmanDecoderError> {
        self.decode_bits(source, source.len() * 8)
    }

    /// Like [`HuffmanCodec::decode`] but only looks at the first `num_bits` bits.
    ///
    /// A code cut off by the limit is dropped, so any prefix of a valid stream
    /// decodes to the symbols that were completely inside it.
    pub fn decode_bits(&self, source: &[u8], num_bits: usize) -> Result<Vec<T>, HuffmanDecoderError> {
        let mut reader = BitReader::with_limit(source, num_bits)?;
        let mut decoder = HuffmanDecoder::new(self);
        let mut output = Vec::new();

        while reader.bits_left() > 0 {
            match decoder.next_bit(reader.get_bit()?)? {
                DecodeStep::Pending => {}
                DecodeStep::Symbol(symbol) => output.push(symbol.clone()),
                DecodeStep::Stop => break,
            }
        }
        Ok(output)
    }
}

impl<T: Ord> HuffmanCodec<T> {
    pub fn code(&self, symbol: &T) -> Option<Code> {
        self.leaves
            .get(symbol)
            .and_then(|&leaf| self.tree.code(leaf))
    }

    /// All real symbols with their codes, in symbol order.
    pub fn codes(&self) -> impl Iterator<Item = (&T, Code)> + '_ {
        self.leaves
            .iter()
            .filter_map(move |(symbol, &leaf)| Some((symbol, self.tree.code(leaf)?)))
    }
}

impl<T> HuffmanCodec<T> {
    pub fn stop_code(&self) -> Code {
        self.tree.code(self.tree.stop_leaf).unwrap_or(Code::EMPTY)
    }

    pub fn stop_symbol(&self) -> &StopSymbol<T> {
        &self.stop
    }

    /// Number of real symbols, not counting the stop symbol.
    pub fn num_symbols(&self) -> usize {
        self.tree.num_leaves() - 1
    }

    pub fn max_code_len(&self) -> u8 {
        self.tree.max_code_len
    }

    /// Shannon entropy of the frequency table in bits per symbol.
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Byte count that should fit `num_symbols` encoded symbols. See [`estimate_buffer_size`].
    pub fn estimate_buffer_size(&self, num_symbols: usize) -> usize {
        estimate_buffer_size(self.entropy, num_symbols)
    }

    /// xxHash64 over the code of every leaf in tree order, stop leaf last.
    ///
    /// Codecs with equal fingerprints assign the same codes to the same symbol
    /// ranks, so streams produced by one can be read by the other.
    #[cfg(feature = "hash")]
    pub fn fingerprint(&self) -> u64 {
        use core::hash::Hasher;

        let mut hasher = twox_hash::XxHash64::with_seed(0);
        for leaf in 0..self.tree.num_leaves() {
            if let Some(code) = self.tree.code(leaf) {
                hasher.write_u8(code.len);
                hasher.write(&code.bits.to_be_bytes());
            }
        }
        hasher.finish()
    }
}

impl<T> core::fmt::Debug for HuffmanCodec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HuffmanCodec")
            .field("num_symbols", &self.num_symbols())
            .field("max_code_len", &self.max_code_len())
            .field("stop_code", &self.stop_code())
            .field("entropy", &self.entropy)
            .finish()
    }
}

/// Builds a byte codec from `data` itself and checks that it round trips.
/// Panics on any mismatch.
#[cfg(any(test, feature = "fuzz_exports"))]
pub fn round_trip(data: &[u8]) {
    if data.is_empty() {
        return;
    }
    let codec = HuffmanCodec::from_samples(data.iter().copied(), StopSymbol::Null).unwrap();
    let encoded = codec.encode(data).unwrap();
    assert!(encoded.len() <= data.len() * usize::from(codec.max_code_len()) / 8 + 1);
    let decoded = codec.decode(&encoded).unwrap();
    assert_eq!(decoded.as_slice(), data);

    let cut = encoded.len() * 8 / 2;
    let prefix = codec.decode_bits(&encoded, cut).unwrap();
    assert!(data.starts_with(&prefix));
}
