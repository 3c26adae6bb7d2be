//! Radix-64 text encoding for carrying packed bytes in URLs and text fields.
//!
//! Every 3 input bytes become 4 characters, each selecting one of 64
//! alphabet entries with 6 bits. A final group with 1 or 2 leftover bytes is
//! padded with 2 or 1 padding characters respectively.
//!
//! ```
//! use huffpack::radix64;
//!
//! assert_eq!(radix64::encode(&[0x4D, 0x61, 0x6E]), "TWFu");
//! assert_eq!(radix64::encode(&[0x4D]), "TQ==");
//! assert_eq!(radix64::decode("TQ==").unwrap(), [0x4D]);
//! ```

use crate::common::shift::{shift_left, shift_right};
use alloc::string::String;
use alloc::vec::Vec;

const INVALID: u8 = 0xFF;

/// A 64 character alphabet plus a padding character.
#[derive(Clone)]
pub struct Radix64 {
    alphabet: [u8; 64],
    padding: u8,
    /// Maps an ASCII byte back to its 6 bit value, `INVALID` for anything else.
    reverse: [u8; 256],
}

#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Radix64DecodeError {
    InvalidLength { len: usize },
    InvalidCharacter { character: char, index: usize },
}

#[cfg(feature = "std")]
impl std::error::Error for Radix64DecodeError {}

impl core::fmt::Display for Radix64DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Radix64DecodeError::InvalidLength { len } => {
                write!(
                    f,
                    "Radix-64 text must be a multiple of 4 characters long, got {} bytes",
                    len,
                )
            }
            Radix64DecodeError::InvalidCharacter { character, index } => {
                write!(
                    f,
                    "Character {:?} at index {} is not part of the alphabet",
                    character, index,
                )
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum AlphabetError {
    NotAscii { index: usize },
    DuplicateCharacter { character: char },
    PaddingInAlphabet,
}

#[cfg(feature = "std")]
impl std::error::Error for AlphabetError {}

impl core::fmt::Display for AlphabetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AlphabetError::NotAscii { index } => {
                write!(f, "Alphabet entry {} is not a printable ASCII character", index)
            }
            AlphabetError::DuplicateCharacter { character } => {
                write!(f, "Character {:?} appears twice in the alphabet", character)
            }
            AlphabetError::PaddingInAlphabet => {
                write!(f, "The padding character must not be part of the alphabet")
            }
        }
    }
}

impl Radix64 {
    /// `A-Z a-z 0-9 + /` with `=` padding.
    pub const STANDARD: Radix64 =
        Radix64::from_parts(*b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/", b'=');

    /// Like [`Radix64::STANDARD`] with `-` and `_` for the last two entries.
    pub const URL_SAFE: Radix64 =
        Radix64::from_parts(*b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_", b'=');

    /// A converter for a custom alphabet. Entry `i` encodes the 6 bit value `i`.
    pub fn new(alphabet: [u8; 64], padding: u8) -> Result<Radix64, AlphabetError> {
        let mut seen = [false; 256];
        for (index, &character) in alphabet.iter().enumerate() {
            if !character.is_ascii_graphic() {
                return Err(AlphabetError::NotAscii { index });
            }
            if core::mem::replace(&mut seen[usize::from(character)], true) {
                return Err(AlphabetError::DuplicateCharacter {
                    character: char::from(character),
                });
            }
        }
        if !padding.is_ascii_graphic() {
            return Err(AlphabetError::NotAscii { index: 64 });
        }
        if seen[usize::from(padding)] {
            return Err(AlphabetError::PaddingInAlphabet);
        }
        Ok(Radix64::from_parts(alphabet, padding))
    }

    const fn from_parts(alphabet: [u8; 64], padding: u8) -> Radix64 {
        let mut reverse = [INVALID; 256];
        let mut idx = 0;
        while idx < alphabet.len() {
            reverse[alphabet[idx] as usize] = idx as u8;
            idx += 1;
        }
        Radix64 {
            alphabet,
            padding,
            reverse,
        }
    }

    pub fn alphabet(&self) -> &[u8; 64] {
        &self.alphabet
    }

    pub fn padding(&self) -> char {
        char::from(self.padding)
    }

    /// Length of the text produced for `num_bytes` input bytes.
    pub fn encoded_len(num_bytes: usize) -> usize {
        num_bytes.div_ceil(3) * 4
    }

    pub fn encode(&self, source: &[u8]) -> String {
        let mut output = String::with_capacity(Self::encoded_len(source.len()));
        for group in source.chunks(3) {
            let b0 = group[0];
            let b1 = group.get(1).copied().unwrap_or(0);
            let b2 = group.get(2).copied().unwrap_or(0);

            // 76543210 76543210 76543210
            // 000000   111111   222222   333333 -> one character each
            let sextets = [
                shift_right(b0, 2),
                shift_right(shift_left(b0, 6), 2) | shift_right(b1, 4),
                shift_right(shift_left(b1, 4), 2) | shift_right(b2, 6),
                shift_right(shift_left(b2, 2), 2),
            ];
            let data_chars = group.len() + 1;
            for (idx, &sextet) in sextets.iter().enumerate() {
                let character = if idx < data_chars {
                    self.alphabet[usize::from(sextet)]
                } else {
                    self.padding
                };
                output.push(char::from(character));
            }
        }
        output
    }

    /// Decode `text` back into bytes.
    ///
    /// The length must be a multiple of 4 and every character must be part of
    /// the alphabet or the padding character. Output stops at the first
    /// padding character.
    pub fn decode(&self, text: &str) -> Result<Vec<u8>, Radix64DecodeError> {
        let text = text.as_bytes();
        if text.len() % 4 != 0 {
            return Err(Radix64DecodeError::InvalidLength { len: text.len() });
        }
        if let Some(index) = text
            .iter()
            .position(|&c| c != self.padding && self.reverse[usize::from(c)] == INVALID)
        {
            return Err(Radix64DecodeError::InvalidCharacter {
                character: invalid_char_at(text, index),
                index,
            });
        }

        let mut output = Vec::with_capacity(text.len() / 4 * 3);
        // Bits collected so far, right aligned, and how many of them are valid.
        let mut accumulator: u32 = 0;
        let mut num_bits: u32 = 0;
        for &c in text {
            if c == self.padding {
                break;
            }
            accumulator = (accumulator << 6) | u32::from(self.reverse[usize::from(c)]);
            num_bits += 6;
            if num_bits >= 8 {
                num_bits -= 8;
                output.push((accumulator >> num_bits) as u8);
                accumulator &= (1 << num_bits) - 1;
            }
        }
        Ok(output)
    }
}

impl Default for Radix64 {
    fn default() -> Self {
        Radix64::STANDARD
    }
}

impl core::fmt::Debug for Radix64 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Radix64")
            .field("alphabet", &core::str::from_utf8(&self.alphabet).unwrap_or_default())
            .field("padding", &self.padding())
            .finish()
    }
}

/// The full character starting at byte `index`, for error messages on non-ASCII input.
fn invalid_char_at(text: &[u8], index: usize) -> char {
    core::str::from_utf8(&text[index..])
        .ok()
        .and_then(|rest| rest.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Encode with [`Radix64::STANDARD`].
pub fn encode(source: &[u8]) -> String {
    Radix64::STANDARD.encode(source)
}

/// Decode with [`Radix64::STANDARD`].
pub fn decode(text: &str) -> Result<Vec<u8>, Radix64DecodeError> {
    Radix64::STANDARD.decode(text)
}

/// Checks that `data` survives an encode/decode cycle with the standard alphabet.
/// Panics on any mismatch.
#[cfg(any(test, feature = "fuzz_exports"))]
pub fn round_trip(data: &[u8]) {
    let text = encode(data);
    assert_eq!(text.len(), Radix64::encoded_len(data.len()));
    assert_eq!(decode(&text).unwrap(), data);
}
