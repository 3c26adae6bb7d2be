//! A deterministic Huffman codec for short symbol sequences, plus a
//! radix-64 text layer for carrying the packed bytes inside URLs.
//!
//! A [`HuffmanCodec`] is built once from a frequency table and a stop symbol.
//! The tree shape depends only on the table contents, never on iteration
//! order, so every codec built from the same table produces the same bytes.
//!
//! ```
//! use huffpack::{radix64, HuffmanCodec, StopSymbol};
//!
//! let codec = HuffmanCodec::build([('a', 5), ('b', 2), ('c', 1)], StopSymbol::Null).unwrap();
//! let packed = codec.encode(&['a', 'a', 'b', 'a']).unwrap();
//! let text = radix64::encode(&packed);
//!
//! let unpacked = radix64::decode(&text).unwrap();
//! assert_eq!(codec.decode(&unpacked).unwrap(), ['a', 'a', 'b', 'a']);
//! ```
#![no_std]
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[cfg(feature = "std")]
pub const VERBOSE: bool = false;

macro_rules! vprintln {
    ($($x:expr),*) => {
        #[cfg(feature = "std")]
        if crate::VERBOSE {
            std::println!($($x),*);
        }
    }
}

pub mod common;
pub mod decoding;
mod encoding;
pub mod huffman;
pub mod radix64;
mod tests;

pub use huffman::{Code, HuffmanCodec, StopSymbol};
pub use radix64::Radix64;
