#![cfg(test)]

use crate::huffman::{HuffmanCodec, StopSymbol};
use crate::radix64;
use alloc::vec;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Item {
    A,
    B,
    C,
    Stop,
}

fn random_table(rng: &mut SmallRng, num_symbols: u16) -> Vec<(u16, u64)> {
    (0..num_symbols)
        .map(|symbol| (symbol, rng.gen_range(1..1000)))
        .collect()
}

fn random_message(rng: &mut SmallRng, table: &[(u16, u64)], len: usize) -> Vec<u16> {
    (0..len)
        .map(|_| table[rng.gen_range(0..table.len())].0)
        .collect()
}

fn encoded_bits<T: Ord + Clone>(codec: &HuffmanCodec<T>, message: &[T]) -> usize {
    message
        .iter()
        .map(|symbol| usize::from(codec.code(symbol).unwrap().len))
        .sum()
}

#[test]
fn three_item_scenario() {
    let codec = HuffmanCodec::build(
        [(Item::A, 5), (Item::B, 2), (Item::C, 1)],
        StopSymbol::Value(Item::Stop),
    )
    .unwrap();

    let a = codec.code(&Item::A).unwrap();
    let b = codec.code(&Item::B).unwrap();
    let c = codec.code(&Item::C).unwrap();
    assert!(a.len < b.len && b.len < c.len);

    let message = [Item::A, Item::A, Item::B, Item::A];
    let encoded = codec.encode(&message).unwrap();
    assert_eq!(encoded.len(), encoded_bits(&codec, &message).div_ceil(8));
    assert_eq!(encoded.len(), 1);
    assert_eq!(codec.decode(&encoded).unwrap(), message);

    assert!(HuffmanCodec::build(
        [(Item::A, 5), (Item::Stop, 2)],
        StopSymbol::Value(Item::Stop)
    )
    .is_err());
}

#[test]
fn random_round_trips() {
    let mut rng = SmallRng::seed_from_u64(0xDEADBEEF);
    for _ in 0..200 {
        let num_symbols = rng.gen_range(1..300);
        let table = random_table(&mut rng, num_symbols);
        let codec = HuffmanCodec::build(table.iter().copied(), StopSymbol::Null).unwrap();
        let len = rng.gen_range(0..500);
        let message = random_message(&mut rng, &table, len);

        let encoded = codec.encode(&message).unwrap();
        assert_eq!(encoded.len(), encoded_bits(&codec, &message).div_ceil(8));
        assert_eq!(codec.decode(&encoded).unwrap(), message);
    }
}

#[test]
fn same_table_same_bytes() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..50 {
        // Few distinct frequencies to force plenty of ties.
        let mut table: Vec<(u16, u64)> = (0..rng.gen_range(2..100))
            .map(|symbol| (symbol, rng.gen_range(1..4)))
            .collect();
        let message = random_message(&mut rng, &table, 200);
        let first = HuffmanCodec::build(table.iter().copied(), StopSymbol::Null).unwrap();
        table.shuffle(&mut rng);
        let second = HuffmanCodec::build(table.iter().copied(), StopSymbol::Null).unwrap();

        assert_eq!(first.encode(&message).unwrap(), second.encode(&message).unwrap());
        assert_eq!(first.stop_code(), second.stop_code());
    }
}

#[test]
fn byte_aligned_streams_have_no_stop_byte() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut aligned_seen = 0;
    for _ in 0..2000 {
        let table = random_table(&mut rng, 12);
        let codec = HuffmanCodec::build(table.iter().copied(), StopSymbol::Null).unwrap();
        let len = rng.gen_range(1..40);
        let message = random_message(&mut rng, &table, len);
        let bits = encoded_bits(&codec, &message);
        if bits % 8 != 0 {
            continue;
        }
        aligned_seen += 1;
        let encoded = codec.encode(&message).unwrap();
        assert_eq!(encoded.len() * 8, bits);
        assert_eq!(codec.decode(&encoded).unwrap(), message);
    }
    assert!(aligned_seen > 0);
}

#[test]
fn every_prefix_decodes() {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    for _ in 0..20 {
        let num_symbols = rng.gen_range(1..40);
        let table = random_table(&mut rng, num_symbols);
        let codec = HuffmanCodec::build(table.iter().copied(), StopSymbol::Null).unwrap();
        let message = random_message(&mut rng, &table, 60);
        let encoded = codec.encode(&message).unwrap();

        // Bit offset at which each symbol's code is complete.
        let mut ends = Vec::with_capacity(message.len());
        let mut offset = 0;
        for symbol in &message {
            offset += usize::from(codec.code(symbol).unwrap().len);
            ends.push(offset);
        }

        for cut in 0..=encoded.len() * 8 {
            let complete = ends.iter().take_while(|&&end| end <= cut).count();
            let decoded = codec.decode_bits(&encoded, cut).unwrap();
            assert_eq!(decoded, message[..complete], "cut at bit {}", cut);
        }
    }
}

#[test]
fn random_bytes_never_corrupt_a_valid_tree() {
    let mut rng = SmallRng::seed_from_u64(99);
    let table = random_table(&mut rng, 50);
    let codec = HuffmanCodec::build(table, StopSymbol::Null).unwrap();
    for _ in 0..500 {
        let len = rng.gen_range(0..64);
        let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        assert!(codec.decode(&bytes).is_ok());
    }
}

#[test]
fn single_symbol_table() {
    let codec = HuffmanCodec::build([(b'x', 10)], StopSymbol::Null).unwrap();
    assert_eq!(codec.code(&b'x').unwrap().len, 1);
    for len in 0..20 {
        let message = vec![b'x'; len];
        let encoded = codec.encode(&message).unwrap();
        assert_eq!(encoded.len(), len.div_ceil(8));
        assert_eq!(codec.decode(&encoded).unwrap(), message);
    }
}

#[test]
fn radix64_random_round_trips() {
    let mut rng = SmallRng::seed_from_u64(0xB64);
    for _ in 0..500 {
        let len = rng.gen_range(0..200);
        let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let text = radix64::encode(&bytes);
        assert_eq!(text.len(), bytes.len().div_ceil(3) * 4);
        assert_eq!(radix64::decode(&text).unwrap(), bytes);
    }
}

#[test]
fn huffman_through_radix64() {
    let codec = HuffmanCodec::from_samples(
        "the quick brown fox jumps over the lazy dog".bytes(),
        StopSymbol::Null,
    )
    .unwrap();
    let message = b"the lazy fox jumps over the quick brown dog";
    let text = radix64::encode(&codec.encode(message).unwrap());
    assert!(text
        .bytes()
        .all(|c| c.is_ascii_alphanumeric() || c == b'+' || c == b'/' || c == b'='));
    let decoded = codec.decode(&radix64::decode(&text).unwrap()).unwrap();
    assert_eq!(decoded, message);
}

#[cfg(feature = "std")]
#[test]
fn shared_between_threads() {
    let mut rng = SmallRng::seed_from_u64(1234);
    let table = random_table(&mut rng, 100);
    let codec = HuffmanCodec::build(table.iter().copied(), StopSymbol::Null).unwrap();
    let messages: Vec<Vec<u16>> = (0..8)
        .map(|_| random_message(&mut rng, &table, 1000))
        .collect();
    let expected: Vec<Vec<u8>> = messages
        .iter()
        .map(|message| codec.encode(message).unwrap())
        .collect();

    std::thread::scope(|scope| {
        for (message, expected) in messages.iter().zip(&expected) {
            let codec = &codec;
            scope.spawn(move || {
                let encoded = codec.encode(message).unwrap();
                assert_eq!(&encoded, expected);
                assert_eq!(&codec.decode(&encoded).unwrap(), message);
            });
        }
    });
}
