#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate huffpack;
use huffpack::radix64::{decode, round_trip};

fuzz_target!(|data: &[u8]| {
    round_trip(data);
    // Arbitrary text must be rejected or accepted, never panic.
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = decode(text);
    }
});
