#![no_main]

use libfuzzer_sys::fuzz_target;
use lz78pack::{decode, encode, Alphabet};

fuzz_target!(|data: &[u8]| {
    // Map arbitrary bytes onto the text alphabet so every input is encodable
    let alphabet = Alphabet::text();
    let symbols: Vec<u8> = alphabet.symbols().collect();
    let text: Vec<u8> = data.iter().map(|&b| symbols[b as usize % symbols.len()]).collect();

    let stream = encode(&text, &alphabet).expect("text alphabet input must encode");
    let restored = decode(&stream, &alphabet).expect("encoder output must decode");
    assert_eq!(restored, text);
});
