#![no_main]

use libfuzzer_sys::fuzz_target;
use lz78pack::{BitFormat, CodecConfig, Lz78Codec};

fuzz_target!(|data: &[u8]| {
    // Decompression may fail on invalid input - that's OK
    // We're looking for panics/crashes, not errors
    let codec = Lz78Codec::new(CodecConfig { format: BitFormat::Auto, ..Default::default() });
    let _ = codec.decompress(data);
});
