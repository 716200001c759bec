pub mod alphabet;
pub mod batch;
pub mod bits;
pub mod dictionary;
pub mod error;
pub mod format;
pub mod lz78;

pub use alphabet::{Alphabet, AlphabetBuilder};
pub use batch::BatchCodec;
pub use bits::BitStream;
pub use dictionary::{index_width, PhraseEntry, PhraseTable, ReversePhraseTable};
pub use error::{Error, Result};
pub use format::BitFormat;
pub use lz78::{decode, encode};

use std::io::{Read, Write};

use log::debug;

/// Configuration for compression and decompression
#[derive(Clone, Debug)]
pub struct CodecConfig {
    /// Symbol alphabet; both sides of a stream must use the same one
    pub alphabet: Alphabet,
    /// Serialization of compressed output (Auto detects on read, writes text)
    pub format: BitFormat,
    /// Number of threads for batch work (0 = auto, 1 = single-threaded)
    pub num_threads: usize,
    /// Drop trailing `\r` and `\n` from plaintext before compressing
    pub trim_line_endings: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::text(),
            format: BitFormat::Text,
            num_threads: 0,
            trim_line_endings: true,
        }
    }
}

/// Statistics from a compression
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompressStats {
    /// Symbols compressed (after line-ending trimming)
    pub input_symbols: u64,
    /// Phrases registered in the dictionary
    pub phrases: u64,
    /// Records written, including an index-only final record
    pub records: u64,
    pub output_bits: u64,
    /// Serialized output size
    pub output_bytes: u64,
    /// Stream ends with an index-only record
    pub tail_record: bool,
}

/// Statistics from a decompression
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecompressStats {
    pub input_bytes: u64,
    pub input_bits: u64,
    pub records: u64,
    pub phrases: u64,
    pub output_symbols: u64,
    pub tail_record: bool,
}

/// Compressor/decompressor bound to one configuration
///
/// Holds no state between calls: every call builds its own dictionary.
#[derive(Clone, Debug, Default)]
pub struct Lz78Codec {
    config: CodecConfig,
}

impl Lz78Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress plaintext into its serialized bit stream
    pub fn compress(&self, input: &[u8]) -> Result<(Vec<u8>, CompressStats)> {
        let text = self.prepare(input);
        let parse = lz78::build_phrases(text, &self.config.alphabet)?;
        let bits = lz78::emit(&parse, &self.config.alphabet)?;
        let output = self.config.format.serialize(&bits);

        let stats = CompressStats {
            input_symbols: parse.input_len as u64,
            phrases: parse.table.len() as u64,
            records: parse.entries.len() as u64,
            output_bits: bits.len() as u64,
            output_bytes: output.len() as u64,
            tail_record: parse.has_repeat_tail(),
        };
        debug!(
            "compressed {} symbols to {} bits ({} format)",
            stats.input_symbols,
            stats.output_bits,
            self.config.format.name()
        );

        Ok((output, stats))
    }

    /// Decompress a serialized bit stream back into plaintext
    pub fn decompress(&self, input: &[u8]) -> Result<(Vec<u8>, DecompressStats)> {
        let bits = self.config.format.deserialize(input)?;
        let decoded = lz78::parse(&bits, &self.config.alphabet)?;

        let stats = DecompressStats {
            input_bytes: input.len() as u64,
            input_bits: bits.len() as u64,
            records: decoded.records as u64,
            phrases: decoded.table.len() as u64,
            output_symbols: decoded.text.len() as u64,
            tail_record: decoded.tail_record,
        };

        Ok((decoded.text, stats))
    }

    /// Compress everything from `input` and write it to `output`
    pub fn compress_to<R: Read, W: Write>(&self, mut input: R, mut output: W) -> Result<CompressStats> {
        let mut text = Vec::new();
        input.read_to_end(&mut text)?;
        let (compressed, stats) = self.compress(&text)?;
        output.write_all(&compressed)?;
        output.flush()?;
        Ok(stats)
    }

    /// Decompress everything from `input` and write it to `output`
    pub fn decompress_to<R: Read, W: Write>(
        &self,
        mut input: R,
        mut output: W,
    ) -> Result<DecompressStats> {
        let mut compressed = Vec::new();
        input.read_to_end(&mut compressed)?;
        let (text, stats) = self.decompress(&compressed)?;
        output.write_all(&text)?;
        output.flush()?;
        Ok(stats)
    }

    /// Compress, decompress, and check the result matches the input
    ///
    /// Fails with `RoundTripMismatch` at the first differing symbol.
    pub fn verify(&self, input: &[u8]) -> Result<CompressStats> {
        let (compressed, stats) = self.compress(input)?;
        let (restored, _) = self.decompress(&compressed)?;

        match first_difference(self.prepare(input), &restored) {
            Some(position) => Err(Error::RoundTripMismatch { position }),
            None => Ok(stats),
        }
    }

    fn prepare<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        if self.config.trim_line_endings {
            let end = input.iter().rposition(|&b| b != b'\n' && b != b'\r').map_or(0, |i| i + 1);
            &input[..end]
        } else {
            input
        }
    }
}

/// Offset of the first byte where `left` and `right` differ, `None` if identical
pub fn first_difference(left: &[u8], right: &[u8]) -> Option<usize> {
    left.iter()
        .zip(right)
        .position(|(a, b)| a != b)
        .or_else(|| (left.len() != right.len()).then(|| left.len().min(right.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_decompress() {
        let codec = Lz78Codec::default();
        let (compressed, stats) = codec.compress(b"HELLO HELLO HELLO\n").unwrap();

        assert_eq!(stats.input_symbols, 17);
        assert_eq!(stats.output_bytes, compressed.len() as u64);
        assert_eq!(stats.output_bits, compressed.len() as u64);

        let (text, dstats) = codec.decompress(&compressed).unwrap();
        assert_eq!(text, b"HELLO HELLO HELLO");
        assert_eq!(dstats.records, stats.records);
        assert_eq!(dstats.phrases, stats.phrases);
        assert_eq!(dstats.tail_record, stats.tail_record);
    }

    #[test]
    fn test_keep_line_endings() {
        let codec = Lz78Codec::new(CodecConfig { trim_line_endings: false, ..Default::default() });
        let err = codec.compress(b"HELLO\n").unwrap_err();
        assert!(matches!(err, Error::UnknownSymbol { symbol: b'\n', position: 5 }));
    }

    #[test]
    fn test_packed_format() {
        let config = CodecConfig { format: BitFormat::Packed, ..Default::default() };
        let codec = Lz78Codec::new(config);
        let (compressed, stats) = codec.compress(b"ABABABABAB").unwrap();
        assert_eq!(stats.output_bytes, stats.output_bits.div_ceil(8) + 1);
        assert_eq!(codec.decompress(&compressed).unwrap().0, b"ABABABABAB");

        // Auto detection reads either serialization
        let auto = Lz78Codec::new(CodecConfig { format: BitFormat::Auto, ..Default::default() });
        assert_eq!(auto.decompress(&compressed).unwrap().0, b"ABABABABAB");
    }

    #[test]
    fn test_streams() {
        let codec = Lz78Codec::default();
        let mut compressed = Vec::new();
        let stats = codec.compress_to(&b"TO BE OR NOT TO BE"[..], &mut compressed).unwrap();
        assert_eq!(stats.output_bytes, compressed.len() as u64);

        let mut text = Vec::new();
        codec.decompress_to(compressed.as_slice(), &mut text).unwrap();
        assert_eq!(text, b"TO BE OR NOT TO BE");
    }

    #[test]
    fn test_verify() {
        let codec = Lz78Codec::default();
        let stats = codec.verify(b"AABABBBABAABABBBABBABB\r\n").unwrap();
        assert_eq!(stats.input_symbols, 22);
        assert!(matches!(codec.verify(b"NOT OK!"), Err(Error::UnknownSymbol { symbol: b'!', .. })));
    }

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference(b"ABC", b"ABC"), None);
        assert_eq!(first_difference(b"ABC", b"ABD"), Some(2));
        assert_eq!(first_difference(b"ABC", b"AB"), Some(2));
        assert_eq!(first_difference(b"", b"A"), Some(0));
    }
}
