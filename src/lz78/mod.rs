//! LZ78 engine: phrase parsing, record emission, and stream reconstruction.
//!
//! A stream is a sequence of records with no header. Record `i` is the prefix
//! index in [`index_width(i)`](crate::dictionary::index_width) bits followed by
//! the last symbol's code in the alphabet's symbol width. When the input ends on
//! a phrase that is already in the dictionary, the final record is the index of
//! that phrase alone, recognised by the decoder only by the stream running out.

pub mod builder;
pub mod emitter;
pub mod parser;

pub use builder::{build_phrases, PhraseParse};
pub use emitter::emit;
pub use parser::{parse, Decoded};

use crate::alphabet::Alphabet;
use crate::bits::BitStream;
use crate::error::Result;

/// Compress `text` to a bit stream
pub fn encode(text: &[u8], alphabet: &Alphabet) -> Result<BitStream> {
    let phrases = build_phrases(text, alphabet)?;
    emit(&phrases, alphabet)
}

/// Decompress a bit stream produced by [`encode`] with the same alphabet
pub fn decode(bits: &BitStream, alphabet: &Alphabet) -> Result<Vec<u8>> {
    Ok(parse(bits, alphabet)?.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn ab() -> Alphabet {
        Alphabet::from_symbols(b"AB").unwrap()
    }

    #[test]
    fn test_known_stream() {
        // (0,A) (1,B) (2,B) (0,B) with index widths 1, 1, 2, 2
        let bits = encode(b"AABABBB", &ab()).unwrap();
        assert_eq!(bits.to_string(), "0011101001");
        assert_eq!(decode(&bits, &ab()).unwrap(), b"AABABBB");
    }

    #[test]
    fn test_repeated_tail_round_trip() {
        let texts: [&[u8]; 6] = [b"AABAB", b"AA", b"ABA", b"ABAB", b"AAAAAA", b"BABBAB"];
        for text in texts {
            let bits = encode(text, &ab()).unwrap();
            assert_eq!(decode(&bits, &ab()).unwrap(), text, "{}", String::from_utf8_lossy(text));
        }
    }

    #[test]
    fn test_empty() {
        let bits = encode(b"", &ab()).unwrap();
        assert!(bits.is_empty());
        assert!(decode(&bits, &ab()).unwrap().is_empty());
    }

    #[test]
    fn test_text_alphabet_round_trip() {
        let alphabet = Alphabet::text();
        let text = b"THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG. the quick brown fox? yes: it jumps; over, and over";
        let bits = encode(text, &alphabet).unwrap();
        assert_eq!(decode(&bits, &alphabet).unwrap(), text);
    }

    #[test]
    fn test_unknown_symbol() {
        let err = encode(b"ABCAB", &ab()).unwrap_err();
        assert!(matches!(err, Error::UnknownSymbol { symbol: b'C', position: 2 }));
    }
}
