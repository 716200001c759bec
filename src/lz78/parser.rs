use log::{debug, trace};

use crate::alphabet::Alphabet;
use crate::bits::{BitReader, BitStream};
use crate::dictionary::{index_width, ReversePhraseTable};
use crate::error::{Error, Result};

/// Output of a decode
#[derive(Clone, Debug)]
pub struct Decoded {
    /// Reconstructed text
    pub text: Vec<u8>,
    /// Dictionary rebuilt from the stream
    pub table: ReversePhraseTable,
    /// Records read, including an index-only final record
    pub records: usize,
    /// Whether the stream ended with an index-only record
    pub tail_record: bool,
}

/// Rebuild the text and dictionary from a record stream
///
/// Before each record the index width is derived from the record number. When
/// fewer bits remain than a full record needs, the remainder must be exactly
/// one index field naming a known phrase; that phrase ends the text. Anything
/// else is a `TruncatedStream`.
///
/// A stream that lost exactly its last symbol field is indistinguishable from
/// one with a legitimate index-only tail and decodes without error.
pub fn parse(bits: &BitStream, alphabet: &Alphabet) -> Result<Decoded> {
    let symbol_width = alphabet.symbol_width();
    let mut reader = BitReader::new(bits);
    let mut table = ReversePhraseTable::new();
    let mut text = Vec::with_capacity(bits.len());
    let mut record = 1usize;
    let mut tail_record = false;

    while !reader.is_exhausted() {
        let width = index_width(record);
        let remaining = reader.remaining();
        let expected = width as usize + symbol_width as usize;

        if remaining < expected {
            let index = if remaining == width as usize { Some(reader.read_bits(width)?) } else { None };
            match index.and_then(|index| table.expand_into(index, &mut text)) {
                Some(len) => {
                    trace!("record {}: final index-only record, {} symbols", record, len);
                    tail_record = true;
                    break;
                }
                None => return Err(Error::TruncatedStream { record, remaining, expected }),
            }
        }

        let prefix = reader.read_bits(width)?;
        let code_offset = reader.position();
        let code = reader.read_bits(symbol_width)?;
        let symbol = alphabet.code_to_symbol(code, code_offset)?;

        let index = table.push(prefix, symbol, record)?;
        table
            .expand_into(index, &mut text)
            .ok_or_else(|| Error::Internal(format!("phrase {} vanished after insert", index)))?;
        trace!("record {}: prefix {}, symbol {:?}", record, prefix, symbol as char);

        record += 1;
    }

    let records = if tail_record { record } else { record - 1 };
    debug!(
        "decoded {} records from {} bits into {} symbols ({} phrases)",
        records,
        bits.len(),
        text.len(),
        table.len()
    );

    Ok(Decoded { text, table, records, tail_record })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab() -> Alphabet {
        Alphabet::from_symbols(b"AB").unwrap()
    }

    fn bits(s: &str) -> BitStream {
        let values: Vec<bool> = s.bytes().map(|b| b == b'1').collect();
        BitStream::from_bits(&values)
    }

    #[test]
    fn test_known_stream() {
        let decoded = parse(&bits("0011101001"), &ab()).unwrap();
        assert_eq!(decoded.text, b"AABABBB");
        assert_eq!(decoded.records, 4);
        assert!(!decoded.tail_record);
        assert_eq!(decoded.table.len(), 4);
        assert_eq!(decoded.table.phrase(3).unwrap(), b"ABB");
    }

    #[test]
    fn test_index_only_tail() {
        let decoded = parse(&bits("001110"), &ab()).unwrap();
        assert_eq!(decoded.text, b"AABAB");
        assert_eq!(decoded.records, 3);
        assert!(decoded.tail_record);
        // The tail does not register a phrase
        assert_eq!(decoded.table.len(), 2);
    }

    #[test]
    fn test_empty_stream() {
        let decoded = parse(&BitStream::new(), &ab()).unwrap();
        assert!(decoded.text.is_empty());
        assert_eq!(decoded.records, 0);
    }

    #[test]
    fn test_unknown_prefix_is_corrupt_dictionary() {
        // Record 3 points at phrase 3, which does not exist yet
        let err = parse(&bits("0011111"), &ab()).unwrap_err();
        assert!(matches!(err, Error::CorruptDictionary { index: 3, record: 3 }));
    }

    #[test]
    fn test_invalid_code() {
        // A=0, B=1, C=2 in two bits; code 3 is unmapped
        let alphabet = Alphabet::from_symbols(b"ABC").unwrap();
        let err = parse(&bits("011"), &alphabet).unwrap_err();
        assert!(matches!(err, Error::InvalidCode { code: 3, bit_offset: 1 }));
    }

    #[test]
    fn test_short_remainder_is_truncated() {
        // Text alphabet: a full first record is 1 + 6 bits
        let alphabet = Alphabet::text();
        let err = parse(&bits("000000"), &alphabet).unwrap_err();
        assert!(matches!(err, Error::TruncatedStream { record: 1, remaining: 6, expected: 7 }));
    }

    #[test]
    fn test_tail_with_unknown_index_is_truncated() {
        // One full record (phrase 1), then a 1-bit tail naming phrase 0
        let err = parse(&bits("000"), &ab()).unwrap_err();
        assert!(matches!(err, Error::TruncatedStream { record: 2, remaining: 1, expected: 2 }));

        // A tail on an empty dictionary can never be valid
        let err = parse(&bits("1"), &ab()).unwrap_err();
        assert!(matches!(err, Error::TruncatedStream { record: 1, .. }));
    }

    #[test]
    fn test_tail_width_must_match() {
        let alphabet = Alphabet::text();
        // Record 1 "A" = 0|000000, then record 2 needs 1 + 6 bits; 3 bits is neither shape
        let err = parse(&bits("0000000101"), &alphabet).unwrap_err();
        assert!(matches!(err, Error::TruncatedStream { record: 2, remaining: 3, expected: 7 }));
    }
}
