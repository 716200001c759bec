use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Alphabet errors
    #[error("Symbol 0x{symbol:02x} at position {position} is not in the alphabet")]
    UnknownSymbol { symbol: u8, position: usize },

    #[error("Code {code} at bit offset {bit_offset} has no symbol mapping")]
    InvalidCode { code: u32, bit_offset: usize },

    #[error("Alphabet maps symbol 0x{symbol:02x} or code {code} more than once")]
    AlphabetConflict { symbol: u8, code: u8 },

    #[error("Alphabet has no symbols")]
    EmptyAlphabet,

    // Dictionary errors
    #[error("Record {record} references phrase index {index}, which is not in the dictionary")]
    CorruptDictionary { index: u32, record: usize },

    #[error(
        "Truncated stream at record {record}: {remaining} bits remain, a full record needs {expected}"
    )]
    TruncatedStream { record: usize, remaining: usize, expected: usize },

    // Serialization errors
    #[error("Invalid bit character 0x{byte:02x} at byte {position} (expected '0' or '1')")]
    InvalidBitCharacter { byte: u8, position: usize },

    #[error("Invalid packed trailer: {0} padding bits")]
    InvalidPackedTrailer(u8),

    // Verification errors
    #[error("Round trip mismatch at symbol {position}")]
    RoundTripMismatch { position: usize },

    // Internal errors
    #[error("Unexpected end of bit stream")]
    UnexpectedEof,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
