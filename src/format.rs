//! Byte serializations of a [`BitStream`].
//!
//! The stream itself has no header, so neither serialization adds one beyond
//! what is needed to recover the exact bit count.

use crate::bits::{BitStream, BitWriter};
use crate::error::{Error, Result};

/// On-disk representation of a compressed stream
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BitFormat {
    /// One ASCII `'0'` or `'1'` per bit
    #[default]
    Text,
    /// Bits packed MSB-first, then one byte holding the number of padding bits (0-7)
    Packed,
    /// Detect from content when reading; write as text
    Auto,
}

impl BitFormat {
    /// Guess the format of serialized data
    ///
    /// Text is only digits and whitespace. A packed stream always ends in its
    /// trailer byte (0-7), which is neither, so the guess cannot be wrong for
    /// output of [`BitFormat::serialize`].
    pub fn detect(data: &[u8]) -> Self {
        if data.iter().all(|&b| b == b'0' || b == b'1' || b.is_ascii_whitespace()) {
            Self::Text
        } else {
            Self::Packed
        }
    }

    /// Resolve Auto to a concrete format based on `data`
    pub fn resolve(self, data: &[u8]) -> Self {
        match self {
            Self::Auto => Self::detect(data),
            other => other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Packed => "packed",
            Self::Auto => "auto",
        }
    }

    /// Serialize `bits`
    pub fn serialize(self, bits: &BitStream) -> Vec<u8> {
        match self {
            Self::Text | Self::Auto => bits.iter().map(|bit| if bit { b'1' } else { b'0' }).collect(),
            Self::Packed => {
                let mut out = Vec::with_capacity(bits.as_bytes().len() + 1);
                out.extend_from_slice(bits.as_bytes());
                out.push(bits.padding_bits());
                out
            }
        }
    }

    /// Parse serialized data back into a bit stream
    pub fn deserialize(self, data: &[u8]) -> Result<BitStream> {
        match self.resolve(data) {
            Self::Packed => parse_packed(data),
            _ => parse_text(data),
        }
    }
}

/// Parse `'0'`/`'1'` text, ignoring trailing whitespace such as a final newline
fn parse_text(data: &[u8]) -> Result<BitStream> {
    let end = data.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(0, |i| i + 1);
    let mut writer = BitWriter::with_capacity(end.div_ceil(8));

    for (position, &byte) in data[..end].iter().enumerate() {
        match byte {
            b'0' => writer.write_bit(false),
            b'1' => writer.write_bit(true),
            _ => return Err(Error::InvalidBitCharacter { byte, position }),
        }
    }

    Ok(writer.finish())
}

fn parse_packed(data: &[u8]) -> Result<BitStream> {
    let (&padding, body) = data.split_last().ok_or(Error::UnexpectedEof)?;

    if padding > 7 || (padding > 0 && body.is_empty()) {
        return Err(Error::InvalidPackedTrailer(padding));
    }

    let len = body.len() * 8 - padding as usize;
    Ok(BitStream::from_bytes(body.to_vec(), len))
}
