use std::fmt;

/// An owned sequence of bits
///
/// Bits are packed MSB-first: bit 0 of the stream is the most significant bit
/// of the first byte. Unused low bits of the last byte are always zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitStream {
    bytes: Vec<u8>,
    /// Number of valid bits
    len: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap packed bytes holding `len` valid bits
    ///
    /// Bytes beyond `len` are dropped and padding bits are cleared.
    pub fn from_bytes(mut bytes: Vec<u8>, len: usize) -> Self {
        let len = len.min(bytes.len() * 8);
        bytes.truncate(len.div_ceil(8));
        if len % 8 != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xFF << (8 - len % 8);
            }
        }
        Self { bytes, len }
    }

    /// Build from a slice of bit values
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut bytes = vec![0u8; bits.len().div_ceil(8)];
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                bytes[i / 8] |= 0x80 >> (i % 8);
            }
        }
        Self { bytes, len: bits.len() }
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at `index`, `None` past the end
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Iterate over all bits in order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bytes[i / 8] & (0x80 >> (i % 8)) != 0)
    }

    /// Packed bytes (the last byte may be partially used)
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of zero padding bits in the last byte (0-7)
    pub fn padding_bits(&self) -> u8 {
        ((8 - self.len % 8) % 8) as u8
    }
}

/// Formats as ASCII `'0'`/`'1'` characters
impl fmt::Display for BitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
