use super::BitStream;
use crate::error::{Error, Result};

/// Bit-level reader over a [`BitStream`]
///
/// Reads fields MSB-first, mirroring [`super::BitWriter`].
pub struct BitReader<'a> {
    stream: &'a BitStream,
    /// Index of the next bit to read
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(stream: &'a BitStream) -> Self {
        Self { stream, position: 0 }
    }

    /// Read `n` bits (0-32) as an unsigned value, most significant first
    pub fn read_bits(&mut self, n: u8) -> Result<u32> {
        debug_assert!(n <= 32, "Cannot read more than 32 bits at once");

        if (n as usize) > self.remaining() {
            return Err(Error::UnexpectedEof);
        }

        let mut value = 0u32;
        for index in self.position..self.position + n as usize {
            value = (value << 1) | self.stream.get(index).unwrap_or(false) as u32;
        }
        self.position += n as usize;

        Ok(value)
    }

    /// Bits not yet read
    pub fn remaining(&self) -> usize {
        self.stream.len() - self.position
    }

    /// Offset of the next bit to read
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether every bit has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}
