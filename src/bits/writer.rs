use super::BitStream;

/// Bit-level writer for LZ78 record streams
///
/// Writes each field MSB-first, so a field's bits appear in the stream in the
/// same order as its binary representation reads.
pub struct BitWriter {
    /// Accumulated output bytes
    output: Vec<u8>,
    /// Current byte being built
    current_byte: u8,
    /// Bits written to current byte (0-7)
    bits_in_byte: u8,
    /// Total bits written
    len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a writer with room for `capacity` bytes of output
    pub fn with_capacity(capacity: usize) -> Self {
        Self { output: Vec::with_capacity(capacity), current_byte: 0, bits_in_byte: 0, len: 0 }
    }

    /// Write the low `n` bits (0-32) of `value`, most significant first
    pub fn write_bits(&mut self, value: u32, n: u8) {
        debug_assert!(n <= 32);
        debug_assert!(n == 32 || value >> n == 0, "value {} does not fit in {} bits", value, n);

        let mut remaining = n;

        while remaining > 0 {
            let space = 8 - self.bits_in_byte;
            let to_write = remaining.min(space);

            let mask = (1u32 << to_write) - 1;
            let chunk = ((value >> (remaining - to_write)) & mask) as u8;
            self.current_byte |= chunk << (space - to_write);

            self.bits_in_byte += to_write;
            remaining -= to_write;

            if self.bits_in_byte == 8 {
                self.output.push(self.current_byte);
                self.current_byte = 0;
                self.bits_in_byte = 0;
            }
        }

        self.len += n as usize;
    }

    /// Write a single bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.write_bits(bit as u32, 1);
    }

    /// Total bits written so far
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Finish and return the written bits
    pub fn finish(mut self) -> BitStream {
        if self.bits_in_byte > 0 {
            self.output.push(self.current_byte);
        }
        BitStream::from_bytes(self.output, self.len)
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3);
        writer.write_bits(0b11010, 5);
        let output = writer.finish();
        assert_eq!(output.as_bytes(), &[0b1011_1010]);
        assert_eq!(output.len(), 8);
    }

    #[test]
    fn test_write_cross_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1, 1);
        writer.write_bits(0xABC, 12);
        let output = writer.finish();
        assert_eq!(output.len(), 13);
        assert_eq!(output.to_string(), "1101010111100");
    }

    #[test]
    fn test_write_leading_zeros() {
        let mut writer = BitWriter::new();
        writer.write_bits(1, 6);
        writer.write_bits(0, 2);
        let output = writer.finish();
        assert_eq!(output.to_string(), "00000100");
    }

    #[test]
    fn test_write_bit() {
        let mut writer = BitWriter::new();
        for bit in [true, false, false, true, true] {
            writer.write_bit(bit);
        }
        assert_eq!(writer.len(), 5);
        assert_eq!(writer.finish().to_string(), "10011");
    }

    #[test]
    fn test_write_32_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xDEAD_BEEF, 32);
        let output = writer.finish();
        assert_eq!(output.as_bytes(), &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_zero_width_write() {
        let mut writer = BitWriter::new();
        writer.write_bits(0, 0);
        assert!(writer.is_empty());
        assert!(writer.finish().is_empty());
    }
}
