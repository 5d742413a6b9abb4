use crate::error::{H262Error, Result};

/// A bit-level reader for fixed-layout MPEG-2 header fields.
///
/// Fields are read most significant bit first, as laid out in the
/// sequence header, picture header and their extensions.
///
/// Example:
/// ```
/// use h262io::utils::BitReader;
///
/// let data = [0x78, 0x04, 0x38];
/// let mut reader = BitReader::new(&data);
///
/// assert_eq!(reader.read_bits(12).unwrap(), 1920);
/// assert_eq!(reader.read_bits(12).unwrap(), 1080);
/// ```
pub struct BitReader<'a> {
    data: &'a [u8],
    byte_offset: usize,
    bit_offset: u8,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader from a byte slice
    pub fn new(data: &'a [u8]) -> Self {
        BitReader {
            data,
            byte_offset: 0,
            bit_offset: 0,
        }
    }

    /// Reads a single bit from the stream.
    /// Returns true for 1, false for 0.
    ///
    /// Returns error if end of data is reached.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.byte_offset >= self.data.len() {
            return Err(H262Error::Codec("Reached end of data".into()));
        }

        let bit = (self.data[self.byte_offset] >> (7 - self.bit_offset)) & 1;
        self.bit_offset += 1;

        if self.bit_offset == 8 {
            self.bit_offset = 0;
            self.byte_offset += 1;
        }

        Ok(bit == 1)
    }

    /// Reads n bits and returns them as a big-endian number.
    ///
    /// Returns error if n > 32 or fewer than n bits remain. Nothing is
    /// consumed when the read fails.
    pub fn read_bits(&mut self, n: u32) -> Result<u32> {
        if n > 32 {
            return Err(H262Error::Codec("Too many bits requested".into()));
        }
        if (n as usize) > self.available_bits() {
            return Err(H262Error::Codec("Reached end of data".into()));
        }

        let mut value = 0u32;
        for _ in 0..n {
            value = (value << 1) | self.read_bit()? as u32;
        }

        Ok(value)
    }

    /// Returns number of bits available to read.
    pub fn available_bits(&self) -> usize {
        (self.data.len() - self.byte_offset) * 8 - self.bit_offset as usize
    }
}
