//! Binary reader for bounds-checked parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads
//! fixed-width fields from a byte slice without copying. Schematic bodies mix
//! byte orders (part and tuning tables are big-endian, decal floats are
//! little-endian), so both flavours are exposed and named explicitly.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::{Error, Result};

/// A binary reader that provides zero-copy reading from a byte slice.
///
/// # Example
///
/// ```
/// use acfa_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u16_be().unwrap(), 0x0102);
/// assert_eq!(reader.read_u16().unwrap(), 0x0403);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Create a new reader starting at a specific position.
    #[inline]
    pub const fn new_at(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        self.data
            .get(self.position..self.position.saturating_add(count))
            .ok_or(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            })
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a fixed-size array of bytes.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_bytes(2).map(LittleEndian::read_u16)
    }

    /// Read a big-endian u16.
    #[inline]
    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.read_bytes(2).map(BigEndian::read_u16)
    }

    /// Read a big-endian u64.
    #[inline]
    pub fn read_u64_be(&mut self) -> Result<u64> {
        self.read_bytes(8).map(BigEndian::read_u64)
    }

    /// Read a little-endian f32.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_bytes(4).map(LittleEndian::read_f32)
    }
}

/// Read the big-endian 64-bit timestamp stored at `offset`.
///
/// The epoch is not known; the value is surfaced as-is.
pub fn read_timestamp_be64(data: &[u8], offset: usize) -> Result<u64> {
    BinaryReader::new_at(data, offset).read_u64_be()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_mixed_endianness() {
        let data = [
            0x12u8, 0x34, // u16 BE: 0x1234
            0x12, 0x34, // u16 LE: 0x3412
            0x00, 0x00, 0x80, 0x3F, // f32 LE: 1.0
        ];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u16_be().unwrap(), 0x1234);
        assert_eq!(reader.read_u16().unwrap(), 0x3412);
        assert_eq!(reader.read_f32().unwrap(), 1.0);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_timestamp_is_big_endian() {
        let mut data = vec![0xAAu8; 4];
        data.extend_from_slice(&[0, 0, 0, 0, 0x65, 0x4F, 0xA1, 0x00]);

        assert_eq!(read_timestamp_be64(&data, 4).unwrap(), 0x654F_A100);
    }

    #[test]
    fn test_peek_does_not_advance() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.peek_bytes(2).unwrap(), &[0x01, 0x02]);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_array::<3>().unwrap(), [0x01, 0x02, 0x03]);
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        assert!(matches!(
            reader.read_u64_be(),
            Err(Error::UnexpectedEof {
                needed: 8,
                available: 2
            })
        ));
        assert!(read_timestamp_be64(&data, 10).is_err());
    }
}
