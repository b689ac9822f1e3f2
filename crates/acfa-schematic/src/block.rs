//! Schematic block handling.

use std::fmt;

use acfa_common::utf16::{
    is_name_char, read_fixed_utf16_name, write_fixed_utf16_name, NAME_FIELD_SIZE,
};
use acfa_common::read_timestamp_be64;

use crate::{Error, Result};

/// The fixed size of one schematic in bytes.
pub const BLOCK_SIZE: usize = 24280;

/// Local offset of the schematic name (UTF-16LE, 96 bytes).
pub const NAME_OFFSET: usize = 1;

/// Local offset of the designer name (UTF-16LE, 96 bytes).
pub const DESIGNER_OFFSET: usize = NAME_OFFSET + NAME_FIELD_SIZE;

/// Local offset of the big-endian save timestamp.
pub const TIMESTAMP_OFFSET: usize = 0xC0;

/// Local offset of the protect/category status byte.
pub const STATUS_OFFSET: usize = 0xC8;

const PROTECT_BIT: u8 = 0b1000_0000;
const CATEGORY_MASK: u8 = 0b0111_1111;

/// One saved schematic: exactly [`BLOCK_SIZE`] bytes.
///
/// Editing methods never mutate in place; they return a modified copy so the
/// original block stays available for comparison or undo.
#[derive(Clone, PartialEq, Eq)]
pub struct SchematicBlock {
    data: Vec<u8>,
}

impl SchematicBlock {
    /// Create a block from an owned buffer, checking its length.
    pub fn from_vec(data: Vec<u8>) -> Result<Self> {
        if data.len() != BLOCK_SIZE {
            return Err(Error::InvalidLength {
                what: "schematic block",
                expected: BLOCK_SIZE,
                actual: data.len(),
            });
        }
        Ok(Self { data })
    }

    /// Create a block by copying a slice, checking its length.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_vec(data.to_vec())
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the block and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Borrow a sub-region of the block.
    pub(crate) fn region(&self, offset: usize, len: usize) -> &[u8] {
        &self.data[offset..offset + len]
    }

    /// Copy the block with `bytes` written at `offset`.
    ///
    /// Callers guarantee the window lies inside the block.
    pub(crate) fn with_region(&self, offset: usize, bytes: &[u8]) -> Self {
        let mut data = self.data.clone();
        data[offset..offset + bytes.len()].copy_from_slice(bytes);
        Self { data }
    }

    /// Get the schematic name, or the invalid-name sentinel.
    pub fn name(&self) -> String {
        read_fixed_utf16_name(&self.data, NAME_OFFSET, NAME_FIELD_SIZE)
    }

    /// Get the designer name, or the invalid-name sentinel.
    pub fn designer(&self) -> String {
        read_fixed_utf16_name(&self.data, DESIGNER_OFFSET, NAME_FIELD_SIZE)
    }

    /// Get the raw save timestamp.
    pub fn timestamp(&self) -> u64 {
        read_timestamp_be64(&self.data, TIMESTAMP_OFFSET).unwrap_or_default()
    }

    /// Get the user category (1-128).
    pub fn category(&self) -> u8 {
        (self.data[STATUS_OFFSET] & CATEGORY_MASK) + 1
    }

    /// Check whether the schematic is write-protected in game.
    pub fn is_protected(&self) -> bool {
        self.data[STATUS_OFFSET] & PROTECT_BIT != 0
    }

    /// Copy the block with a new schematic name.
    ///
    /// Names longer than 47 UTF-16 code units are truncated. The name is
    /// stored as given, but [`name`](Self::name) only reads back letters,
    /// digits and spaces up to the first other character, so `"Mk-II"`
    /// reads back as `"Mk"`.
    pub fn renamed(&self, name: &str) -> Self {
        let (field, truncated) = write_fixed_utf16_name(name, NAME_FIELD_SIZE);
        if truncated {
            log::warn!("Schematic name truncated to 47 characters: {name}");
        }
        if !name.chars().all(is_name_char) {
            log::warn!("Schematic name {name:?} has characters that will not read back");
        }
        self.with_region(NAME_OFFSET, &field)
    }

    /// Suggested file name for a standalone export: `{name}_{designer}.ac4a`.
    pub fn export_file_name(&self) -> String {
        format!("{}_{}.ac4a", self.name(), self.designer())
    }
}

impl fmt::Debug for SchematicBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchematicBlock")
            .field("name", &self.name())
            .field("designer", &self.designer())
            .field("category", &self.category())
            .finish_non_exhaustive()
    }
}

impl AsRef<[u8]> for SchematicBlock {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl TryFrom<Vec<u8>> for SchematicBlock {
    type Error = Error;

    fn try_from(data: Vec<u8>) -> Result<Self> {
        Self::from_vec(data)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a zeroed block with the given name and designer.
    pub(crate) fn named_block(name: &str, designer: &str) -> SchematicBlock {
        let mut data = vec![0u8; BLOCK_SIZE];
        let (name_field, _) = write_fixed_utf16_name(name, NAME_FIELD_SIZE);
        data[NAME_OFFSET..NAME_OFFSET + NAME_FIELD_SIZE].copy_from_slice(&name_field);
        // The designer field overlaps the first timestamp byte, so write only
        // the encoded characters.
        let designer_units: Vec<u8> = designer.encode_utf16().flat_map(u16::to_le_bytes).collect();
        data[DESIGNER_OFFSET..DESIGNER_OFFSET + designer_units.len()]
            .copy_from_slice(&designer_units);
        SchematicBlock::from_vec(data).unwrap()
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = SchematicBlock::from_vec(vec![0u8; BLOCK_SIZE - 1]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidLength {
                expected: BLOCK_SIZE,
                actual: 24279,
                ..
            }
        ));
    }

    #[test]
    fn test_header_fields() {
        let block = named_block("Ghost", "Fiona");
        let mut data = block.into_bytes();
        data[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + 8].copy_from_slice(&0x0102_0304_0506_0708u64.to_be_bytes());
        data[STATUS_OFFSET] = 0b1000_0100;
        let block = SchematicBlock::from_vec(data).unwrap();

        assert_eq!(block.name(), "Ghost");
        assert_eq!(block.designer(), "Fiona");
        assert_eq!(block.timestamp(), 0x0102_0304_0506_0708);
        assert_eq!(block.category(), 5);
        assert!(block.is_protected());
        assert_eq!(block.export_file_name(), "Ghost_Fiona.ac4a");
    }

    #[test]
    fn test_category_upper_bound() {
        let mut data = vec![0u8; BLOCK_SIZE];
        data[STATUS_OFFSET] = 0x7F;
        let block = SchematicBlock::from_vec(data).unwrap();

        assert_eq!(block.category(), 128);
        assert!(!block.is_protected());
    }

    #[test]
    fn test_renamed_leaves_rest_untouched() {
        let block = named_block("Ghost", "Fiona");
        let renamed = block.renamed("Randomized AC");

        assert_eq!(renamed.name(), "Randomized AC");
        assert_eq!(renamed.designer(), "Fiona");
        assert_eq!(block.name(), "Ghost");
        assert_eq!(
            &renamed.as_bytes()[DESIGNER_OFFSET..],
            &block.as_bytes()[DESIGNER_OFFSET..]
        );
    }

    #[test]
    fn test_renamed_stops_at_unreadable_character() {
        let renamed = named_block("Ghost", "Fiona").renamed("Mk-II");

        assert_eq!(renamed.name(), "Mk");
        assert_eq!(&renamed.as_bytes()[NAME_OFFSET + 4..NAME_OFFSET + 6], &[b'-', 0]);
    }
}
