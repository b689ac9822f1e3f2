//! DESDOC.DAT schematic container.
//!
//! # Layout
//!
//! | Offset  | Size          | Content                          |
//! |---------|---------------|----------------------------------|
//! | `0x05`  | 1             | Number of stored schematics      |
//! | `0x148` | 24280 × count | Schematic blocks, packed in order |
//!
//! Bytes outside those regions are carried through untouched.

use std::fs;
use std::path::{Path, PathBuf};

use crate::backup::create_backup;
use crate::block::{SchematicBlock, BLOCK_SIZE};
use crate::standalone::load_standalone;
use crate::{Error, Result};

/// Absolute offset of the first schematic block.
pub const SCHEMATIC_START_OFFSET: usize = 0x148;

/// Absolute offset of the schematic count byte.
pub const COUNT_OFFSET: usize = 5;

/// A DESDOC.DAT container held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Desdoc {
    data: Vec<u8>,
}

const fn block_offset(index: usize) -> usize {
    SCHEMATIC_START_OFFSET + index * BLOCK_SIZE
}

impl Desdoc {
    /// Wrap raw container bytes.
    ///
    /// Fails if the file is too short to hold the count byte.
    pub fn new(data: Vec<u8>) -> Result<Self> {
        if data.len() <= COUNT_OFFSET {
            return Err(Error::TruncatedFile {
                what: "DESDOC.DAT header",
                needed: COUNT_OFFSET + 1,
                actual: data.len(),
            });
        }
        Ok(Self { data })
    }

    /// Read a container from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| Error::from_read(path, e))?;
        log::debug!("Read {} bytes from {}", data.len(), path.display());
        Self::new(data)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Number of schematics the header declares.
    pub fn count(&self) -> u8 {
        self.data[COUNT_OFFSET]
    }

    /// Copy out every active schematic block, in slot order.
    pub fn active_blocks(&self) -> Result<Vec<SchematicBlock>> {
        let count = usize::from(self.count());
        let needed = block_offset(count);
        if needed > self.data.len() {
            return Err(Error::TruncatedFile {
                what: "DESDOC.DAT",
                needed,
                actual: self.data.len(),
            });
        }

        (0..count)
            .map(|i| SchematicBlock::from_bytes(&self.data[block_offset(i)..block_offset(i + 1)]))
            .collect()
    }

    /// Get one active block by slot index.
    pub fn block(&self, index: usize) -> Result<SchematicBlock> {
        let count = usize::from(self.count());
        if index >= count {
            return Err(Error::OutOfRange {
                what: "schematic index",
                value: index.to_string(),
                expected: "an index below the schematic count",
            });
        }

        let window = self
            .data
            .get(block_offset(index)..block_offset(index + 1))
            .ok_or(Error::TruncatedFile {
                what: "DESDOC.DAT",
                needed: block_offset(index + 1),
                actual: self.data.len(),
            })?;
        SchematicBlock::from_bytes(window)
    }

    /// Append a schematic after the last active block and bump the count.
    ///
    /// Only the first [`BLOCK_SIZE`] bytes of `schematic` are stored. Returns
    /// the slot index used. On error the container is left unchanged.
    pub fn insert(&mut self, schematic: &[u8]) -> Result<usize> {
        if schematic.len() < BLOCK_SIZE {
            return Err(Error::InvalidLength {
                what: "schematic",
                expected: BLOCK_SIZE,
                actual: schematic.len(),
            });
        }

        let count = self.count();
        if count == u8::MAX {
            return Err(Error::SlotCountOverflow(count));
        }

        let slot = usize::from(count);
        let offset = block_offset(slot);
        if offset + BLOCK_SIZE > self.data.len() {
            return Err(Error::ContainerFull {
                required: offset + BLOCK_SIZE,
                available: self.data.len(),
            });
        }

        if schematic.len() > BLOCK_SIZE {
            log::warn!(
                "Schematic has {} bytes, only the first {} are inserted",
                schematic.len(),
                BLOCK_SIZE
            );
        }

        self.data[offset..offset + BLOCK_SIZE].copy_from_slice(&schematic[..BLOCK_SIZE]);
        self.data[COUNT_OFFSET] = count + 1;

        Ok(slot)
    }

    /// Write the container to disk.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, &self.data)?;
        Ok(())
    }
}

/// Outcome of inserting a standalone schematic into a container on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertReport {
    /// Copy of the container taken before writing.
    pub backup_path: PathBuf,
    /// Slot the schematic was written to.
    pub slot: usize,
}

/// Insert the standalone schematic at `ac4a_path` into the container at
/// `desdoc_path`.
///
/// The insertion is checked in memory first. The container is then backed up
/// before it is overwritten; if the backup fails nothing is written.
pub fn insert_schematic_file<P, Q>(ac4a_path: P, desdoc_path: Q) -> Result<InsertReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let desdoc_path = desdoc_path.as_ref();
    let schematic = load_standalone(ac4a_path)?;
    let mut desdoc = Desdoc::open(desdoc_path)?;

    let slot = desdoc.insert(&schematic)?;
    let backup_path = create_backup(desdoc_path)?;
    desdoc.write(desdoc_path)?;

    log::info!(
        "Inserted schematic into {} slot {}",
        desdoc_path.display(),
        slot
    );

    Ok(InsertReport { backup_path, slot })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::tests::named_block;

    fn container(count: u8, capacity: usize) -> Vec<u8> {
        let mut data = vec![0u8; block_offset(capacity)];
        data[0] = 0x41;
        data[COUNT_OFFSET] = count;
        for i in 0..usize::from(count).min(capacity) {
            let name = format!("Unit {i}");
            let block = named_block(&name, "Fiona");
            data[block_offset(i)..block_offset(i + 1)].copy_from_slice(block.as_bytes());
        }
        data
    }

    #[test]
    fn test_active_blocks() {
        let desdoc = Desdoc::new(container(2, 3)).unwrap();

        let blocks = desdoc.active_blocks().unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name(), "Unit 0");
        assert_eq!(blocks[1].name(), "Unit 1");
        assert_eq!(desdoc.block(1).unwrap(), blocks[1]);
        assert!(desdoc.block(2).is_err());
    }

    #[test]
    fn test_active_blocks_truncated() {
        let mut data = container(2, 2);
        data[COUNT_OFFSET] = 3;
        let desdoc = Desdoc::new(data).unwrap();

        assert!(matches!(
            desdoc.active_blocks(),
            Err(Error::TruncatedFile { .. })
        ));
    }

    #[test]
    fn test_insert_after_last_block() {
        let original = container(2, 3);
        let mut desdoc = Desdoc::new(original.clone()).unwrap();
        let block = named_block("Ghost", "Fiona");

        assert_eq!(desdoc.insert(block.as_bytes()).unwrap(), 2);

        let data = desdoc.as_bytes();
        assert_eq!(data[COUNT_OFFSET], 3);
        assert_eq!(&data[block_offset(2)..block_offset(3)], block.as_bytes());
        assert_eq!(&data[..COUNT_OFFSET], &original[..COUNT_OFFSET]);
        assert_eq!(
            &data[COUNT_OFFSET + 1..block_offset(2)],
            &original[COUNT_OFFSET + 1..block_offset(2)]
        );
    }

    #[test]
    fn test_insert_ignores_trailing_bytes() {
        let mut desdoc = Desdoc::new(container(0, 1)).unwrap();
        let mut schematic = named_block("Ghost", "Fiona").into_bytes();
        schematic.extend_from_slice(&[0xEE; 8]);

        assert_eq!(desdoc.insert(&schematic).unwrap(), 0);
        assert_eq!(desdoc.as_bytes().len(), block_offset(1));
        assert_eq!(desdoc.active_blocks().unwrap()[0].name(), "Ghost");
    }

    #[test]
    fn test_insert_errors_leave_container_untouched() {
        let short = vec![0u8; BLOCK_SIZE - 1];
        let mut desdoc = Desdoc::new(container(1, 2)).unwrap();
        assert!(matches!(
            desdoc.insert(&short),
            Err(Error::InvalidLength { .. })
        ));

        let full = container(2, 2);
        let mut desdoc = Desdoc::new(full.clone()).unwrap();
        let err = desdoc.insert(&[0u8; BLOCK_SIZE]).unwrap_err();
        assert!(matches!(err, Error::ContainerFull { .. }));
        assert!(err.is_capacity());
        assert_eq!(desdoc.as_bytes(), &full[..]);
    }

    #[test]
    fn test_insert_at_count_limit() {
        let mut data = vec![0u8; SCHEMATIC_START_OFFSET];
        data[COUNT_OFFSET] = u8::MAX;
        let mut desdoc = Desdoc::new(data).unwrap();

        assert!(matches!(
            desdoc.insert(&[0u8; BLOCK_SIZE]),
            Err(Error::SlotCountOverflow(255))
        ));
        assert_eq!(desdoc.count(), 255);
    }

    #[test]
    fn test_rejects_headerless_file() {
        assert!(matches!(
            Desdoc::new(vec![0u8; 5]),
            Err(Error::TruncatedFile { .. })
        ));
    }
}
