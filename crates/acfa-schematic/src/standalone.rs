//! Standalone `.ac4a` schematic files.
//!
//! A standalone file is one raw schematic block. Files produced elsewhere may
//! carry trailing bytes; only the first [`BLOCK_SIZE`] bytes are used.

use std::fs;
use std::path::Path;

use crate::block::{SchematicBlock, BLOCK_SIZE};
use crate::{Error, Result};

/// Read a standalone schematic file's raw bytes.
pub fn load_standalone<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| Error::from_read(path, e))
}

/// Read a standalone schematic file as a block.
///
/// Fails with [`Error::InvalidLength`] if the file is shorter than one block.
pub fn load_standalone_block<P: AsRef<Path>>(path: P) -> Result<SchematicBlock> {
    let data = load_standalone(path)?;
    if data.len() > BLOCK_SIZE {
        log::warn!(
            "Standalone schematic has {} trailing bytes, ignoring them",
            data.len() - BLOCK_SIZE
        );
    }
    SchematicBlock::from_bytes(data.get(..BLOCK_SIZE).unwrap_or(&data[..]))
}

/// Write `block` to `path` as a standalone schematic.
pub fn export_standalone<P: AsRef<Path>>(block: &SchematicBlock, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, block.as_bytes())?;
    log::info!("Exported \"{}\" to {}", block.name(), path.display());
    Ok(())
}
