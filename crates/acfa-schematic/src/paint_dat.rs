//! PAINT.DAT emblem storage.
//!
//! The file holds 64 emblem slots of 132 bytes starting at `0x214`. Slots are
//! packed from the front; a slot whose first byte is zero is unused and ends
//! the list.

use std::fs;
use std::path::{Path, PathBuf};

use crate::backup::create_backup;
use crate::parts::emblem::{Emblem, EMBLEM_SIZE};
use crate::{Error, Result};

/// Offset of the first emblem slot.
pub const EMBLEM_START_OFFSET: usize = 0x214;

/// Number of emblem slots.
pub const EMBLEM_SLOT_COUNT: usize = 64;

/// A PAINT.DAT file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintDat {
    data: Vec<u8>,
}

const fn slot_offset(slot: usize) -> usize {
    EMBLEM_START_OFFSET + slot * EMBLEM_SIZE
}

impl PaintDat {
    /// Wrap raw file bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Read a PAINT.DAT file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| Error::from_read(path, e))?;
        Ok(Self::new(data))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Collect the raw bytes of every stored emblem, in slot order.
    ///
    /// Stops at the first unused slot. A slot cut off by the end of the file
    /// ends the scan with a warning.
    pub fn emblem_records(&self) -> Vec<&[u8]> {
        let mut records = Vec::new();

        for slot in 0..EMBLEM_SLOT_COUNT {
            let offset = slot_offset(slot);
            if offset >= self.data.len() || self.data[offset] == 0 {
                break;
            }

            match self.data.get(offset..offset + EMBLEM_SIZE) {
                Some(record) => records.push(record),
                None => {
                    log::warn!("Incomplete emblem data found at slot {slot}. Skipping.");
                    break;
                }
            }
        }

        records
    }

    /// Decode every stored emblem.
    pub fn emblems(&self) -> Result<Vec<Emblem>> {
        self.emblem_records().into_iter().map(Emblem::parse).collect()
    }

    /// Write `emblem` into the first unused slot and return its index.
    ///
    /// The buffer is only modified on success.
    pub fn append(&mut self, emblem: &[u8]) -> Result<usize> {
        if emblem.len() != EMBLEM_SIZE {
            return Err(Error::InvalidLength {
                what: "emblem",
                expected: EMBLEM_SIZE,
                actual: emblem.len(),
            });
        }

        for slot in 0..EMBLEM_SLOT_COUNT {
            let offset = slot_offset(slot);
            if offset + EMBLEM_SIZE > self.data.len() {
                return Err(Error::PaintTooShort {
                    slot,
                    needed: offset + EMBLEM_SIZE,
                    actual: self.data.len(),
                });
            }

            if self.data[offset] == 0 {
                self.data[offset..offset + EMBLEM_SIZE].copy_from_slice(emblem);
                return Ok(slot);
            }
        }

        Err(Error::NoFreeEmblemSlot)
    }

    /// Write the file to disk.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, &self.data)?;
        Ok(())
    }
}

/// Outcome of adding an emblem to a PAINT.DAT file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendReport {
    /// Slot the emblem was written to.
    pub slot: usize,
    /// Copy of the file taken before writing.
    pub backup_path: PathBuf,
}

/// Add an emblem to the PAINT.DAT at `path`, backing the file up first.
///
/// The emblem is validated against the loaded file before the backup is
/// taken, so a rejected emblem leaves no stray backup behind.
pub fn append_emblem_file<P: AsRef<Path>>(path: P, emblem: &[u8]) -> Result<AppendReport> {
    let path = path.as_ref();
    let mut paint = PaintDat::open(path)?;
    let slot = paint.append(emblem)?;

    let backup_path = create_backup(path)?;
    paint.write(path)?;

    log::info!("Added emblem to {} slot {}", path.display(), slot);

    Ok(AppendReport { slot, backup_path })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint_with(occupied: usize) -> Vec<u8> {
        let mut data = vec![0u8; slot_offset(EMBLEM_SLOT_COUNT)];
        for slot in 0..occupied {
            let offset = slot_offset(slot);
            data[offset] = 2;
            data[offset + 1..offset + EMBLEM_SIZE].fill(slot as u8 + 1);
        }
        data
    }

    #[test]
    fn test_emblems_stop_at_first_empty_slot() {
        let mut data = paint_with(3);
        // A stray record after the gap must not be reported.
        data[slot_offset(5)] = 2;
        let paint = PaintDat::new(data);

        let records = paint.emblem_records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2][1], 3);
        assert_eq!(paint.emblems().unwrap().len(), 3);
    }

    #[test]
    fn test_emblems_stop_at_truncated_slot() {
        let mut data = paint_with(2);
        data.truncate(slot_offset(1) + 10);
        let paint = PaintDat::new(data);

        assert_eq!(paint.emblem_records().len(), 1);
    }

    #[test]
    fn test_append_uses_first_free_slot() {
        let original = paint_with(3);
        let mut paint = PaintDat::new(original.clone());
        let emblem = [7u8; EMBLEM_SIZE];

        assert_eq!(paint.append(&emblem).unwrap(), 3);

        let data = paint.as_bytes();
        assert_eq!(&data[slot_offset(3)..slot_offset(4)], &emblem[..]);
        assert_eq!(&data[..slot_offset(3)], &original[..slot_offset(3)]);
        assert_eq!(&data[slot_offset(4)..], &original[slot_offset(4)..]);
    }

    #[test]
    fn test_append_errors_leave_buffer_untouched() {
        let full = paint_with(EMBLEM_SLOT_COUNT);
        let mut paint = PaintDat::new(full.clone());
        assert!(matches!(
            paint.append(&[1u8; EMBLEM_SIZE]),
            Err(Error::NoFreeEmblemSlot)
        ));
        assert_eq!(paint.as_bytes(), &full[..]);

        let mut short = PaintDat::new(paint_with(3)[..slot_offset(3) + 5].to_vec());
        let err = short.append(&[1u8; EMBLEM_SIZE]).unwrap_err();
        assert!(err.is_capacity());

        assert!(matches!(
            PaintDat::new(paint_with(0)).append(&[1u8; 100]),
            Err(Error::InvalidLength { actual: 100, .. })
        ));
    }
}
