//! Schematic and emblem codec for Armored Core: For Answer save files.
//!
//! The game keeps player-built AC designs ("schematics") in `DESDOC.DAT` and
//! player-drawn emblems in `PAINT.DAT`. Single schematics can also be shared
//! as standalone `.ac4a` files. This crate can read, edit, randomize and write
//! all three.
//!
//! # File Format
//!
//! `DESDOC.DAT`:
//! - byte 5: number of stored schematics
//! - `0x148`: schematic blocks, 24280 bytes each, packed in order
//!
//! `PAINT.DAT`:
//! - `0x214`: 64 emblem slots of 132 bytes, unused slots start with `0x00`
//!
//! See [`parts`] for the layout of a single schematic block.
//!
//! # Example
//!
//! ```no_run
//! use acfa_schematic::{Desdoc, PartCatalog, SchematicInfo};
//!
//! let catalog = PartCatalog::from_file("AC4A_parts.txt")?;
//! let desdoc = Desdoc::open("DESDOC.DAT")?;
//!
//! for block in desdoc.active_blocks()? {
//!     let info = SchematicInfo::decode(&block, &catalog);
//!     println!("{}", info.title());
//!     for part in &info.parts {
//!         println!("  {}: {} {}", part.slot, part.part_id, part.part_name);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod backup;
mod block;
pub mod catalog;
mod container;
mod error;
mod paint_dat;
pub mod parts;
mod standalone;

pub use backup::{backup_path, create_backup};
pub use block::{SchematicBlock, BLOCK_SIZE};
pub use catalog::PartCatalog;
pub use container::{insert_schematic_file, Desdoc, InsertReport, COUNT_OFFSET, SCHEMATIC_START_OFFSET};
pub use error::{Error, Result};
pub use paint_dat::{append_emblem_file, AppendReport, PaintDat, EMBLEM_SLOT_COUNT, EMBLEM_START_OFFSET};
pub use standalone::{export_standalone, load_standalone, load_standalone_block};

// Re-export commonly used types at crate root
pub use parts::{DecalData, DecalPart, Emblem, EmblemLayer, PaintBlocks, PartSlot, PartSlotKind, SchematicInfo};
