//! ACFA - Armored Core: For Answer save file library.
//!
//! This crate provides a unified interface to the ACFA library crates for
//! working with the game's schematic and emblem saves.
//!
//! # Crates
//!
//! - [`acfa_common`] - Common utilities (binary reading, fixed UTF-16 names)
//! - [`acfa_schematic`] - `DESDOC.DAT`, `.ac4a` and `PAINT.DAT` codecs
//!
//! # Example
//!
//! ```no_run
//! use acfa::prelude::*;
//!
//! let desdoc = Desdoc::open("DESDOC.DAT")?;
//! for block in desdoc.active_blocks()? {
//!     println!("{} by {}", block.name(), block.designer());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use acfa_common as common;
pub use acfa_schematic as schematic;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use acfa_common::BinaryReader;
    pub use acfa_schematic::parts::{DecalData, DecalPart, Emblem, PartSlotKind, SchematicInfo};
    pub use acfa_schematic::{
        append_emblem_file, create_backup, export_standalone, insert_schematic_file,
        load_standalone, Desdoc, PaintDat, PartCatalog, SchematicBlock,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
