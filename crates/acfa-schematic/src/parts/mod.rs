//! Schematic block parts.
//!
//! This module contains the codecs for the regions inside a single
//! [`SchematicBlock`](crate::SchematicBlock).
//!
//! # Structure Overview
//!
//! | Local offset | Size | Region |
//! |--------------|------|--------|
//! | 0x001 | 0x60 | name (UTF-16LE) |
//! | 0x061 | 0x60 | designer (UTF-16LE) |
//! | 0x0C0 | 0x08 | timestamp (u64 BE) |
//! | 0x0C8 | 0x01 | protect bit + category |
//! | 0x0D8 | 0x1E | [`slots`]: 15 part IDs (u16 BE) |
//! | 0x126 | 0x1C | [`tuning`]: 28 tuning bytes |
//! | 0x148 | 0x330 | [`paint`]: colors |
//! | 0x478 | 0x24 | [`paint`]: patterns |
//! | 0x49C | 0x04 | [`paint`]: eye color |
//! | 0x4A0 | 0x19A0 | [`decal`]: 5 sections × 8 layers |
//!
//! Emblem records ([`emblem`]) are embedded in every decal layer and are also
//! the unit stored in `PAINT.DAT`.

pub mod decal;
pub mod emblem;
mod info;
pub mod paint;
pub mod slots;
pub mod tuning;

pub use decal::{
    extract_decals, generate_full_random_decal_data, generate_random_decal_layer,
    generate_random_decal_section, randomize_decal_bytes, replace_decal_bytes, replace_decals,
    DecalData, DecalLayer, DecalPart, DecalProfile, DecalSection,
};
pub use emblem::{is_valid_image_id, Emblem, EmblemLayer, EMBLEM_SIZE, IMAGE_ID_RANGES};
pub use info::SchematicInfo;
pub use paint::{extract_paint, randomize_colors, replace_paint, PaintBlocks};
pub use slots::{decode_parts, encode_part, randomize_parts, PartSlot, PartSlotKind};
pub use tuning::{decode_tuning, encode_tuning, TUNING_LABELS};
