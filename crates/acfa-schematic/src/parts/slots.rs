//! Part table: the 15 equipped part IDs of a schematic.
//!
//! Each slot is a big-endian `u16` starting at local offset `0xD8`. The left
//! and right arm/back units share one catalog category.

use acfa_common::BinaryReader;
use byteorder::{BigEndian, ByteOrder};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::block::SchematicBlock;
use crate::catalog::PartCatalog;
use crate::{Error, Result};

/// Local offset of the part table.
pub const PARTS_OFFSET: usize = 0xD8;

/// Size of one part table entry.
pub const PART_ENTRY_SIZE: usize = 2;

/// Number of part slots.
pub const PART_SLOT_COUNT: usize = 15;

/// Returned in place of an ID or name that could not be read.
pub const INVALID_PART: &str = "<Invalid>";

/// Equipment slots in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum PartSlotKind {
    Head = 0,
    Core = 1,
    Arms = 2,
    Legs = 3,
    Fcs = 4,
    Generator = 5,
    MainBooster = 6,
    BackBooster = 7,
    SideBooster = 8,
    OveredBooster = 9,
    RightArmUnit = 10,
    LeftArmUnit = 11,
    RightBackUnit = 12,
    LeftBackUnit = 13,
    ShoulderUnit = 14,
}

impl PartSlotKind {
    /// Get all slots in table order.
    pub const fn all() -> [PartSlotKind; PART_SLOT_COUNT] {
        [
            PartSlotKind::Head,
            PartSlotKind::Core,
            PartSlotKind::Arms,
            PartSlotKind::Legs,
            PartSlotKind::Fcs,
            PartSlotKind::Generator,
            PartSlotKind::MainBooster,
            PartSlotKind::BackBooster,
            PartSlotKind::SideBooster,
            PartSlotKind::OveredBooster,
            PartSlotKind::RightArmUnit,
            PartSlotKind::LeftArmUnit,
            PartSlotKind::RightBackUnit,
            PartSlotKind::LeftBackUnit,
            PartSlotKind::ShoulderUnit,
        ]
    }

    /// Get the display label of this slot.
    pub const fn label(&self) -> &'static str {
        match self {
            PartSlotKind::Head => "Head",
            PartSlotKind::Core => "Core",
            PartSlotKind::Arms => "Arms",
            PartSlotKind::Legs => "Legs",
            PartSlotKind::Fcs => "FCS",
            PartSlotKind::Generator => "Generator",
            PartSlotKind::MainBooster => "Main Booster",
            PartSlotKind::BackBooster => "Back Booster",
            PartSlotKind::SideBooster => "Side Booster",
            PartSlotKind::OveredBooster => "Overed Booster",
            PartSlotKind::RightArmUnit => "Right Arm Unit",
            PartSlotKind::LeftArmUnit => "Left Arm Unit",
            PartSlotKind::RightBackUnit => "Right Back Unit",
            PartSlotKind::LeftBackUnit => "Left Back Unit",
            PartSlotKind::ShoulderUnit => "Shoulder Unit",
        }
    }

    /// Get the catalog category used to resolve this slot's part names.
    pub const fn lookup_key(&self) -> &'static str {
        match self {
            PartSlotKind::RightArmUnit | PartSlotKind::LeftArmUnit => "Arm Unit",
            PartSlotKind::RightBackUnit | PartSlotKind::LeftBackUnit => "Back Unit",
            other => other.label(),
        }
    }

    /// Get the slot's byte offset inside a schematic block.
    pub const fn offset(&self) -> usize {
        PARTS_OFFSET + (*self as usize) * PART_ENTRY_SIZE
    }
}

impl TryFrom<usize> for PartSlotKind {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        PartSlotKind::all()
            .get(index)
            .copied()
            .ok_or_else(|| Error::OutOfRange {
                what: "part slot index",
                value: index.to_string(),
                expected: "0..=14",
            })
    }
}

impl std::fmt::Display for PartSlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A decoded part slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartSlot {
    /// The slot this entry was read from.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub slot: PartSlotKind,
    /// Display label, e.g. "Right Arm Unit".
    pub category: &'static str,
    /// Four-digit decimal part ID, or [`INVALID_PART`].
    pub part_id: String,
    /// Catalog name, `"Unknown ID NNNN"`, or [`INVALID_PART`].
    pub part_name: String,
}

/// Decode all 15 part slots, resolving names through `catalog`.
pub fn decode_parts(block: &SchematicBlock, catalog: &PartCatalog) -> Vec<PartSlot> {
    PartSlotKind::all()
        .into_iter()
        .map(|slot| {
            let mut reader = BinaryReader::new_at(block.as_bytes(), slot.offset());
            let (part_id, part_name) = match reader.read_u16_be() {
                Ok(raw) => {
                    let part_id = format!("{raw:04}");
                    let part_name = catalog
                        .part_name(slot.lookup_key(), &part_id)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Unknown ID {part_id}"));
                    (part_id, part_name)
                }
                Err(_) => (INVALID_PART.to_string(), INVALID_PART.to_string()),
            };

            PartSlot {
                slot,
                category: slot.label(),
                part_id,
                part_name,
            }
        })
        .collect()
}

/// Read the raw part ID of one slot.
pub fn part_id(block: &SchematicBlock, slot: PartSlotKind) -> u16 {
    BigEndian::read_u16(block.region(slot.offset(), PART_ENTRY_SIZE))
}

fn part_id_bytes(part_id: u16) -> [u8; PART_ENTRY_SIZE] {
    let mut buf = [0u8; PART_ENTRY_SIZE];
    BigEndian::write_u16(&mut buf, part_id);
    buf
}

/// Copy `block` with slot `slot_index` set to `part_id`.
///
/// No check is made that the ID belongs to the slot's category.
pub fn encode_part(block: &SchematicBlock, slot_index: usize, part_id: u16) -> Result<SchematicBlock> {
    let slot = PartSlotKind::try_from(slot_index)?;
    Ok(block.with_region(slot.offset(), &part_id_bytes(part_id)))
}

/// Copy `block` with every slot set to a random part from its catalog category.
///
/// Debug parts (IDs starting with `9`) are never chosen. Slots whose category
/// has no eligible parts keep their current ID.
pub fn randomize_parts<R: Rng + ?Sized>(
    block: &SchematicBlock,
    catalog: &PartCatalog,
    rng: &mut R,
) -> SchematicBlock {
    let mut result = block.clone();

    for slot in PartSlotKind::all() {
        let candidates: Vec<(u16, &str)> = catalog
            .category(slot.lookup_key())
            .into_iter()
            .flatten()
            .filter(|(id, _)| !id.starts_with('9'))
            .filter_map(|(id, name)| id.parse::<u16>().ok().map(|raw| (raw, name.as_str())))
            .collect();

        let Some(&(raw, name)) = candidates.choose(rng) else {
            log::warn!("No valid parts found for category '{}'. Skipping.", slot.lookup_key());
            continue;
        };

        log::debug!("{}: {:04} ({})", slot.label(), raw, name);
        result = result.with_region(slot.offset(), &part_id_bytes(raw));
    }

    result
}
