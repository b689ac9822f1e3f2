//! Emblem records.
//!
//! An emblem is a 132-byte (`0x84`) layered glyph. The same record is stored
//! standalone in `PAINT.DAT` and embedded in every decal layer.
//!
//! # Layout
//!
//! - 1 byte: type (2 = custom emblem)
//! - 3 bytes: unknown, always zero
//! - 16 layers × 8 bytes:
//!   - angle (0-180)
//!   - image ID (see [`IMAGE_ID_RANGES`])
//!   - color (0-7)
//!   - width, height (1-127)
//!   - x, y (0-255)
//!   - flags: bit 4 negative angle, bit 6 negative x, bit 7 negative y

use std::ops::RangeInclusive;

use acfa_common::BinaryReader;
use rand::Rng;

use crate::{Error, Result};

/// Size of an emblem record in bytes.
pub const EMBLEM_SIZE: usize = 0x84;

/// Number of layers in an emblem.
pub const EMBLEM_LAYER_COUNT: usize = 16;

/// Size of one emblem layer in bytes.
pub const EMBLEM_LAYER_SIZE: usize = 8;

/// Type byte of a user-made emblem.
pub const CUSTOM_EMBLEM_TYPE: u8 = 2;

/// Image IDs the game accepts. Each group is followed by a gap of unused IDs.
pub const IMAGE_ID_RANGES: [RangeInclusive<u8>; 8] = [
    0..=20,
    29..=60,
    69..=88,
    97..=112,
    121..=144,
    149..=164,
    173..=188,
    205..=252,
];

/// Flag bit: the angle is negative.
pub const FLAG_NEGATIVE_ANGLE: u8 = 1 << 4;
/// Flag bit: the x position is negative.
pub const FLAG_NEGATIVE_X: u8 = 1 << 6;
/// Flag bit: the y position is negative.
pub const FLAG_NEGATIVE_Y: u8 = 1 << 7;

const MAX_ANGLE: u8 = 180;
const MAX_COLOR: u8 = 7;
const MAX_SIZE: u8 = 127;

/// Check whether `id` lies in one of the valid image ID ranges.
pub fn is_valid_image_id(id: u8) -> bool {
    IMAGE_ID_RANGES.iter().any(|r| r.contains(&id))
}

/// Pick an image ID uniformly from the union of the valid ranges.
fn random_image_id<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    let total: usize = IMAGE_ID_RANGES.iter().map(|r| r.len()).sum();
    let pick = rng.gen_range(0..total);

    IMAGE_ID_RANGES
        .iter()
        .cloned()
        .flatten()
        .nth(pick)
        .unwrap_or(0)
}

/// A single emblem layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmblemLayer {
    pub angle: u8,
    pub image_id: u8,
    pub color: u8,
    pub width: u8,
    pub height: u8,
    pub x: u8,
    pub y: u8,
    pub flags: u8,
}

impl EmblemLayer {
    /// Read a layer from binary data.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let [angle, image_id, color, width, height, x, y, flags] =
            reader.read_array::<EMBLEM_LAYER_SIZE>()?;

        Ok(Self {
            angle,
            image_id,
            color,
            width,
            height,
            x,
            y,
            flags,
        })
    }

    /// Write the layer to bytes.
    pub fn to_bytes(&self) -> [u8; EMBLEM_LAYER_SIZE] {
        [
            self.angle,
            self.image_id,
            self.color,
            self.width,
            self.height,
            self.x,
            self.y,
            self.flags,
        ]
    }

    /// Generate a layer with every field drawn uniformly from its valid range.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut flags = 0;
        for bit in [FLAG_NEGATIVE_ANGLE, FLAG_NEGATIVE_X, FLAG_NEGATIVE_Y] {
            if rng.gen_bool(0.5) {
                flags |= bit;
            }
        }

        Self {
            angle: rng.gen_range(0..=MAX_ANGLE),
            image_id: random_image_id(rng),
            color: rng.gen_range(0..=MAX_COLOR),
            width: rng.gen_range(1..=MAX_SIZE),
            height: rng.gen_range(1..=MAX_SIZE),
            x: rng.gen_range(0..=u8::MAX),
            y: rng.gen_range(0..=u8::MAX),
            flags,
        }
    }

    /// Check if every byte of the layer is zero.
    pub fn is_empty(&self) -> bool {
        self.to_bytes() == [0u8; EMBLEM_LAYER_SIZE]
    }

    pub fn negative_angle(&self) -> bool {
        self.flags & FLAG_NEGATIVE_ANGLE != 0
    }

    pub fn negative_x(&self) -> bool {
        self.flags & FLAG_NEGATIVE_X != 0
    }

    pub fn negative_y(&self) -> bool {
        self.flags & FLAG_NEGATIVE_Y != 0
    }

    /// Angle with the sign flag applied.
    pub fn signed_angle(&self) -> i16 {
        apply_sign(self.angle, self.negative_angle())
    }

    /// X position with the sign flag applied.
    pub fn signed_x(&self) -> i16 {
        apply_sign(self.x, self.negative_x())
    }

    /// Y position with the sign flag applied.
    pub fn signed_y(&self) -> i16 {
        apply_sign(self.y, self.negative_y())
    }
}

fn apply_sign(value: u8, negative: bool) -> i16 {
    if negative {
        -(value as i16)
    } else {
        value as i16
    }
}

/// A decoded 132-byte emblem.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Emblem {
    /// Emblem type; user emblems are [`CUSTOM_EMBLEM_TYPE`].
    pub kind: u8,
    /// Three bytes of unknown purpose, kept for round-tripping.
    pub header: [u8; 3],
    /// All 16 layers, including empty ones.
    pub layers: [EmblemLayer; EMBLEM_LAYER_COUNT],
}

impl Emblem {
    /// Parse an emblem record. `data` must be exactly 132 bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() != EMBLEM_SIZE {
            return Err(Error::InvalidLength {
                what: "emblem",
                expected: EMBLEM_SIZE,
                actual: data.len(),
            });
        }

        let mut reader = BinaryReader::new(data);
        let kind = reader.read_u8()?;
        let header = reader.read_array::<3>()?;

        let mut layers = [EmblemLayer::default(); EMBLEM_LAYER_COUNT];
        for layer in &mut layers {
            *layer = EmblemLayer::read(&mut reader)?;
        }

        Ok(Self {
            kind,
            header,
            layers,
        })
    }

    /// Generate a random custom emblem.
    ///
    /// `num_layers` must be in `1..=16`; `None` picks a count uniformly.
    /// Layers past the count are left zeroed.
    pub fn generate_random<R: Rng + ?Sized>(num_layers: Option<usize>, rng: &mut R) -> Result<Self> {
        let count = match num_layers {
            None => rng.gen_range(1..=EMBLEM_LAYER_COUNT),
            Some(n) if (1..=EMBLEM_LAYER_COUNT).contains(&n) => n,
            Some(n) => {
                return Err(Error::OutOfRange {
                    what: "emblem layer count",
                    value: n.to_string(),
                    expected: "1..=16",
                })
            }
        };

        let mut layers = [EmblemLayer::default(); EMBLEM_LAYER_COUNT];
        for layer in &mut layers[..count] {
            *layer = EmblemLayer::random(rng);
        }

        Ok(Self {
            kind: CUSTOM_EMBLEM_TYPE,
            header: [0; 3],
            layers,
        })
    }

    /// Convert to bytes for writing.
    pub fn to_bytes(&self) -> [u8; EMBLEM_SIZE] {
        let mut bytes = [0u8; EMBLEM_SIZE];
        bytes[0] = self.kind;
        bytes[1..4].copy_from_slice(&self.header);
        for (chunk, layer) in bytes[4..]
            .chunks_exact_mut(EMBLEM_LAYER_SIZE)
            .zip(&self.layers)
        {
            chunk.copy_from_slice(&layer.to_bytes());
        }
        bytes
    }

    /// The unknown header bytes as lowercase hex, for diagnostics.
    pub fn header_hex(&self) -> String {
        self.header.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Number of non-empty layers.
    pub fn active_layer_count(&self) -> usize {
        self.layers.iter().filter(|l| !l.is_empty()).count()
    }
}
