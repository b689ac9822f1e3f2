//! Decal data: emblems placed on the five body sections of a schematic.
//!
//! The decal region (`0x19A0` bytes at local offset `0x4A0`) holds five
//! sections in fixed order (head, core, right arm, left arm, legs), each with
//! eight layers. A layer embeds a full [`Emblem`] followed by its placement:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0x00 | 132 | emblem record |
//! | 0x84 | 1 | width |
//! | 0x85 | 1 | height |
//! | 0x86 | 2 | reserved (zero) |
//! | 0x88 | 12 | rotation x, y, z (f32 LE) |
//! | 0x94 | 12 | position x, y, z (f32 LE) |
//! | 0xA0 | 4 | scale (f32 LE) |
//!
//! Unlike the part and tuning tables, every float here is little-endian.
//!
//! # Scale and position
//!
//! A *smaller* scale value draws a *larger* decal. The visible bounds of each
//! section are known at a reference scale; at any other scale `S` they become
//! `bound * default_scale / S`.

use std::f32::consts::PI;

use rand::Rng;
use zerocopy::byteorder::little_endian::F32;
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned};

use super::emblem::{Emblem, EMBLEM_SIZE};
use crate::block::SchematicBlock;
use crate::{Error, Result};

/// Local offset of the decal region.
pub const DECAL_DATA_OFFSET: usize = 0x4A0;

/// Size of the decal region.
pub const DECAL_DATA_SIZE: usize = 0x19A0;

/// Size of one section.
pub const DECAL_SECTION_SIZE: usize = 0x520;

/// Size of one layer.
pub const DECAL_LAYER_SIZE: usize = 0xA4;

/// Layers per section.
pub const LAYERS_PER_SECTION: usize = 8;

/// Number of sections.
pub const SECTION_COUNT: usize = 5;

const MIN_DECAL_SIZE: u8 = 3;

/// Body section a decal is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DecalPart {
    Head = 0,
    Core = 1,
    ArmRight = 2,
    ArmLeft = 3,
    Legs = 4,
}

/// Placement limits of one body section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecalProfile {
    /// Scale at which the decal is drawn largest (the smaller number).
    pub largest_scale: f32,
    /// Scale at which the decal is drawn smallest.
    pub smallest_scale: f32,
    /// Reference scale for the position bounds.
    pub default_scale: f32,
    /// Horizontal bounds at the reference scale.
    pub x_bounds: (f32, f32),
    /// Vertical bounds at the reference scale.
    pub y_bounds: (f32, f32),
    /// Depth; constant for the section.
    pub z: f32,
}

const HEAD_PROFILE: DecalProfile = DecalProfile {
    largest_scale: 2.0,
    smallest_scale: 8.0,
    default_scale: 4.0,
    x_bounds: (-0.12, 0.12),
    y_bounds: (-0.10, 0.10),
    z: 0.25,
};

const CORE_PROFILE: DecalProfile = DecalProfile {
    largest_scale: 1.0,
    smallest_scale: 6.0,
    default_scale: 2.5,
    x_bounds: (-0.45, 0.45),
    y_bounds: (-0.40, 0.40),
    z: 0.55,
};

const ARM_RIGHT_PROFILE: DecalProfile = DecalProfile {
    largest_scale: 1.5,
    smallest_scale: 7.0,
    default_scale: 3.0,
    x_bounds: (-0.20, 0.20),
    y_bounds: (-0.50, 0.30),
    z: -0.30,
};

const ARM_LEFT_PROFILE: DecalProfile = DecalProfile {
    largest_scale: 1.5,
    smallest_scale: 7.0,
    default_scale: 3.0,
    x_bounds: (-0.20, 0.20),
    y_bounds: (-0.50, 0.30),
    z: 0.30,
};

const LEGS_PROFILE: DecalProfile = DecalProfile {
    largest_scale: 1.0,
    smallest_scale: 5.0,
    default_scale: 2.0,
    x_bounds: (-0.50, 0.50),
    y_bounds: (-0.70, 0.20),
    z: 0.40,
};

impl DecalPart {
    /// Get all sections in storage order.
    pub const fn all() -> [DecalPart; SECTION_COUNT] {
        [
            DecalPart::Head,
            DecalPart::Core,
            DecalPart::ArmRight,
            DecalPart::ArmLeft,
            DecalPart::Legs,
        ]
    }

    /// Get the name of this section.
    pub const fn name(&self) -> &'static str {
        match self {
            DecalPart::Head => "head",
            DecalPart::Core => "core",
            DecalPart::ArmRight => "arm_right",
            DecalPart::ArmLeft => "arm_left",
            DecalPart::Legs => "legs",
        }
    }

    /// Get the placement limits for this section.
    pub const fn profile(&self) -> &'static DecalProfile {
        match self {
            DecalPart::Head => &HEAD_PROFILE,
            DecalPart::Core => &CORE_PROFILE,
            DecalPart::ArmRight => &ARM_RIGHT_PROFILE,
            DecalPart::ArmLeft => &ARM_LEFT_PROFILE,
            DecalPart::Legs => &LEGS_PROFILE,
        }
    }
}

impl std::fmt::Display for DecalPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl DecalProfile {
    /// Position bounds `((x_min, x_max), (y_min, y_max))` at `scale`.
    pub fn bounds_at(&self, scale: f32) -> ((f32, f32), (f32, f32)) {
        let ratio = self.default_scale / scale;
        (
            (self.x_bounds.0 * ratio, self.x_bounds.1 * ratio),
            (self.y_bounds.0 * ratio, self.y_bounds.1 * ratio),
        )
    }
}

/// Draw uniformly between `a` and `b`, in whichever order they come.
fn uniform<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    rng.gen_range(lo..=hi).clamp(lo, hi)
}

fn check_scale(scale: Option<f32>) -> Result<()> {
    match scale {
        Some(s) if !(s.is_finite() && s > 0.0) => Err(Error::OutOfRange {
            what: "decal scale",
            value: s.to_string(),
            expected: "a finite value above zero",
        }),
        _ => Ok(()),
    }
}

/// One decal layer (164 bytes).
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct DecalLayer {
    emblem: [u8; EMBLEM_SIZE],
    width: u8,
    height: u8,
    reserved: [u8; 2],
    rotation: [F32; 3],
    position: [F32; 3],
    scale: F32,
}

/// One body section: eight layers.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct DecalSection {
    pub layers: [DecalLayer; LAYERS_PER_SECTION],
}

/// The whole decal region: five sections.
#[derive(Debug, Clone, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct DecalData {
    pub sections: [DecalSection; SECTION_COUNT],
}

const _: () = assert!(std::mem::size_of::<DecalLayer>() == DECAL_LAYER_SIZE);
const _: () = assert!(std::mem::size_of::<DecalSection>() == DECAL_SECTION_SIZE);
const _: () = assert!(std::mem::size_of::<DecalData>() == DECAL_DATA_SIZE);

impl DecalLayer {
    /// Build a layer from its fields. Reserved bytes are zeroed.
    pub fn new(
        emblem: &Emblem,
        width: u8,
        height: u8,
        rotation: [f32; 3],
        position: [f32; 3],
        scale: f32,
    ) -> Self {
        Self {
            emblem: emblem.to_bytes(),
            width,
            height,
            reserved: [0; 2],
            rotation: rotation.map(F32::new),
            position: position.map(F32::new),
            scale: F32::new(scale),
        }
    }

    /// Decode the embedded emblem.
    pub fn emblem(&self) -> Result<Emblem> {
        Emblem::parse(&self.emblem)
    }

    pub fn as_bytes(&self) -> &[u8] {
        IntoBytes::as_bytes(self)
    }

    pub fn emblem_bytes(&self) -> &[u8; EMBLEM_SIZE] {
        &self.emblem
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn reserved(&self) -> [u8; 2] {
        self.reserved
    }

    /// Rotation around x, y, z in radians.
    pub fn rotation(&self) -> [f32; 3] {
        self.rotation.map(F32::get)
    }

    pub fn position(&self) -> [f32; 3] {
        self.position.map(F32::get)
    }

    pub fn scale(&self) -> f32 {
        self.scale.get()
    }

    /// Check that the layer sits inside `part`'s visible area at its own scale.
    pub fn fits(&self, part: DecalPart) -> bool {
        let profile = part.profile();
        let scale = self.scale();
        if !(scale.is_finite() && scale > 0.0) {
            return false;
        }

        let ((x_min, x_max), (y_min, y_max)) = profile.bounds_at(scale);
        let [x, y, z] = self.position();
        let (x_lo, x_hi) = (x_min.min(x_max), x_min.max(x_max));
        let (y_lo, y_hi) = (y_min.min(y_max), y_min.max(y_max));

        (x_lo..=x_hi).contains(&x) && (y_lo..=y_hi).contains(&y) && z == profile.z
    }

    fn random<R: Rng + ?Sized>(part: DecalPart, scale: Option<f32>, rng: &mut R) -> Result<Self> {
        let profile = part.profile();
        let emblem = Emblem::generate_random(None, rng)?;

        let width = rng.gen_range(MIN_DECAL_SIZE..=u8::MAX);
        let height = rng.gen_range(MIN_DECAL_SIZE..=u8::MAX);
        let rotation = [uniform(rng, -PI, PI), uniform(rng, -PI, PI), uniform(rng, -PI, PI)];

        let scale = scale
            .unwrap_or_else(|| uniform(rng, profile.largest_scale, profile.smallest_scale));
        let ((x_min, x_max), (y_min, y_max)) = profile.bounds_at(scale);
        let position = [
            uniform(rng, x_min, x_max),
            uniform(rng, y_min, y_max),
            profile.z,
        ];

        Ok(Self::new(&emblem, width, height, rotation, position, scale))
    }
}

impl DecalSection {
    pub fn as_bytes(&self) -> &[u8] {
        IntoBytes::as_bytes(self)
    }
}

impl DecalData {
    /// Parse the decal region. `data` must be exactly `0x19A0` bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::read_from_bytes(data).map_err(|_| Error::InvalidLength {
            what: "decal data",
            expected: DECAL_DATA_SIZE,
            actual: data.len(),
        })
    }

    /// Get the section for a body part.
    pub fn section(&self, part: DecalPart) -> &DecalSection {
        &self.sections[part as usize]
    }

    /// Get mutable access to the section for a body part.
    pub fn section_mut(&mut self, part: DecalPart) -> &mut DecalSection {
        &mut self.sections[part as usize]
    }

    /// Iterate over sections with their body part.
    pub fn iter_sections(&self) -> impl Iterator<Item = (DecalPart, &DecalSection)> {
        DecalPart::all()
            .into_iter()
            .map(move |part| (part, self.section(part)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        IntoBytes::as_bytes(self)
    }
}

/// Copy the decal region out of a block.
pub fn extract_decals(block: &SchematicBlock) -> DecalData {
    let region = block.region(DECAL_DATA_OFFSET, DECAL_DATA_SIZE);
    DecalData::read_from_bytes(region).unwrap_or_else(|_| DecalData::new_zeroed())
}

/// Copy `block` with its decal region replaced.
pub fn replace_decals(block: &SchematicBlock, decals: &DecalData) -> SchematicBlock {
    block.with_region(DECAL_DATA_OFFSET, decals.as_bytes())
}

/// Copy `block` with its decal region replaced by raw bytes.
pub fn replace_decal_bytes(block: &SchematicBlock, decals: &[u8]) -> Result<SchematicBlock> {
    let decals = DecalData::parse(decals)?;
    Ok(replace_decals(block, &decals))
}

/// Generate one random layer for `part`.
///
/// With `current_scale` the layer uses that scale; otherwise the scale is drawn
/// between the section's largest and smallest sizes. The x/y position is drawn
/// inside the section bounds rescaled to the chosen scale, and z is fixed.
pub fn generate_random_decal_layer<R: Rng + ?Sized>(
    part: DecalPart,
    current_scale: Option<f32>,
    rng: &mut R,
) -> Result<DecalLayer> {
    check_scale(current_scale)?;
    DecalLayer::random(part, current_scale, rng)
}

/// Generate a section of eight independently random layers.
pub fn generate_random_decal_section<R: Rng + ?Sized>(
    part: DecalPart,
    current_scale: Option<f32>,
    rng: &mut R,
) -> Result<DecalSection> {
    check_scale(current_scale)?;

    let mut section = DecalSection::new_zeroed();
    for layer in &mut section.layers {
        *layer = DecalLayer::random(part, current_scale, rng)?;
    }
    Ok(section)
}

/// Generate random decals for all five sections.
pub fn generate_full_random_decal_data<R: Rng + ?Sized>(rng: &mut R) -> Result<DecalData> {
    let mut data = DecalData::new_zeroed();
    for part in DecalPart::all() {
        *data.section_mut(part) = generate_random_decal_section(part, None, rng)?;
    }
    Ok(data)
}

/// Fill a decal region with uniformly random bytes.
///
/// The result is rarely meaningful in game; prefer
/// [`generate_full_random_decal_data`].
pub fn randomize_decal_bytes<R: Rng + ?Sized>(rng: &mut R) -> Vec<u8> {
    let mut data = vec![0u8; DECAL_DATA_SIZE];
    rng.fill(&mut data[..]);
    data
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::block::tests::named_block;

    #[test]
    fn test_layer_layout() {
        let emblem = Emblem::generate_random(Some(1), &mut StdRng::seed_from_u64(3)).unwrap();
        let layer = DecalLayer::new(&emblem, 10, 20, [0.5, -0.5, 1.0], [0.1, 0.2, 0.3], 2.0);
        let bytes = layer.as_bytes();

        assert_eq!(bytes.len(), DECAL_LAYER_SIZE);
        assert_eq!(&bytes[..EMBLEM_SIZE], &emblem.to_bytes());
        assert_eq!(bytes[132], 10);
        assert_eq!(bytes[133], 20);
        assert_eq!(&bytes[134..136], &[0, 0]);
        assert_eq!(&bytes[136..140], &0.5f32.to_le_bytes());
        assert_eq!(&bytes[156..160], &0.3f32.to_le_bytes());
        assert_eq!(&bytes[160..164], &2.0f32.to_le_bytes());
        assert_eq!(layer.emblem().unwrap(), emblem);
    }

    #[test]
    fn test_bounds_shrink_as_scale_grows() {
        let profile = DecalPart::Core.profile();

        assert_eq!(profile.bounds_at(profile.default_scale).0, profile.x_bounds);

        let ((x_min, x_max), _) = profile.bounds_at(profile.default_scale * 2.0);
        assert!((x_min - profile.x_bounds.0 / 2.0).abs() < 1e-6);
        assert!((x_max - profile.x_bounds.1 / 2.0).abs() < 1e-6);

        let ((_, x_max), _) = profile.bounds_at(profile.default_scale / 2.0);
        assert!((x_max - profile.x_bounds.1 * 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_random_layer_invariants() {
        let mut rng = StdRng::seed_from_u64(2024);

        for part in DecalPart::all() {
            let profile = part.profile();
            for _ in 0..100 {
                let layer = generate_random_decal_layer(part, None, &mut rng).unwrap();
                let bytes = layer.as_bytes();

                assert_eq!(bytes.len(), DECAL_LAYER_SIZE);
                assert_eq!(&bytes[134..136], &[0, 0]);
                assert_eq!(&bytes[156..160], &profile.z.to_le_bytes());
                assert!(layer.width() >= 3 && layer.height() >= 3);
                assert!(layer.rotation().iter().all(|r| (-PI..=PI).contains(r)));

                let lo = profile.largest_scale.min(profile.smallest_scale);
                let hi = profile.largest_scale.max(profile.smallest_scale);
                assert!((lo..=hi).contains(&layer.scale()));
                assert!(layer.fits(part));
                assert_eq!(layer.emblem().unwrap().kind, 2);
            }
        }
    }

    #[test]
    fn test_supplied_scale_is_kept() {
        let mut rng = StdRng::seed_from_u64(11);
        let section = generate_random_decal_section(DecalPart::Legs, Some(4.0), &mut rng).unwrap();

        let ((x_min, x_max), (y_min, y_max)) = DecalPart::Legs.profile().bounds_at(4.0);
        for layer in &section.layers {
            assert_eq!(layer.scale(), 4.0);
            let [x, y, _] = layer.position();
            assert!(x >= x_min && x <= x_max);
            assert!(y >= y_min && y <= y_max);
        }
    }

    #[test]
    fn test_rejects_bad_scale() {
        let mut rng = StdRng::seed_from_u64(0);
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                generate_random_decal_layer(DecalPart::Head, Some(scale), &mut rng),
                Err(Error::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_full_data_section_order() {
        let mut rng = StdRng::seed_from_u64(8);
        let data = generate_full_random_decal_data(&mut rng).unwrap();

        assert_eq!(data.as_bytes().len(), DECAL_DATA_SIZE);
        for (part, section) in data.iter_sections() {
            assert_eq!(section.as_bytes().len(), DECAL_SECTION_SIZE);
            assert!(section.layers.iter().all(|l| l.position()[2] == part.profile().z));
        }
    }

    #[test]
    fn test_replace_then_extract() {
        let block = named_block("Ghost", "Fiona");
        let mut rng = StdRng::seed_from_u64(15);
        let decals = generate_full_random_decal_data(&mut rng).unwrap();

        let updated = replace_decals(&block, &decals);
        assert_eq!(extract_decals(&updated), decals);
        assert_eq!(
            &updated.as_bytes()[..DECAL_DATA_OFFSET],
            &block.as_bytes()[..DECAL_DATA_OFFSET]
        );
        assert_eq!(
            &updated.as_bytes()[DECAL_DATA_OFFSET + DECAL_DATA_SIZE..],
            &block.as_bytes()[DECAL_DATA_OFFSET + DECAL_DATA_SIZE..]
        );
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            DecalData::parse(&[0u8; DECAL_DATA_SIZE - 1]),
            Err(Error::InvalidLength { .. })
        ));

        let block = named_block("Ghost", "Fiona");
        let raw = randomize_decal_bytes(&mut StdRng::seed_from_u64(4));
        let updated = replace_decal_bytes(&block, &raw).unwrap();
        assert_eq!(extract_decals(&updated).as_bytes(), &raw[..]);
    }
}
