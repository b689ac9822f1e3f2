//! Color, pattern and eye color regions of a schematic block.
//!
//! The offsets are local to a block; add the container's schematic start
//! (`0x148`) to get the absolute position inside `DESDOC.DAT` for slot 0.

use rand::Rng;

use crate::block::SchematicBlock;
use crate::{Error, Result};

/// Local offset of the color table.
pub const COLORS_OFFSET: usize = 0x148;
/// Size of the color table (204 RGBA entries).
pub const COLORS_SIZE: usize = 0x330;

/// Local offset of the pattern table.
pub const PATTERNS_OFFSET: usize = 0x478;
/// Size of the pattern table.
pub const PATTERNS_SIZE: usize = 0x24;

/// Local offset of the eye color.
pub const EYE_COLOR_OFFSET: usize = 0x49C;
/// Size of the eye color entry.
pub const EYE_COLOR_SIZE: usize = 0x4;

/// Bytes per RGBA color entry.
pub const COLOR_STRIDE: usize = 4;

/// Independent copies of the paint regions of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintBlocks {
    pub colors: Vec<u8>,
    pub patterns: Vec<u8>,
    pub eye_color: Vec<u8>,
}

impl PaintBlocks {
    /// Iterate over color entries as `[r, g, b, a]`.
    pub fn rgba(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.colors
            .chunks_exact(COLOR_STRIDE)
            .map(|c| [c[0], c[1], c[2], c[3]])
    }
}

/// Copy the color, pattern and eye color regions out of a block.
pub fn extract_paint(block: &SchematicBlock) -> PaintBlocks {
    PaintBlocks {
        colors: block.region(COLORS_OFFSET, COLORS_SIZE).to_vec(),
        patterns: block.region(PATTERNS_OFFSET, PATTERNS_SIZE).to_vec(),
        eye_color: block.region(EYE_COLOR_OFFSET, EYE_COLOR_SIZE).to_vec(),
    }
}

fn check_size(region: &'static str, data: Option<&[u8]>, expected: usize) -> Result<()> {
    match data {
        Some(bytes) if bytes.len() != expected => Err(Error::SizeMismatch {
            region,
            expected,
            actual: bytes.len(),
        }),
        _ => Ok(()),
    }
}

/// Copy `block` with any supplied paint region replaced.
///
/// `None` leaves a region as it is. Every supplied region is size-checked
/// before anything is written.
pub fn replace_paint(
    block: &SchematicBlock,
    colors: Option<&[u8]>,
    patterns: Option<&[u8]>,
    eye_color: Option<&[u8]>,
) -> Result<SchematicBlock> {
    check_size("colors", colors, COLORS_SIZE)?;
    check_size("patterns", patterns, PATTERNS_SIZE)?;
    check_size("eye color", eye_color, EYE_COLOR_SIZE)?;

    let mut result = block.clone();
    if let Some(colors) = colors {
        result = result.with_region(COLORS_OFFSET, colors);
    }
    if let Some(patterns) = patterns {
        result = result.with_region(PATTERNS_OFFSET, patterns);
    }
    if let Some(eye_color) = eye_color {
        result = result.with_region(EYE_COLOR_OFFSET, eye_color);
    }
    Ok(result)
}

/// Randomize the RGB channels of every color entry.
///
/// The alpha byte is unused in game and kept as is.
pub fn randomize_colors<R: Rng + ?Sized>(colors: &[u8], rng: &mut R) -> Result<Vec<u8>> {
    if colors.len() % COLOR_STRIDE != 0 {
        return Err(Error::MisalignedLength {
            what: "color data",
            stride: COLOR_STRIDE,
            actual: colors.len(),
        });
    }

    let mut result = colors.to_vec();
    for entry in result.chunks_exact_mut(COLOR_STRIDE) {
        rng.fill(&mut entry[..3]);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::block::BLOCK_SIZE;

    fn patterned_block() -> SchematicBlock {
        let data: Vec<u8> = (0..BLOCK_SIZE).map(|i| (i % 251) as u8).collect();
        SchematicBlock::from_vec(data).unwrap()
    }

    #[test]
    fn test_regions_are_contiguous() {
        assert_eq!(COLORS_OFFSET + COLORS_SIZE, PATTERNS_OFFSET);
        assert_eq!(PATTERNS_OFFSET + PATTERNS_SIZE, EYE_COLOR_OFFSET);
        assert_eq!(COLORS_SIZE / COLOR_STRIDE, 204);
    }

    #[test]
    fn test_replace_colors_then_extract() {
        let block = patterned_block();
        let colors = vec![0xAB; COLORS_SIZE];

        let updated = replace_paint(&block, Some(&colors), None, None).unwrap();
        let paint = extract_paint(&updated);
        let original = extract_paint(&block);

        assert_eq!(paint.colors, colors);
        assert_eq!(paint.patterns, original.patterns);
        assert_eq!(paint.eye_color, original.eye_color);
        assert_eq!(
            &updated.as_bytes()[..COLORS_OFFSET],
            &block.as_bytes()[..COLORS_OFFSET]
        );
        assert_eq!(
            &updated.as_bytes()[PATTERNS_OFFSET..],
            &block.as_bytes()[PATTERNS_OFFSET..]
        );
    }

    #[test]
    fn test_replace_patterns_and_eye_color_then_extract() {
        let block = patterned_block();
        let patterns = vec![0xCD; PATTERNS_SIZE];
        let eye_color = [1u8, 2, 3, 4];

        let updated = replace_paint(&block, None, Some(&patterns), Some(&eye_color)).unwrap();
        let paint = extract_paint(&updated);

        assert_eq!(paint.patterns, patterns);
        assert_eq!(paint.eye_color, eye_color);
        assert_eq!(paint.colors, extract_paint(&block).colors);
        let end = EYE_COLOR_OFFSET + EYE_COLOR_SIZE;
        assert_eq!(
            &updated.as_bytes()[..PATTERNS_OFFSET],
            &block.as_bytes()[..PATTERNS_OFFSET]
        );
        assert_eq!(&updated.as_bytes()[end..], &block.as_bytes()[end..]);
    }

    #[test]
    fn test_replace_rejects_wrong_size_without_writing() {
        let block = patterned_block();
        let colors = vec![0u8; COLORS_SIZE];
        let short_eye = [1u8, 2, 3];

        let err = replace_paint(&block, Some(&colors), None, Some(&short_eye)).unwrap_err();
        assert!(matches!(
            err,
            Error::SizeMismatch {
                region: "eye color",
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_randomize_preserves_alpha() {
        let mut rng = StdRng::seed_from_u64(42);
        let colors: Vec<u8> = (0..COLORS_SIZE).map(|i| i as u8).collect();

        let randomized = randomize_colors(&colors, &mut rng).unwrap();
        assert_eq!(randomized.len(), colors.len());
        for i in (3..colors.len()).step_by(COLOR_STRIDE) {
            assert_eq!(randomized[i], colors[i]);
        }
        assert_ne!(randomized, colors);
    }

    #[test]
    fn test_randomize_rejects_partial_entry() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            randomize_colors(&[0u8; 6], &mut rng),
            Err(Error::MisalignedLength { stride: 4, actual: 6, .. })
        ));
    }
}
