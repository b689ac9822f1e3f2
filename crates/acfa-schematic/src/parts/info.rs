//! Decoded schematic summary.

use indexmap::IndexMap;

use super::slots::{decode_parts, PartSlot};
use super::tuning::decode_tuning;
use crate::block::SchematicBlock;
use crate::catalog::PartCatalog;

/// Everything shown about a schematic: identity, parts and tuning.
///
/// Decoding never fails. Unreadable names and unknown part IDs come back as
/// sentinel strings so one bad record does not hide the rest of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SchematicInfo {
    pub name: String,
    pub designer: String,
    /// User category, 1-128.
    pub category: u8,
    pub protected: bool,
    pub timestamp: u64,
    pub parts: Vec<PartSlot>,
    pub tuning: IndexMap<&'static str, u8>,
}

impl SchematicInfo {
    /// Decode a block, resolving part names through `catalog`.
    pub fn decode(block: &SchematicBlock, catalog: &PartCatalog) -> Self {
        Self {
            name: block.name(),
            designer: block.designer(),
            category: block.category(),
            protected: block.is_protected(),
            timestamp: block.timestamp(),
            parts: decode_parts(block, catalog),
            tuning: decode_tuning(block),
        }
    }

    /// One-line title: `"{name} by {designer}"`.
    pub fn title(&self) -> String {
        format!("{} by {}", self.name, self.designer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::tests::named_block;
    use crate::parts::slots::encode_part;

    #[test]
    fn test_decode_summary() {
        let catalog = PartCatalog::parse("Head (1):\n0001 Standard Head\n");
        let block = encode_part(&named_block("Ghost", "Fiona"), 0, 1).unwrap();

        let info = SchematicInfo::decode(&block, &catalog);
        assert_eq!(info.name, "Ghost");
        assert_eq!(info.title(), "Ghost by Fiona");
        assert_eq!(info.category, 1);
        assert!(!info.protected);
        assert_eq!(info.parts[0].part_name, "Standard Head");
        assert_eq!(info.tuning.len(), 28);
    }
}
