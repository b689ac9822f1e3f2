//! Part catalog loading.
//!
//! The catalog is a hand-written text file mapping part IDs to names,
//! grouped by category:
//!
//! ```text
//! Head (15):
//! 0001 Standard Head
//! 0002 Light Head
//!
//! Core (12):
//! 0101 Standard Core
//! ```
//!
//! A line ending in `"):"` opens a category named by the text before its
//! parenthesised group. Every following `<id> <name>` line belongs to that
//! category. Anything that does not fit is skipped.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::{Error, Result};

/// Part ID → part name lookup grouped by category, in file order.
///
/// Built once and then only read, so a shared reference can be handed to any
/// number of decoders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartCatalog {
    categories: IndexMap<String, IndexMap<String, String>>,
}

impl PartCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a text file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::from_read(path, e))?;
        let catalog = Self::parse(&text);

        log::debug!(
            "Loaded part catalog {}: {} categories, {} parts",
            path.display(),
            catalog.categories.len(),
            catalog.len()
        );

        Ok(catalog)
    }

    /// Parse catalog text. Malformed lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut categories: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
        let mut current: Option<String> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_suffix("):") {
                match header.rsplit_once('(') {
                    Some((name, _count)) => {
                        let name = name.trim().to_string();
                        categories.insert(name.clone(), IndexMap::new());
                        current = Some(name);
                    }
                    None => {
                        // Parts under a broken header belong to no known category.
                        log::debug!("Skipping malformed category header: {line}");
                        current = None;
                    }
                }
                continue;
            }

            let Some(category) = current.as_ref() else {
                continue;
            };

            if let Some((id, name)) = line.split_once(char::is_whitespace) {
                if let Some(parts) = categories.get_mut(category) {
                    parts.insert(id.trim().to_string(), name.trim().to_string());
                }
            }
        }

        Self { categories }
    }

    /// Insert a single part, creating the category if needed.
    pub fn insert(&mut self, category: &str, part_id: &str, name: &str) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(part_id.to_string(), name.to_string());
    }

    /// Look up the name of a part.
    pub fn part_name(&self, category: &str, part_id: &str) -> Option<&str> {
        self.categories
            .get(category)
            .and_then(|parts| parts.get(part_id))
            .map(String::as_str)
    }

    /// Get all parts in a category, in file order.
    pub fn category(&self, category: &str) -> Option<&IndexMap<String, String>> {
        self.categories.get(category)
    }

    /// Iterate over category names.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Total number of parts across all categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(IndexMap::len).sum()
    }

    /// Check if the catalog has no parts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_category() {
        let catalog = PartCatalog::parse("Head (15):\n0001 Standard Head\n0002 Light Head\n");

        let head = catalog.category("Head").unwrap();
        assert_eq!(head.len(), 2);
        assert_eq!(catalog.part_name("Head", "0001"), Some("Standard Head"));
        assert_eq!(catalog.part_name("Head", "0002"), Some("Light Head"));
        assert_eq!(catalog.categories().collect::<Vec<_>>(), vec!["Head"]);
    }

    #[test]
    fn test_parse_skips_noise() {
        let text = "\
orphan line before any header
Main Booster (3):

1200   Twin   Thruster
malformed
Broken header):
1201 Still Main Booster
Arm Unit (2) (R/L):
0500 Rifle
";
        let catalog = PartCatalog::parse(text);

        assert_eq!(catalog.part_name("Main Booster", "1200"), Some("Twin   Thruster"));
        assert!(catalog.part_name("Main Booster", "1201").is_none());
        assert_eq!(catalog.part_name("Arm Unit (2)", "0500"), Some("Rifle"));
        assert_eq!(catalog.len(), 2);
        assert!(catalog.part_name("Main Booster", "malformed").is_none());
    }

    #[test]
    fn test_broken_header_does_not_leak_into_previous_category() {
        let catalog =
            PartCatalog::parse("Back Booster (2):\n0700 Booster A\nArm Unit):\n0500 Rifle\n");

        let back = catalog.category("Back Booster").unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.get("0700").map(String::as_str), Some("Booster A"));
        assert!(catalog.part_name("Back Booster", "0500").is_none());
        assert_eq!(catalog.categories().count(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = PartCatalog::from_file("/nonexistent/catalog.txt").unwrap_err();
        assert!(matches!(err, Error::MissingFile(_)));
    }
}
