//! Common utilities for the ACFA save tools.
//!
//! This crate provides the primitive codec shared by the format crates:
//!
//! - [`BinaryReader`] - Bounds-checked cursor over byte slices, with both
//!   little-endian and big-endian reads
//! - [`utf16`] - Fixed-width UTF-16LE name fields as stored in schematic blocks

mod error;
mod reader;

pub mod utf16;

pub use error::{Error, Result};
pub use reader::{read_timestamp_be64, BinaryReader};
