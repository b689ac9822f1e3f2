//! Tuning table: 28 single-byte tuning values at local offset `0x126`.

use indexmap::IndexMap;

use crate::block::SchematicBlock;
use crate::{Error, Result};

/// Local offset of the tuning table.
pub const TUNING_OFFSET: usize = 0x126;

/// Tuning labels in table order.
pub const TUNING_LABELS: [&str; 28] = [
    "en_output",
    "en_capacity",
    "kp_output",
    "load",
    "en_weapon_skill",
    "maneuverability",
    "firing_stability",
    "aim_precision",
    "lock_speed",
    "missile_lock_speed",
    "radar_refresh_rate",
    "ecm_resistance",
    "rectification_head",
    "rectification_core",
    "rectification_arm",
    "rectification_leg",
    "horizontal_thrust_main",
    "vertical_thrust",
    "horizontal_thrust_side",
    "horizontal_thrust_back",
    "quick_boost_main",
    "quick_boost_side",
    "quick_boost_back",
    "quick_boost_overed",
    "turning_ability",
    "stability_head",
    "stability_core",
    "stability_legs",
];

/// Decode the tuning table, keyed by label in table order.
pub fn decode_tuning(block: &SchematicBlock) -> IndexMap<&'static str, u8> {
    let table = block.region(TUNING_OFFSET, TUNING_LABELS.len());
    TUNING_LABELS.iter().copied().zip(table.iter().copied()).collect()
}

/// Copy `block` with the tuning value `label` set to `value`.
pub fn encode_tuning(block: &SchematicBlock, label: &str, value: u8) -> Result<SchematicBlock> {
    let index = TUNING_LABELS
        .iter()
        .position(|&l| l == label)
        .ok_or_else(|| Error::OutOfRange {
            what: "tuning label",
            value: label.to_string(),
            expected: "one of the 28 tuning labels",
        })?;

    Ok(block.with_region(TUNING_OFFSET + index, &[value]))
}
