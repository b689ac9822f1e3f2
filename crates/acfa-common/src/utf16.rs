//! Fixed-width UTF-16LE name fields.
//!
//! Schematic and designer names are stored as 48 UTF-16 code units
//! (96 bytes), NUL padded. The game only accepts a restricted alphabet, so
//! decoding keeps the leading run of `[A-Za-z0-9 ]` characters and reports
//! anything else through a sentinel value instead of an error.

/// Byte width of a name field inside a schematic block.
pub const NAME_FIELD_SIZE: usize = 96;

/// Returned when a name field holds nothing displayable.
pub const INVALID_NAME: &str = "<Invalid UTF-16 Encoding>";

/// Check whether `c` survives a write/read round trip through a name field.
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' '
}

/// Decode a fixed-width UTF-16LE name field.
///
/// Unpaired surrogates and a dangling odd byte are dropped, NULs are stripped
/// from both ends, then the longest `[A-Za-z0-9 ]` prefix is kept and trimmed.
/// A window that runs past the end of `data` is clamped.
pub fn read_fixed_utf16_name(data: &[u8], offset: usize, byte_length: usize) -> String {
    let start = offset.min(data.len());
    let end = offset.saturating_add(byte_length).min(data.len());
    let field = &data[start..end];

    let units = field
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    let decoded: String = char::decode_utf16(units).filter_map(|c| c.ok()).collect();

    let prefix: String = decoded
        .trim_matches('\0')
        .chars()
        .take_while(|&c| is_name_char(c))
        .collect();

    if prefix.is_empty() {
        INVALID_NAME.to_string()
    } else {
        prefix.trim().to_string()
    }
}

/// Encode `name` into a NUL-padded UTF-16LE field of `byte_length` bytes.
///
/// At most `byte_length / 2 - 1` code units are written so the field always
/// keeps a terminating NUL. A character that would not fit whole is dropped
/// along with everything after it. Returns the field and whether truncation happened.
pub fn write_fixed_utf16_name(name: &str, byte_length: usize) -> (Vec<u8>, bool) {
    let max_units = (byte_length / 2).saturating_sub(1);

    // Truncate on character boundaries so a surrogate pair is never split.
    let mut units: Vec<u16> = Vec::with_capacity(max_units);
    let mut truncated = false;
    let mut buf = [0u16; 2];
    for c in name.chars() {
        let encoded = c.encode_utf16(&mut buf);
        if units.len() + encoded.len() > max_units {
            truncated = true;
            break;
        }
        units.extend_from_slice(encoded);
    }

    let mut field = vec![0u8; byte_length];
    for (slot, unit) in field.chunks_exact_mut(2).zip(&units) {
        slot.copy_from_slice(&unit.to_le_bytes());
    }

    (field, truncated)
}
