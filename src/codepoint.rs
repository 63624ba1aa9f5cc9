//! Conversion between emoji text and codepoint ids.
//!
//! A codepoint id is the lowercase hex of each scalar value, joined with
//! `-`: `"\u{1F4A9}"` is `"1f4a9"`. Image sets key their files by it.

use crate::error::{Error, Result};

/// U+200D. Its presence keeps variation selectors in the id.
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// U+FE0F, the emoji presentation selector.
pub const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Separator between scalar values in an id.
pub const DEFAULT_SEPARATOR: &str = "-";

const ZWJ_UNIT: u16 = 0x200D;
const VS16_UNIT: u16 = 0xFE0F;

/// Codepoint id of `raw`, joined with [`DEFAULT_SEPARATOR`].
///
/// ```
/// use imagemoji::codepoint::to_code_point;
///
/// assert_eq!(to_code_point("\u{1F4A9}"), "1f4a9");
/// assert_eq!(to_code_point("\u{2764}\u{FE0F}"), "2764");
/// ```
pub fn to_code_point(raw: &str) -> String {
    to_code_point_with(raw, DEFAULT_SEPARATOR)
}

/// Codepoint id of `raw` with a custom separator.
pub fn to_code_point_with(raw: &str, separator: &str) -> String {
    let units: Vec<u16> = raw.encode_utf16().collect();
    from_utf16_units(&units, separator)
}

/// Codepoint id of raw UTF-16 code units.
///
/// Selectors are stripped unless a joiner is present. A high surrogate that
/// is never followed by another unit is dropped, and whatever unit follows a
/// high surrogate is combined with it, paired or not.
pub fn from_utf16_units(units: &[u16], separator: &str) -> String {
    let keep_selectors = units.contains(&ZWJ_UNIT);

    let mut points = Vec::with_capacity(units.len());
    let mut pending: Option<u16> = None;

    for &unit in units {
        if !keep_selectors && unit == VS16_UNIT {
            continue;
        }
        if let Some(high) = pending.take() {
            let high = u32::from(high) - 0xD800;
            // 0x10000 + unit always exceeds 0xDC00, so this cannot underflow.
            let scalar = 0x10000 + (high << 10) + u32::from(unit) - 0xDC00;
            points.push(format!("{scalar:x}"));
        } else if (0xD800..=0xDBFF).contains(&unit) {
            pending = Some(unit);
        } else {
            points.push(format!("{unit:x}"));
        }
    }

    points.join(separator)
}

/// Text for a codepoint id.
///
/// ```
/// use imagemoji::codepoint::from_code_point;
///
/// assert_eq!(from_code_point("1f44d").unwrap(), "\u{1F44D}");
/// ```
pub fn from_code_point(id: &str) -> Result<String> {
    from_code_point_with(id, DEFAULT_SEPARATOR)
}

/// Text for a codepoint id split on `separator`.
pub fn from_code_point_with(id: &str, separator: &str) -> Result<String> {
    id.split(separator)
        .map(|part| {
            u32::from_str_radix(part, 16)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| Error::InvalidCodePoint(id.to_string()))
        })
        .collect()
}
