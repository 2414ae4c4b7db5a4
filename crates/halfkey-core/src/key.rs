// Halfkey Key Type
// Represents a single key code from Linux input-event-codes.h

use std::fmt;
use std::str::FromStr;

include!(concat!(env!("OUT_DIR"), "/key_codes.rs"));

/// Size of the representable key code space (KEY_CNT in input-event-codes.h)
pub const KEY_CNT: usize = 0x300;

/// Try to parse a key name to a key code
///
/// Names are case-insensitive. A `KEY_` prefix is accepted for every key,
/// so `KEY_SPACE`, `space` and `SPACE` all resolve to the same code.
pub fn key_from_name(name: &str) -> Option<Key> {
    let name_upper = name.trim().to_uppercase();
    code_for_name(&name_upper)
        .or_else(|| {
            name_upper
                .strip_prefix("KEY_")
                .and_then(code_for_name)
        })
        .map(Key::from)
}
