// Halfkey Input Layer - Device Detection
// A device is only worth grabbing if it can type every mirrored key

use std::collections::HashSet;

use crate::layout::ROWS;
use crate::Key;

/// Device capabilities extracted from an evdev device
#[derive(Debug, Clone)]
pub struct DeviceCapabilities {
    /// Whether the device supports EV_KEY events
    pub has_ev_key: bool,
    /// Supported key codes
    pub supported_keys: HashSet<u16>,
}

impl DeviceCapabilities {
    pub fn new(has_ev_key: bool, supported_keys: impl IntoIterator<Item = u16>) -> Self {
        Self {
            has_ev_key,
            supported_keys: supported_keys.into_iter().collect(),
        }
    }

    /// Check if a specific key is supported
    pub fn supports_key(&self, key: Key) -> bool {
        self.supported_keys.contains(&key.code())
    }
}

/// Keys besides the mirrored rows that half-keyboard typing depends on
pub const REQUIRED_KEYS: &[Key] = &[Key::SPACE, Key::ESC];

/// Determine if a device is a full keyboard.
///
/// It must report EV_KEY, every key of the four mirrored rows, and the
/// space bar that acts as the mirror modifier.
pub fn is_keyboard(capabilities: &DeviceCapabilities) -> bool {
    if !capabilities.has_ev_key {
        return false;
    }

    let rows_present = ROWS
        .iter()
        .flat_map(|row| row.keys())
        .all(|key| capabilities.supports_key(*key));

    rows_present && REQUIRED_KEYS.iter().all(|key| capabilities.supports_key(*key))
}

/// Check if a device is a virtual device based on its name.
///
/// The uinput device created for output must never be grabbed,
/// otherwise every injected event would loop back as input.
pub fn is_virtual_device(name: &str, prefix: &str) -> bool {
    name.contains(prefix) || name.to_lowercase().contains("virtual")
}
