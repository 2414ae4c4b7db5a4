// Halfkey Mirror Function
// Symmetric lookup from a key to its partner on the other half of the keyboard

use std::sync::OnceLock;

use crate::key::KEY_CNT;
use crate::layout::{ROWS, SWAP_PAIRS};
use crate::Key;

/// Precomputed mirror partner for every representable key code.
///
/// Row keys are reflected around the middle of their row, swap pairs
/// exchange with each other, and everything else maps to itself.
#[derive(Debug, Clone)]
pub struct MirrorTable {
    partners: Vec<Key>,
}

impl MirrorTable {
    /// Build the table from the row definitions and swap pairs
    pub fn new() -> Self {
        let mut partners: Vec<Key> = (0..KEY_CNT as u16).map(Key::from).collect();

        for row in ROWS {
            let keys = row.keys();
            let last = keys.len() - 1;
            for (offset, key) in keys.iter().enumerate() {
                partners[key.code() as usize] = keys[last - offset];
            }
        }

        for (a, b) in SWAP_PAIRS {
            partners[a.code() as usize] = b;
            partners[b.code() as usize] = a;
        }

        Self { partners }
    }

    /// Process-wide table, built on first use
    pub fn global() -> &'static MirrorTable {
        static TABLE: OnceLock<MirrorTable> = OnceLock::new();
        TABLE.get_or_init(MirrorTable::new)
    }

    /// The key in the mirrored position, or `key` itself when it has no partner
    pub fn mirror(&self, key: Key) -> Key {
        self.partners
            .get(key.code() as usize)
            .copied()
            .unwrap_or(key)
    }

    /// Whether mirroring changes `key`
    pub fn has_partner(&self, key: Key) -> bool {
        self.mirror(key) != key
    }
}

impl Default for MirrorTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Mirror a key through the global table
pub fn mirror(key: Key) -> Key {
    MirrorTable::global().mirror(key)
}

/// Whether `key` has a genuine mirror partner
pub fn has_partner(key: Key) -> bool {
    MirrorTable::global().has_partner(key)
}
