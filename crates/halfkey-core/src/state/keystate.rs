// Halfkey Key State Tracker
// Which keys are down from the point of view of events already emitted

use crate::Key;
use std::collections::HashSet;

/// Tracks keys that have been sent down and not yet released.
///
/// Every key starts up. Only the emission step records into this,
/// so it reflects what was sent downstream rather than what was pressed.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    down: HashSet<Key>,
}

impl KeyState {
    /// Create a tracker with every key up
    pub fn new() -> Self {
        Self {
            down: HashSet::new(),
        }
    }

    /// Record the direction of an event that was actually emitted
    pub fn record(&mut self, key: Key, is_down: bool) {
        if is_down {
            self.down.insert(key);
        } else {
            self.down.remove(&key);
        }
    }

    /// Check if a key is currently down downstream
    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    /// All keys currently down, in key code order
    pub fn pressed(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self.down.iter().copied().collect();
        keys.sort();
        keys
    }

    /// Mark every key as up
    pub fn clear(&mut self) {
        self.down.clear();
    }

    /// Get the number of keys down
    pub fn len(&self) -> usize {
        self.down.len()
    }

    /// Check if no key is down
    pub fn is_empty(&self) -> bool {
        self.down.is_empty()
    }
}
