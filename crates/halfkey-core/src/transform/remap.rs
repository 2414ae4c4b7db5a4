// Halfkey Remap State Machine
// Decides, per physical key event, what (if anything) goes downstream
//
// The space bar doubles as a mirror modifier: while it is held, any key
// with a mirror partner is replaced by that partner. Space produces a real
// space only when it is released without having mirrored anything.

use smallvec::{smallvec, SmallVec};
use strum_macros::Display;

use crate::mirror::mirror;
use crate::state::KeyState;
use crate::{Action, Key};

/// Role the space bar currently plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Mode {
    /// Space is not held
    #[default]
    Idle,
    /// Space is held and has not mirrored any key yet
    SpacePressed,
    /// Space is held and has mirrored at least one key
    SpaceModified,
}

/// Outcome of processing one physical key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapResult {
    /// Nothing goes downstream
    Swallow,
    /// Send this key with the direction of the physical event
    Emit(Key),
    /// Send a complete press followed by a release of this key
    Tap(Key),
}

impl RemapResult {
    /// Expand into the (key, action) pairs to inject, in order.
    ///
    /// `action` is the direction of the physical event that produced this result.
    pub fn events(self, action: Action) -> SmallVec<[(Key, Action); 2]> {
        match self {
            RemapResult::Swallow => SmallVec::new(),
            RemapResult::Emit(key) => smallvec![(key, action)],
            RemapResult::Tap(key) => smallvec![(key, Action::Press), (key, Action::Release)],
        }
    }

    /// Whether anything is sent downstream
    pub fn is_swallow(self) -> bool {
        matches!(self, RemapResult::Swallow)
    }
}

/// The half-keyboard state machine.
///
/// One instance per input stream: it owns the space bar mode and the
/// record of keys already sent down, so independent instances never
/// interfere. Events must be fed in arrival order from a single thread.
#[derive(Debug, Clone, Default)]
pub struct HalfKeyboard {
    mode: Mode,
    keystate: KeyState,
    mirror_mode: bool,
}

impl HalfKeyboard {
    /// Create a state machine in `Idle` with every key up
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror every incoming key before anything else runs.
    ///
    /// This reverses the whole keyboard, for typing with the other hand.
    pub fn with_mirror_mode(mut self, enabled: bool) -> Self {
        self.mirror_mode = enabled;
        self
    }

    pub fn mirror_mode(&self) -> bool {
        self.mirror_mode
    }

    /// Current space bar mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Keys currently down downstream
    pub fn keystate(&self) -> &KeyState {
        &self.keystate
    }

    /// Record an event that was actually emitted downstream
    pub fn record(&mut self, key: Key, is_down: bool) {
        self.keystate.record(key, is_down);
    }

    /// Check if a key was sent down and not yet released
    pub fn is_down(&self, key: Key) -> bool {
        self.keystate.is_down(key)
    }

    /// Return to `Idle` and forget every key
    pub fn reset(&mut self) {
        self.mode = Mode::Idle;
        self.keystate.clear();
    }

    /// Resolve an autorepeat of a held physical key.
    ///
    /// A repeat never changes the mode and only continues a key that was
    /// sent down: the key the current mode maps to, or else its partner.
    /// With neither down it is swallowed.
    pub fn process_repeat(&self, key: Key) -> RemapResult {
        let key = if self.mirror_mode { mirror(key) } else { key };
        if key == Key::SPACE {
            return RemapResult::Swallow;
        }

        let target = if self.mode != Mode::Idle { mirror(key) } else { key };
        if self.keystate.is_down(target) {
            return RemapResult::Emit(target);
        }

        let partner = mirror(target);
        if self.keystate.is_down(partner) {
            log::debug!("Repeating held key {} instead of {}", partner, target);
            return RemapResult::Emit(partner);
        }

        log::trace!("Dropping repeat of {}, nothing held", target);
        RemapResult::Swallow
    }

    /// Process one physical key event.
    ///
    /// An escape released while space is held is swallowed even when its
    /// press went downstream; it then stays down until
    /// [`crate::Dispatcher::release_all`].
    ///
    /// # Arguments
    /// * `key` - The physical key reported by the source
    /// * `up` - Whether this is a release
    pub fn process(&mut self, key: Key, up: bool) -> RemapResult {
        log::trace!(
            "process {} {} in mode {}",
            key,
            Action::from_up_flag(up),
            self.mode
        );

        let key = if self.mirror_mode { mirror(key) } else { key };

        if key == Key::SPACE {
            return self.process_space(up);
        }

        let mut key = key;

        // Only keys with a partner spend the space bar's modifier role
        let mirrored = mirror(key);
        if mirrored != key && self.mode != Mode::Idle {
            self.mode = Mode::SpaceModified;
            key = mirrored;
        }

        if key == Key::ESC && self.mode != Mode::Idle {
            self.mode = Mode::SpaceModified;
            return RemapResult::Swallow;
        }

        // Release what was really sent down, which may be the partner
        if up && !self.keystate.is_down(key) {
            let partner = mirror(key);
            if self.keystate.is_down(partner) {
                log::debug!(
                    "StateInversion: releasing key {} instead of {}",
                    partner,
                    key
                );
                key = partner;
                if self.mode == Mode::SpaceModified {
                    self.mode = Mode::SpacePressed;
                }
            }
        }

        RemapResult::Emit(key)
    }

    fn process_space(&mut self, up: bool) -> RemapResult {
        match (self.mode, up) {
            (Mode::Idle, false) => {
                self.mode = Mode::SpacePressed;
                RemapResult::Swallow
            }
            (Mode::Idle, true) => {
                log::debug!("Ignoring stray space release");
                RemapResult::Swallow
            }
            (Mode::SpacePressed, true) => {
                // The original press was swallowed, so send a whole one now
                self.mode = Mode::Idle;
                RemapResult::Tap(Key::SPACE)
            }
            (Mode::SpaceModified, true) => {
                self.mode = Mode::Idle;
                RemapResult::Swallow
            }
            (Mode::SpacePressed | Mode::SpaceModified, false) => RemapResult::Swallow,
        }
    }
}
