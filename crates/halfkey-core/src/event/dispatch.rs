// Halfkey Event Dispatcher
// Feeds physical events through the remapper and injects the outcome

use std::time::SystemTime;

use crate::output::{KeySink, SinkError};
use crate::transform::{HalfKeyboard, Mode, RemapResult};
use crate::{Action, Key};

/// Connects one remapper to one sink.
///
/// Exactly one call to [`Dispatcher::dispatch`] is made per physical event,
/// in arrival order. Nothing is reordered or batched.
#[derive(Debug)]
pub struct Dispatcher<S: KeySink> {
    remapper: HalfKeyboard,
    sink: S,
}

impl<S: KeySink> Dispatcher<S> {
    pub fn new(remapper: HalfKeyboard, sink: S) -> Self {
        Self { remapper, sink }
    }

    /// Handle one physical key event.
    ///
    /// Each event produced by the remapper is sent to the sink and only then
    /// recorded as down or up. Autorepeat goes through
    /// [`HalfKeyboard::process_repeat`]. Returns the remapper's decision.
    pub fn dispatch(
        &mut self,
        key: Key,
        action: Action,
        timestamp: SystemTime,
    ) -> Result<RemapResult, SinkError> {
        // Autorepeat of a held space bar carries no information
        if action.is_repeat() && key == Key::SPACE {
            log::trace!("Dropping space repeat");
            return Ok(RemapResult::Swallow);
        }

        let result = if action.is_repeat() {
            self.remapper.process_repeat(key)
        } else {
            self.remapper.process(key, action.is_up())
        };

        match result {
            RemapResult::Swallow => log::info!("Key{} {} swallowed", action, key),
            RemapResult::Emit(out) => log::info!("Key{} {} -> {}", action, key, out),
            RemapResult::Tap(out) => log::info!("Key{} {} -> tap {}", action, key, out),
        }

        for (out_key, out_action) in result.events(action) {
            log::debug!("Sending {} {}", out_action, out_key);
            self.sink.send_key(out_key, out_action, timestamp)?;
            // A repeat continues a press; it is never a new one
            if !out_action.is_repeat() {
                self.remapper.record(out_key, out_action.is_down());
            }
        }

        Ok(result)
    }

    /// Release every key still down downstream and return to `Idle`
    pub fn release_all(&mut self) -> Result<(), SinkError> {
        let now = SystemTime::now();
        for key in self.remapper.keystate().pressed().into_iter().rev() {
            log::debug!("Releasing held key {}", key);
            self.sink.send_key(key, Action::Release, now)?;
            self.remapper.record(key, false);
        }
        self.remapper.reset();
        Ok(())
    }

    pub fn mode(&self) -> Mode {
        self.remapper.mode()
    }

    pub fn remapper(&self) -> &HalfKeyboard {
        &self.remapper
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Take the sink back, dropping the remapper state
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RecordingSink;

    fn dispatcher() -> Dispatcher<RecordingSink> {
        Dispatcher::new(HalfKeyboard::new(), RecordingSink::new())
    }

    #[test]
    fn test_emitted_events_are_recorded() {
        let mut d = dispatcher();
        let now = SystemTime::now();

        d.dispatch(Key::A, Action::Press, now).unwrap();
        assert!(d.remapper().is_down(Key::A));

        d.dispatch(Key::A, Action::Release, now).unwrap();
        assert!(!d.remapper().is_down(Key::A));
        assert_eq!(
            d.sink().keys(),
            vec![(Key::A, Action::Press), (Key::A, Action::Release)]
        );
    }

    #[test]
    fn test_swallowed_events_are_not_recorded() {
        let mut d = dispatcher();
        let result = d
            .dispatch(Key::SPACE, Action::Press, SystemTime::now())
            .unwrap();
        assert_eq!(result, RemapResult::Swallow);
        assert!(d.sink().sent().is_empty());
        assert!(d.remapper().keystate().is_empty());
    }

    #[test]
    fn test_space_tap_uses_event_timestamp() {
        let mut d = dispatcher();
        let pressed = SystemTime::UNIX_EPOCH;
        let released = SystemTime::now();

        d.dispatch(Key::SPACE, Action::Press, pressed).unwrap();
        d.dispatch(Key::SPACE, Action::Release, released).unwrap();

        let sent = d.sink().sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].action, Action::Press);
        assert_eq!(sent[1].action, Action::Release);
        assert!(sent.iter().all(|e| e.key == Key::SPACE && e.timestamp == released));
        assert!(!d.remapper().is_down(Key::SPACE));
    }

    #[test]
    fn test_space_repeat_dropped_before_remapper() {
        let mut d = dispatcher();
        let now = SystemTime::now();
        let result = d.dispatch(Key::SPACE, Action::Repeat, now).unwrap();
        assert_eq!(result, RemapResult::Swallow);
        assert_eq!(d.mode(), Mode::Idle);
    }

    #[test]
    fn test_repeat_is_forwarded_mirrored() {
        let mut d = dispatcher();
        let now = SystemTime::now();
        d.dispatch(Key::SPACE, Action::Press, now).unwrap();
        d.dispatch(Key::D, Action::Press, now).unwrap();
        d.dispatch(Key::D, Action::Repeat, now).unwrap();
        d.dispatch(Key::D, Action::Release, now).unwrap();

        assert_eq!(
            d.sink().keys(),
            vec![
                (Key::K, Action::Press),
                (Key::K, Action::Repeat),
                (Key::K, Action::Release)
            ]
        );
    }

    #[test]
    fn test_sink_failure_leaves_state_untouched() {
        let mut d = dispatcher();
        d.sink_mut().close();
        let err = d.dispatch(Key::A, Action::Press, SystemTime::now());
        assert!(err.is_err());
        assert!(!d.remapper().is_down(Key::A));
    }

    #[test]
    fn test_release_all() {
        let mut d = dispatcher();
        let now = SystemTime::now();
        d.dispatch(Key::A, Action::Press, now).unwrap();
        d.dispatch(Key::SPACE, Action::Press, now).unwrap();
        d.dispatch(Key::A, Action::Press, now).unwrap();
        d.sink_mut().clear();

        d.release_all().unwrap();

        // A and its partner SEMICOLON are down; released in reverse code order
        assert_eq!(
            d.sink().keys(),
            vec![(Key::SEMICOLON, Action::Release), (Key::A, Action::Release)]
        );
        assert!(d.remapper().keystate().is_empty());
        assert_eq!(d.mode(), Mode::Idle);
    }
}
