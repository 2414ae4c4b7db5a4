// Halfkey Output Sink
// Destination for synthesized key events

use std::time::SystemTime;

use crate::{Action, Key};

/// Errors raised while injecting a key event
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to write event: {0}")]
    Write(String),

    #[error("Sink is closed")]
    Closed,
}

/// Anything that can inject key events into the host input stack
pub trait KeySink {
    /// Inject one key event.
    ///
    /// `timestamp` is the time of the physical event that caused it.
    fn send_key(&mut self, key: Key, action: Action, timestamp: SystemTime)
        -> Result<(), SinkError>;
}

impl<S: KeySink + ?Sized> KeySink for Box<S> {
    fn send_key(
        &mut self,
        key: Key,
        action: Action,
        timestamp: SystemTime,
    ) -> Result<(), SinkError> {
        (**self).send_key(key, action, timestamp)
    }
}

/// One event handed to a [`RecordingSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentEvent {
    pub key: Key,
    pub action: Action,
    pub timestamp: SystemTime,
}

/// Sink that keeps every event instead of injecting it.
///
/// Used by the self-test and by tests that drive the dispatcher
/// without a uinput device.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    sent: Vec<SentEvent>,
    closed: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events sent so far, oldest first
    pub fn sent(&self) -> &[SentEvent] {
        &self.sent
    }

    /// Sent events without timestamps
    pub fn keys(&self) -> Vec<(Key, Action)> {
        self.sent.iter().map(|e| (e.key, e.action)).collect()
    }

    /// Drop the recorded history
    pub fn clear(&mut self) {
        self.sent.clear();
    }

    /// Refuse every further event with [`SinkError::Closed`]
    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl KeySink for RecordingSink {
    fn send_key(
        &mut self,
        key: Key,
        action: Action,
        timestamp: SystemTime,
    ) -> Result<(), SinkError> {
        if self.closed {
            return Err(SinkError::Closed);
        }
        self.sent.push(SentEvent {
            key,
            action,
            timestamp,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        let now = SystemTime::now();
        sink.send_key(Key::A, Action::Press, now).unwrap();
        sink.send_key(Key::A, Action::Release, now).unwrap();

        assert_eq!(
            sink.keys(),
            vec![(Key::A, Action::Press), (Key::A, Action::Release)]
        );
        assert_eq!(sink.sent()[0].timestamp, now);
    }

    #[test]
    fn test_closed_sink_rejects_events() {
        let mut sink = RecordingSink::new();
        sink.close();
        let err = sink
            .send_key(Key::A, Action::Press, SystemTime::now())
            .unwrap_err();
        assert!(matches!(err, SinkError::Closed));
        assert!(sink.sent().is_empty());
    }

    #[test]
    fn test_boxed_sink() {
        let mut sink: Box<RecordingSink> = Box::new(RecordingSink::new());
        KeySink::send_key(&mut sink, Key::B, Action::Press, SystemTime::now()).unwrap();
        assert_eq!(sink.keys(), vec![(Key::B, Action::Press)]);
    }
}
