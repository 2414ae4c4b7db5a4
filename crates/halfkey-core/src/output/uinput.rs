// Halfkey uinput Output Layer
// Virtual keyboard that injects the remapped key stream

use std::time::SystemTime;

use evdev::uinput::VirtualDeviceBuilder;
use evdev::{AttributeSet, EventType, InputEvent};

use super::sink::{KeySink, SinkError};
use crate::{Action, Key};

/// Error types for uinput operations
#[derive(Debug, thiserror::Error)]
pub enum UInputError {
    #[error("Failed to create virtual device: {0}")]
    DeviceCreation(String),
}

/// Virtual uinput keyboard used as the injection sink
pub struct VirtualDevice {
    device: evdev::uinput::VirtualDevice,
}

impl VirtualDevice {
    /// Create a virtual keyboard advertising every standard key code (0-255)
    pub fn new(name: &str) -> Result<Self, UInputError> {
        let mut keys = AttributeSet::new();
        for code in 0..256u16 {
            keys.insert(evdev::Key::new(code));
        }

        let device = VirtualDeviceBuilder::new()
            .map_err(|e: std::io::Error| UInputError::DeviceCreation(e.to_string()))?
            .name(name)
            .with_keys(&keys)
            .map_err(|e: std::io::Error| UInputError::DeviceCreation(e.to_string()))?
            .build()
            .map_err(|e: std::io::Error| UInputError::DeviceCreation(e.to_string()))?;

        log::info!("Created virtual keyboard '{}'", name);
        Ok(Self { device })
    }
}

impl KeySink for VirtualDevice {
    fn send_key(
        &mut self,
        key: Key,
        action: Action,
        timestamp: SystemTime,
    ) -> Result<(), SinkError> {
        log::trace!("uinput {} {} (event time {:?})", action, key, timestamp);

        let key_event = InputEvent::new(EventType::KEY, key.code(), action.to_i32());
        // SYN event is required for the kernel to process the key event
        let syn_event = InputEvent::new(EventType::SYNCHRONIZATION, 0, 0);

        self.device.emit(&[key_event, syn_event]).map_err(|e| {
            SinkError::Write(format!("{} {}: {}", action, key, e))
        })
    }
}
