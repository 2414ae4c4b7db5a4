// Halfkey Output Layer
// Injection of synthesized key events

mod sink;

#[cfg(feature = "pure-rust")]
mod uinput;

pub use sink::{KeySink, RecordingSink, SentEvent, SinkError};

#[cfg(feature = "pure-rust")]
pub use uinput::{UInputError, VirtualDevice};

/// Name of the uinput keyboard; devices carrying it are never grabbed
pub const VIRTUAL_DEVICE_NAME: &str = "Halfkey (virtual) Keyboard";
