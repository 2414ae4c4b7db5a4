// Halfkey Core Library
// Half-keyboard remapping: one hand types what two hands would

pub mod action;
pub mod config;
pub mod event;
pub mod input;
pub mod key;
pub mod layout;
pub mod mirror;
pub mod output;
pub mod selftest;
pub mod state;
pub mod transform;

pub use action::Action;
pub use event::Dispatcher;
pub use input::{is_keyboard, is_virtual_device, DeviceCapabilities, DeviceFilter};
pub use key::{key_from_name, Key};
pub use layout::{row_of, Row};
pub use mirror::{has_partner, mirror, MirrorTable};
pub use output::{KeySink, RecordingSink, SinkError};
pub use selftest::run_self_test;
pub use state::KeyState;
pub use transform::{HalfKeyboard, Mode, RemapResult};

#[cfg(feature = "pure-rust")]
pub use config::{Config, ConfigError};

#[cfg(feature = "pure-rust")]
pub use event::{EventLoop, EventLoopError, EventLoopResult};

#[cfg(feature = "pure-rust")]
pub use output::{UInputError, VirtualDevice};
