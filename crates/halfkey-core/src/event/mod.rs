// Halfkey Event Handling
// Dispatch of physical events and the evdev event loop

pub mod dispatch;
#[cfg(feature = "pure-rust")]
pub mod r#loop;

pub use dispatch::Dispatcher;
#[cfg(feature = "pure-rust")]
pub use r#loop::{DeviceInfo, EventLoop, EventLoopError, EventLoopResult, KeyEvent};
