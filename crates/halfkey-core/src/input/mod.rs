// Halfkey Input Layer
// Deciding which evdev devices to take over

mod device;
mod filter;

pub use device::{is_keyboard, is_virtual_device, DeviceCapabilities, REQUIRED_KEYS};
pub use filter::DeviceFilter;
