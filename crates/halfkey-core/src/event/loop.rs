// Halfkey Event Loop
// Exclusive ownership of the physical keyboards and key event polling

use std::os::unix::io::AsRawFd;
use std::time::SystemTime;

use evdev::{Device, EventType};

use crate::input::{is_keyboard, is_virtual_device, DeviceCapabilities, DeviceFilter};
use crate::output::VIRTUAL_DEVICE_NAME;
use crate::{Action, Key};

/// Result type for event loop operations
pub type EventLoopResult<T> = Result<T, EventLoopError>;

/// Errors that can occur in event loop
#[derive(Debug, thiserror::Error)]
pub enum EventLoopError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event device error: {0}")]
    Evdev(String),
}

/// Device information for listing devices
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    /// Device index
    pub index: usize,
    /// Device name
    pub name: String,
    /// Device path (if available)
    pub path: Option<String>,
}

/// A physical key event read from a grabbed device
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub key: Key,
    pub action: Action,
    /// Kernel timestamp of the event
    pub timestamp: SystemTime,
    /// Source device name
    pub device_name: String,
}

/// Grabbed keyboards plus the poll set used to wait on them.
///
/// While grabbed, no other reader sees these devices' events; the
/// remapped stream reaches the system only through the uinput device.
pub struct EventLoop {
    devices: Vec<Device>,
    poll_fds: Vec<libc::pollfd>,
    grabbed: bool,
}

impl EventLoop {
    /// Find keyboards matching `filter` and grab each of them
    pub fn new_with_grab(filter: &DeviceFilter) -> EventLoopResult<Self> {
        let mut devices = Self::find_keyboards(filter)?;

        // A previous instance may have died while holding the grab
        for device in &mut devices {
            let _ = device.ungrab();
        }

        for device in &mut devices {
            log::info!("Grabbing device {}", device.name().unwrap_or("Unknown"));
            device.grab()?;
        }

        let poll_fds = Self::create_poll_fds(&devices);
        Ok(Self {
            devices,
            poll_fds,
            grabbed: true,
        })
    }

    fn create_poll_fds(devices: &[Device]) -> Vec<libc::pollfd> {
        devices
            .iter()
            .map(|d| libc::pollfd {
                fd: d.as_raw_fd(),
                events: libc::POLLIN,
                revents: 0,
            })
            .collect()
    }

    /// Give the devices back to the rest of the system
    pub fn ungrab_all(&mut self) {
        if self.grabbed {
            for device in &mut self.devices {
                log::info!("Releasing device {}", device.name().unwrap_or("Unknown"));
                let _ = device.ungrab();
            }
            self.grabbed = false;
        }
    }

    /// List all keyboards that autodetection would pick
    pub fn list_devices() -> EventLoopResult<Vec<DeviceInfo>> {
        let devices_info: Vec<DeviceInfo> = evdev::enumerate()
            .filter(|(_, device)| Self::is_keyboard_device(device))
            .enumerate()
            .map(|(index, (path, device))| DeviceInfo {
                index,
                name: device.name().unwrap_or("Unknown").to_string(),
                path: path.to_str().map(|s| s.to_string()),
            })
            .collect();

        if devices_info.is_empty() {
            return Err(EventLoopError::DeviceNotFound(
                "No keyboard devices found".to_string(),
            ));
        }

        Ok(devices_info)
    }

    fn find_keyboards(filter: &DeviceFilter) -> EventLoopResult<Vec<Device>> {
        let keyboards: Vec<Device> = evdev::enumerate()
            .filter(|(path, device)| {
                let device_name = device.name().unwrap_or("Unknown");
                let device_path = path.to_str().unwrap_or_default();
                let matched = filter.matches(
                    device_name,
                    device_path,
                    Self::is_keyboard_device(device),
                    is_virtual_device(device_name, VIRTUAL_DEVICE_NAME),
                );
                log::debug!(
                    "Device {} ({}) {}",
                    device_name,
                    device_path,
                    if matched { "selected" } else { "skipped" }
                );
                matched
            })
            .map(|(_, device)| device)
            .collect();

        if keyboards.is_empty() {
            let what = if filter.is_autodetect() {
                "No keyboard devices found".to_string()
            } else {
                format!("No device matches {:?}", filter.names())
            };
            return Err(EventLoopError::DeviceNotFound(what));
        }

        Ok(keyboards)
    }

    fn is_keyboard_device(device: &Device) -> bool {
        let has_ev_key = device.supported_events().contains(EventType::KEY);
        let keys = device
            .supported_keys()
            .map(|keys| keys.iter().map(|k| k.code()).collect::<Vec<u16>>())
            .unwrap_or_default();

        let device_name = device.name().unwrap_or("");
        !is_virtual_device(device_name, VIRTUAL_DEVICE_NAME)
            && is_keyboard(&DeviceCapabilities::new(has_ev_key, keys))
    }

    /// Wait up to `timeout_ms` for key events from any grabbed device.
    ///
    /// Non-key events (SYN, MSC, LED) are dropped. A timeout or an
    /// interrupted poll (EINTR) yields an empty vector.
    pub fn poll_for_events(&mut self, timeout_ms: i32) -> EventLoopResult<Vec<KeyEvent>> {
        let mut events = Vec::new();

        let poll_result = unsafe {
            libc::poll(
                self.poll_fds.as_mut_ptr(),
                self.poll_fds.len() as libc::nfds_t,
                timeout_ms,
            )
        };

        if poll_result < 0 {
            let err = std::io::Error::last_os_error();
            // A signal arrived; the caller checks its running flag
            if err.raw_os_error() == Some(libc::EINTR) {
                return Ok(events);
            }
            return Err(EventLoopError::Io(err));
        }

        if poll_result == 0 {
            return Ok(events);
        }

        for (i, device) in self.devices.iter_mut().enumerate() {
            let revents = self.poll_fds[i].revents;
            let device_name = device.name().unwrap_or("Unknown").to_string();
            if revents & (libc::POLLERR | libc::POLLHUP | libc::POLLNVAL) != 0 {
                return Err(EventLoopError::Evdev(format!(
                    "{}: device disconnected",
                    device_name
                )));
            }
            if revents & libc::POLLIN == 0 {
                continue;
            }
            let fetched = device
                .fetch_events()
                .map_err(|e| EventLoopError::Evdev(format!("{}: {}", device_name, e)))?;
            for event in fetched {
                if event.event_type() != EventType::KEY {
                    continue;
                }
                let Some(action) = Action::from_i32(event.value()) else {
                    continue;
                };
                events.push(KeyEvent {
                    key: Key::from(event.code()),
                    action,
                    timestamp: event.timestamp(),
                    device_name: device_name.clone(),
                });
            }
        }

        Ok(events)
    }

    /// Get the names of all devices
    pub fn device_names(&self) -> Vec<String> {
        self.devices
            .iter()
            .map(|d| d.name().unwrap_or("Unknown").to_string())
            .collect()
    }

    /// Get number of devices managed by this event loop
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}

/// Devices must be ungrabbed on every exit path, including panics,
/// or the keyboard stays unusable.
impl Drop for EventLoop {
    fn drop(&mut self) {
        self.ungrab_all();
    }
}
