// Halfkey Input Layer - Device Filtering
// Explicit device selection with keyboard autodetection as fallback

/// Which devices to take over.
///
/// With no names configured every non-virtual keyboard is used.
/// Names match either the device name or its /dev/input path exactly,
/// and an explicit match wins over autodetection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    names: Vec<String>,
}

impl DeviceFilter {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Filter that autodetects keyboards
    pub fn autodetect() -> Self {
        Self::default()
    }

    pub fn is_autodetect(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check if a device should be grabbed
    pub fn matches(
        &self,
        device_name: &str,
        device_path: &str,
        is_keyboard: bool,
        is_virtual: bool,
    ) -> bool {
        if !self.names.is_empty() {
            return self
                .names
                .iter()
                .any(|name| name == device_path || name == device_name);
        }

        is_keyboard && !is_virtual
    }
}
