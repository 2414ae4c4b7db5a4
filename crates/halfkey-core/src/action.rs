use std::fmt;

/// Represents the action state of a key event.
///
/// From `evtest` output, the "magic numbers" for assignment to enums:
///   0 == 'released'
///   1 == 'pressed'
///   2 == 'repeated'
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Action {
    Release = 0,
    Press = 1,
    Repeat = 2,
}

impl Action {
    /// Map the remapper's `up_flag` onto a press or release
    pub fn from_up_flag(up: bool) -> Self {
        if up {
            Action::Release
        } else {
            Action::Press
        }
    }

    /// Returns true if this is a RELEASE event
    pub fn is_up(self) -> bool {
        matches!(self, Action::Release)
    }

    /// Returns true if this is a REPEAT event
    pub fn is_repeat(self) -> bool {
        matches!(self, Action::Repeat)
    }

    /// Whether the key is held down after this event
    pub fn is_down(self) -> bool {
        !self.is_up()
    }

    /// Create Action from i32 value (from evdev)
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Action::Release),
            1 => Some(Action::Press),
            2 => Some(Action::Repeat),
            _ => None,
        }
    }

    /// Convert Action to its i32 representation
    pub fn to_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Release => write!(f, "Up"),
            Action::Press => write!(f, "Down"),
            Action::Repeat => write!(f, "Repeat"),
        }
    }
}
