// Halfkey Layout Table
// Physical rows that take part in mirroring, plus the fixed swap pairs

use strum_macros::{Display, EnumIter};

use crate::Key;

/// One of the four mirrored keyboard rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Row {
    Digits,
    Top,
    Home,
    Bottom,
}

impl Row {
    /// Keys of this row from left to right
    pub fn keys(self) -> &'static [Key] {
        match self {
            Row::Digits => DIGIT_ROW,
            Row::Top => TOP_ROW,
            Row::Home => HOME_ROW,
            Row::Bottom => BOTTOM_ROW,
        }
    }

    /// 0-based position of `key` within this row
    pub fn position(self, key: Key) -> Option<usize> {
        self.keys().iter().position(|k| *k == key)
    }
}

const DIGIT_ROW: &[Key] = &[
    Key::KEY_1,
    Key::KEY_2,
    Key::KEY_3,
    Key::KEY_4,
    Key::KEY_5,
    Key::KEY_6,
    Key::KEY_7,
    Key::KEY_8,
    Key::KEY_9,
    Key::KEY_0,
];

const TOP_ROW: &[Key] = &[
    Key::Q,
    Key::W,
    Key::E,
    Key::R,
    Key::T,
    Key::Y,
    Key::U,
    Key::I,
    Key::O,
    Key::P,
];

const HOME_ROW: &[Key] = &[
    Key::A,
    Key::S,
    Key::D,
    Key::F,
    Key::G,
    Key::H,
    Key::J,
    Key::K,
    Key::L,
    Key::SEMICOLON,
];

const BOTTOM_ROW: &[Key] = &[
    Key::Z,
    Key::X,
    Key::C,
    Key::V,
    Key::B,
    Key::N,
    Key::M,
    Key::COMMA,
    Key::DOT,
    Key::SLASH,
];

/// All mirrored rows, top of the keyboard first
pub const ROWS: [Row; 4] = [Row::Digits, Row::Top, Row::Home, Row::Bottom];

/// Keys that exchange roles regardless of row position
pub const SWAP_PAIRS: [(Key, Key); 3] = [
    (Key::MINUS, Key::GRAVE),
    (Key::BACKSPACE, Key::TAB),
    (Key::ENTER, Key::CAPSLOCK),
];

/// The row containing `key`, if it is part of any mirrored row
pub fn row_of(key: Key) -> Option<Row> {
    ROWS.into_iter().find(|row| row.position(key).is_some())
}

/// The other side of a swap pair, if `key` belongs to one
pub fn swap_partner(key: Key) -> Option<Key> {
    SWAP_PAIRS.iter().find_map(|&(a, b)| {
        if key == a {
            Some(b)
        } else if key == b {
            Some(a)
        } else {
            None
        }
    })
}
