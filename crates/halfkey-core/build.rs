use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Linux input-event-codes.h key codes known by name.
///
/// The first name is the canonical one (used for constants and display),
/// any further names are accepted when parsing.
const KEY_TABLE: &[(u16, &[&str])] = &[
    (0, &["RESERVED"]),
    (1, &["ESC", "ESCAPE"]),
    (2, &["KEY_1", "1"]),
    (3, &["KEY_2", "2"]),
    (4, &["KEY_3", "3"]),
    (5, &["KEY_4", "4"]),
    (6, &["KEY_5", "5"]),
    (7, &["KEY_6", "6"]),
    (8, &["KEY_7", "7"]),
    (9, &["KEY_8", "8"]),
    (10, &["KEY_9", "9"]),
    (11, &["KEY_0", "0"]),
    (12, &["MINUS"]),
    (13, &["EQUAL"]),
    (14, &["BACKSPACE"]),
    (15, &["TAB"]),
    (16, &["Q"]),
    (17, &["W"]),
    (18, &["E"]),
    (19, &["R"]),
    (20, &["T"]),
    (21, &["Y"]),
    (22, &["U"]),
    (23, &["I"]),
    (24, &["O"]),
    (25, &["P"]),
    (26, &["LEFT_BRACE"]),
    (27, &["RIGHT_BRACE"]),
    (28, &["ENTER", "RETURN"]),
    (29, &["LEFT_CTRL"]),
    (30, &["A"]),
    (31, &["S"]),
    (32, &["D"]),
    (33, &["F"]),
    (34, &["G"]),
    (35, &["H"]),
    (36, &["J"]),
    (37, &["K"]),
    (38, &["L"]),
    (39, &["SEMICOLON"]),
    (40, &["APOSTROPHE"]),
    (41, &["GRAVE"]),
    (42, &["LEFT_SHIFT"]),
    (43, &["BACKSLASH"]),
    (44, &["Z"]),
    (45, &["X"]),
    (46, &["C"]),
    (47, &["V"]),
    (48, &["B"]),
    (49, &["N"]),
    (50, &["M"]),
    (51, &["COMMA"]),
    (52, &["DOT"]),
    (53, &["SLASH"]),
    (54, &["RIGHT_SHIFT"]),
    (55, &["KPASTERISK"]),
    (56, &["LEFT_ALT"]),
    (57, &["SPACE"]),
    (58, &["CAPSLOCK"]),
    (59, &["F1"]),
    (60, &["F2"]),
    (61, &["F3"]),
    (62, &["F4"]),
    (63, &["F5"]),
    (64, &["F6"]),
    (65, &["F7"]),
    (66, &["F8"]),
    (67, &["F9"]),
    (68, &["F10"]),
    (69, &["NUMLOCK"]),
    (70, &["SCROLLLOCK"]),
    (86, &["KEY_102ND"]),
    (87, &["F11"]),
    (88, &["F12"]),
    (96, &["KPENTER"]),
    (97, &["RIGHT_CTRL"]),
    (99, &["SYSRQ", "PRINT"]),
    (100, &["RIGHT_ALT"]),
    (102, &["HOME"]),
    (103, &["UP"]),
    (104, &["PAGE_UP"]),
    (105, &["LEFT"]),
    (106, &["RIGHT"]),
    (107, &["END"]),
    (108, &["DOWN"]),
    (109, &["PAGE_DOWN"]),
    (110, &["INSERT"]),
    (111, &["DELETE"]),
    (119, &["PAUSE"]),
    (125, &["LEFT_META", "SUPER"]),
    (126, &["RIGHT_META"]),
    (127, &["COMPOSE"]),
    (139, &["MENU"]),
    (161, &["EJECTCD"]),
];

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("key_codes.rs");
    let mut f = File::create(&dest_path).unwrap();

    writeln!(
        f,
        r#"
/// A single keyboard key code.
///
/// The numeric values match Linux input-event-codes.h definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Key(pub u16);

impl Key {{
    /// Get the raw numeric code value
    pub const fn code(self) -> u16 {{
        self.0
    }}

    /// Get the name of this key
    pub fn name(self) -> &'static str {{
        key_name(self.0)
    }}
}}

impl From<u16> for Key {{
    fn from(code: u16) -> Self {{
        Key(code)
    }}
}}

impl From<Key> for u16 {{
    fn from(key: Key) -> Self {{
        key.0
    }}
}}

impl fmt::Display for Key {{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {{
        write!(f, "{{}}", self.name())
    }}
}}

impl FromStr for Key {{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {{
        key_from_name(s).ok_or_else(|| format!("Unknown key: {{}}", s))
    }}
}}
"#
    )
    .unwrap();

    writeln!(f, "#[allow(dead_code)]\nimpl Key {{").unwrap();
    for (code, names) in KEY_TABLE {
        writeln!(f, "    pub const {}: Key = Key({});", names[0], code).unwrap();
    }
    writeln!(f, "}}\n").unwrap();

    writeln!(f, "/// Canonical name for a key code").unwrap();
    writeln!(f, "pub fn key_name(code: u16) -> &'static str {{").unwrap();
    writeln!(f, "    match code {{").unwrap();
    for (code, names) in KEY_TABLE {
        writeln!(f, "        {} => \"{}\",", code, names[0]).unwrap();
    }
    writeln!(f, "        _ => \"UNKNOWN\",\n    }}\n}}\n").unwrap();

    writeln!(f, "/// Code for an upper-cased key name or alias").unwrap();
    writeln!(f, "fn code_for_name(name: &str) -> Option<u16> {{").unwrap();
    writeln!(f, "    match name {{").unwrap();
    for (code, names) in KEY_TABLE {
        let patterns: Vec<String> = names.iter().map(|n| format!("\"{}\"", n)).collect();
        writeln!(f, "        {} => Some({}),", patterns.join(" | "), code).unwrap();
    }
    writeln!(f, "        _ => None,\n    }}\n}}").unwrap();

    println!("cargo:rerun-if-changed=build.rs");
}
