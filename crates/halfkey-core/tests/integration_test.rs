// Halfkey Integration Tests
// Layout, mirror table, device selection and config loading through the public API

use halfkey_core::key::KEY_CNT;
use halfkey_core::layout::ROWS;
use halfkey_core::{
    has_partner, is_keyboard, is_virtual_device, key_from_name, mirror, row_of,
    DeviceCapabilities, DeviceFilter, Key, Row,
};

#[test]
fn test_mirror_is_an_involution_for_every_code() {
    for code in 0..KEY_CNT as u16 {
        let key = Key::from(code);
        assert_eq!(mirror(mirror(key)), key, "mirror(mirror({}))", key);
    }
}

#[test]
fn test_keys_without_partner_map_to_themselves() {
    for key in [
        Key::SPACE,
        Key::ESC,
        Key::LEFT_SHIFT,
        Key::RIGHT_SHIFT,
        Key::LEFT_CTRL,
        Key::LEFT_ALT,
        Key::EQUAL,
        Key::F1,
        Key::LEFT_BRACE,
        Key::APOSTROPHE,
    ] {
        assert_eq!(mirror(key), key);
        assert!(!has_partner(key), "{} should have no partner", key);
    }
}

#[test]
fn test_documented_partners() {
    let pairs = [
        (Key::Q, Key::P),
        (Key::T, Key::Y),
        (Key::A, Key::SEMICOLON),
        (Key::G, Key::H),
        (Key::Z, Key::SLASH),
        (Key::B, Key::N),
        (Key::KEY_1, Key::KEY_0),
        (Key::KEY_5, Key::KEY_6),
        (Key::MINUS, Key::GRAVE),
        (Key::BACKSPACE, Key::TAB),
        (Key::ENTER, Key::CAPSLOCK),
    ];
    for (a, b) in pairs {
        assert_eq!(mirror(a), b, "mirror({})", a);
        assert_eq!(mirror(b), a, "mirror({})", b);
    }
}

#[test]
fn test_row_keys_stay_in_their_row() {
    for row in ROWS {
        for key in row.keys() {
            assert_eq!(row_of(*key), Some(row));
            assert_eq!(row_of(mirror(*key)), Some(row), "{} in {}", key, row);
        }
    }
}

#[test]
fn test_row_of_non_row_keys() {
    assert_eq!(row_of(Key::SPACE), None);
    assert_eq!(row_of(Key::ESC), None);
    assert_eq!(row_of(Key::LEFT_SHIFT), None);
    assert_eq!(row_of(Key::TAB), None);
    assert_eq!(row_of(Key::F), Some(Row::Home));
}

#[test]
fn test_key_names_round_trip_through_lookup() {
    assert_eq!(key_from_name("space"), Some(Key::SPACE));
    assert_eq!(key_from_name("KEY_F12"), Some(Key::F12));
    assert_eq!(key_from_name("semicolon"), Some(Key::SEMICOLON));
    assert_eq!(key_from_name("no-such-key"), None);
    assert_eq!(Key::CAPSLOCK.to_string(), "CAPSLOCK");
}

#[test]
fn test_autodetect_selects_real_keyboards_only() {
    let filter = DeviceFilter::autodetect();
    let keyboard = DeviceCapabilities::new(true, 1..=88u16);
    let mouse = DeviceCapabilities::new(true, [272u16, 273, 274]);

    assert!(filter.matches(
        "AT Translated Set 2 keyboard",
        "/dev/input/event3",
        is_keyboard(&keyboard),
        is_virtual_device("AT Translated Set 2 keyboard", "Halfkey"),
    ));
    assert!(!filter.matches(
        "USB Mouse",
        "/dev/input/event4",
        is_keyboard(&mouse),
        false,
    ));
    assert!(!filter.matches(
        "Halfkey (virtual) Keyboard",
        "/dev/input/event9",
        true,
        is_virtual_device("Halfkey (virtual) Keyboard", "Halfkey"),
    ));
}

#[cfg(feature = "pure-rust")]
mod config_files {
    use std::fs;

    use halfkey_core::config::{Config, ConfigError, DEFAULT_POLL_TIMEOUT_MS};
    use halfkey_core::Key;

    #[test]
    fn test_load_config_from_file() {
        let dir = std::env::temp_dir().join(format!("halfkey-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(
            &path,
            r#"
[general]
emergency_eject_key = "KEY_PAUSE"

[devices]
only = ["/dev/input/event2"]
"#,
        )
        .unwrap();

        let config = Config::from_toml_path(&path).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(config.emergency_eject_key, Some(Key::PAUSE));
        assert_eq!(config.device_filter, vec!["/dev/input/event2".to_string()]);
        assert_eq!(config.poll_timeout_ms, DEFAULT_POLL_TIMEOUT_MS);
        assert!(!config.mirror_mode);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::from_toml_path("/nonexistent/halfkey/config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
