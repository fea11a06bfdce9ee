//! Tests for the saved-defaults file: load/save in-process and through the binary.
use std::fs;
use std::sync::Mutex;

use statpulse::settings::{load_settings, save_settings, settings_path, Settings};

// Global lock to serialize tests that mutate process-wide environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn test_missing_file_loads_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    let td = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", td.path());
    assert_eq!(settings_path(), td.path().join("statpulse").join("settings.json"));
    assert_eq!(load_settings(), Settings::default());
}

#[test]
fn test_save_then_load_round_trips() {
    let _guard = ENV_LOCK.lock().unwrap();
    let td = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", td.path());
    let saved = Settings {
        samples: Some(6),
        interval_secs: Some(3),
        graphics: true,
        ..Settings::default()
    };
    save_settings(&saved).unwrap();
    assert_eq!(load_settings(), saved);
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    let td = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", td.path());
    fs::create_dir_all(td.path().join("statpulse")).unwrap();
    fs::write(settings_path(), "{ not json").unwrap();
    assert_eq!(load_settings(), Settings::default());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    let td = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", td.path());
    fs::create_dir_all(td.path().join("statpulse")).unwrap();
    fs::write(settings_path(), r#"{"system": true}"#).unwrap();
    let loaded = load_settings();
    assert!(loaded.system);
    assert_eq!(loaded.samples, None);
}

#[test]
fn test_save_defaults_flag_persists_and_is_reused() {
    let td = tempfile::tempdir().unwrap();
    let run = |args: &[&str]| {
        assert_cmd::Command::cargo_bin("statpulse")
            .unwrap()
            .env("XDG_CONFIG_HOME", td.path())
            .env("STATPULSE_CPU_WINDOW_MS", "10")
            .args(args)
            .output()
            .expect("run statpulse")
    };

    let first = run(&["--system", "--samples=2", "--tdelay=0", "--save-defaults"]);
    assert!(first.status.success());
    let data = fs::read_to_string(td.path().join("statpulse").join("settings.json"))
        .expect("settings.json created");
    assert!(data.contains("\"samples\": 2"), "{data}");
    assert!(data.contains("\"system\": true"), "{data}");

    let second = run(&[]);
    assert!(second.status.success());
    let text = String::from_utf8_lossy(&second.stdout);
    assert!(text.contains("Nbr of samples: 2 -- every 0 secs"), "{text}");
    assert!(!text.contains("### Sessions/users ###"));
}
