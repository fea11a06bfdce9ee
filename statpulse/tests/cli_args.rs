//! CLI arg parsing tests for statpulse
use assert_cmd::Command;

fn statpulse(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("statpulse").expect("binary built");
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("STATPULSE_CPU_WINDOW_MS", "10")
        .env_remove("STATPULSE_LOG_FILE");
    cmd
}

#[test]
fn test_help_mentions_every_flag() {
    let td = tempfile::tempdir().unwrap();
    let output = statpulse(td.path()).arg("--help").output().expect("run statpulse --help");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--system",
        "--user",
        "--sequential",
        "--graphics",
        "--samples",
        "--tdelay",
        "--save-defaults",
        "SAMPLES",
        "SECONDS",
    ] {
        assert!(text.contains(flag), "help text missing {flag}\n{text}");
    }
}

#[test]
fn test_short_system_session_runs_to_completion() {
    let td = tempfile::tempdir().unwrap();
    let output = statpulse(td.path())
        .args(["--system", "--samples=1", "--tdelay=0"])
        .output()
        .expect("run statpulse");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.starts_with("\x1b[2J\x1b[1;1H"));
    assert!(text.contains("Nbr of samples: 1 -- every 0 secs"));
    assert!(text.contains("### Memory ### (Phys.Used/Tot -- Virtual Used/Tot)"));
    assert!(!text.contains("### Sessions/users ###"));
    assert!(text.contains("### System Information ###"));
    assert!(text.ends_with("\x1b[999B\x1b[999;1H"));
}

#[test]
fn test_positionals_are_overridden_by_flags() {
    let td = tempfile::tempdir().unwrap();
    let output = statpulse(td.path())
        .args(["4", "9", "--samples=2", "--tdelay=0", "--user", "--sequential"])
        .output()
        .expect("run statpulse");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert_eq!(text.matches("Nbr of samples: 2 -- every 0 secs").count(), 2);
}

#[test]
fn test_zero_samples_is_rejected() {
    let td = tempfile::tempdir().unwrap();
    let output = statpulse(td.path())
        .args(["0", "1"])
        .output()
        .expect("run statpulse");
    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("sample count must be at least 1"), "{err}");
}

#[test]
fn test_lone_positional_is_a_usage_error() {
    let td = tempfile::tempdir().unwrap();
    statpulse(td.path()).arg("5").assert().code(2);
}
