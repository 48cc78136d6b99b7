// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn defaults_when_empty() {
    let config = RelayConfig::parse("").unwrap();
    assert_eq!(config.correlation_id, "001");
    assert_eq!(config.stage_command("first"), "true");
    assert_eq!(config.signal_command("notification"), "sleep 1");
    assert_eq!(config.signal_channel("notification"), "001");
    assert_eq!(config.signal_channel("second_notification"), "002");
}

#[test]
fn parses_full_config() {
    let text = r#"
correlation_id = "job-42"

[stage.first]
run = "echo one"

[stage.third]
run = "echo three"

[signal.notification]
run = "sleep 2"
channel = "alpha"

[signal.second_notification]
channel = "beta"
"#;
    let config = RelayConfig::parse(text).unwrap();
    assert_eq!(config.correlation_id, "job-42");
    assert_eq!(config.stage_command("first"), "echo one");
    assert_eq!(config.stage_command("second"), "true");
    assert_eq!(config.stage_command("third"), "echo three");
    assert_eq!(config.signal_command("notification"), "sleep 2");
    assert_eq!(config.signal_channel("notification"), "alpha");
    assert_eq!(config.signal_command("second_notification"), "sleep 1");
    assert_eq!(config.signal_channel("second_notification"), "beta");
}

#[test]
fn rejects_malformed_toml() {
    let err = RelayConfig::parse("correlation_id = [").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relay.toml");
    std::fs::write(&path, "correlation_id = \"from-disk\"\n").unwrap();

    let config = RelayConfig::load(&path).unwrap();
    assert_eq!(config.correlation_id, "from-disk");
}

#[test]
fn load_reports_missing_file() {
    let err = RelayConfig::load(Path::new("/nonexistent/relay.toml")).unwrap_err();
    match err {
        ConfigError::Io { path, .. } => {
            assert_eq!(path, Path::new("/nonexistent/relay.toml"));
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}
