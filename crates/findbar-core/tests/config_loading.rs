//! Loading command lists from configuration files.

use findbar_core::{ConfigError, FindBarConfig, FindBarSession, MatchOutcome};
use findbar_test_utils::{editor_commands, EDITOR_CONFIG_TOML};
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn toml_file_matches_fixture_definitions() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "findbar.toml", EDITOR_CONFIG_TOML);

    let config = FindBarConfig::load(&path).unwrap();

    assert_eq!(config.commands, editor_commands());
}

#[test]
fn loaded_config_drives_a_session() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "findbar.yaml",
        "placeholder: Go anywhere\ncommands:\n  - token: openFile\n    pattern: open (:fileName)\n",
    );

    let config = FindBarConfig::load(&path).unwrap();
    let catalog = Arc::new(config.build_catalog().unwrap());
    let mut session = FindBarSession::with_placeholder(catalog, config.placeholder.clone());
    assert_eq!(session.placeholder(), "Go anywhere");

    session.set_input_text("open");
    assert!(matches!(session.submit(), MatchOutcome::Prompt { .. }));
}

#[test]
fn duplicate_tokens_fail_at_load() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "dup.json",
        r#"{"commands":[{"token":"a","pattern":"a"},{"token":"a","pattern":"b"}]}"#,
    );

    let err = FindBarConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateToken(token) if token == "a"));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = FindBarConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
