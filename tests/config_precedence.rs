use std::env;
use std::path::PathBuf;

use gradedesk::config;
use tempfile::TempDir;

// Environment variables are process-global, so the whole precedence chain
// lives in one test to avoid races with parallel test threads.
#[test]
fn config_precedence_defaults_then_file_then_env() {
    env::remove_var("GRADEDESK_CONFIG");
    env::remove_var("GRADEDESK_DATA_DIR");
    env::remove_var("GRADEDESK_LOG");

    // Point at a file that does not exist so defaults apply even when the
    // working directory happens to contain a gradedesk.toml.
    env::set_var("GRADEDESK_CONFIG", "/nonexistent/gradedesk.toml");
    let cfg = config::load().expect("defaults");
    assert_eq!(cfg.data_dir, PathBuf::from("gradedesk-data"));
    assert_eq!(cfg.log_filter, "info");

    let dir = TempDir::new().expect("temp dir");
    let file = dir.path().join("gradedesk.toml");
    std::fs::write(&file, "data_dir = \"/tmp/gradedesk-file\"\nlog_filter = \"debug\"\n")
        .expect("write config");
    env::set_var("GRADEDESK_CONFIG", &file);

    let cfg = config::load().expect("file config");
    assert_eq!(cfg.data_dir, PathBuf::from("/tmp/gradedesk-file"));
    assert_eq!(cfg.log_filter, "debug");

    env::set_var("GRADEDESK_DATA_DIR", dir.path());
    env::set_var("GRADEDESK_LOG", "gradedesk=trace");

    let cfg = config::load().expect("env overrides");
    assert_eq!(cfg.data_dir, dir.path());
    assert_eq!(cfg.log_filter, "gradedesk=trace");

    env::remove_var("GRADEDESK_CONFIG");
    env::remove_var("GRADEDESK_DATA_DIR");
    env::remove_var("GRADEDESK_LOG");
}

#[test]
fn rejects_unknown_config_keys() {
    let dir = TempDir::new().expect("temp dir");
    let file = dir.path().join("bad.toml");
    std::fs::write(&file, "data_dir = \"x\"\nmystery_knob = 1\n").expect("write config");

    let raw = std::fs::read_to_string(&file).expect("read");
    let parsed: Result<config::Config, _> = toml::from_str(&raw);
    assert!(parsed.is_err());
}
