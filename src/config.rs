use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

/// Startup configuration. Passed explicitly to the store; nothing here is a
/// compile-time literal inside the data access layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the database file, the log file and exported snapshots.
    pub data_dir: PathBuf,
    /// Tracing filter directive, e.g. "info" or "gradedesk=debug".
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("gradedesk-data"),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("gradedesk.sqlite3")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("gradedesk.log")
    }
}

/// Load order: built-in defaults, then an optional TOML file
/// (`gradedesk.toml`, or the path in `GRADEDESK_CONFIG`), then environment
/// overrides. A `.env` file is read first so it can supply the variables.
pub fn load() -> anyhow::Result<Config> {
    let _ = dotenvy::dotenv();

    let file = std::env::var_os("GRADEDESK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("gradedesk.toml"));

    let mut cfg = if file.is_file() {
        let raw = std::fs::read_to_string(&file)
            .with_context(|| format!("read config file {}", file.display()))?;
        toml::from_str(&raw).with_context(|| format!("parse config file {}", file.display()))?
    } else {
        Config::default()
    };

    if let Some(dir) = std::env::var_os("GRADEDESK_DATA_DIR") {
        cfg.data_dir = PathBuf::from(dir);
    }
    if let Ok(filter) = std::env::var("GRADEDESK_LOG") {
        cfg.log_filter = filter;
    }

    Ok(cfg)
}
