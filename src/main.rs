use anyhow::Context;
use tracing_subscriber::EnvFilter;

use gradedesk::config;
use gradedesk::db::Store;
use gradedesk::ui;

fn main() -> anyhow::Result<()> {
    let config = config::load()?;
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("create data directory {}", config.data_dir.display()))?;

    // The terminal belongs to the TUI; logs go to a file in the data dir.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())
        .with_context(|| format!("open log file {}", config.log_path().display()))?;
    let filter =
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    tracing::info!(data_dir = %config.data_dir.display(), "starting gradedesk");
    let store = Store::new(&config);
    ui::run(config, store)
}
