//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::Result;

/// Initialize the logging subsystem
///
/// The TUI owns the terminal, so logs go to a daily file under the platform
/// data directory. Level is controlled by the `DEX_LOG` environment variable,
/// e.g. `DEX_LOG=debug dex-explorer`.
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "dex-explorer.log");

    let env_filter = EnvFilter::try_from_env("DEX_LOG")
        .unwrap_or_else(|_| EnvFilter::new("dex_explorer=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("dex-explorer {} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(())
}

fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("dev", "dex-explorer", "dex-explorer")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
