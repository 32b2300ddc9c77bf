use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default log file: `<cache_dir>/kiosk/kiosk-tui.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("kiosk").join("kiosk-tui.log"))
}

/// Install a file-backed subscriber. The terminal is in the alternate screen
/// for the whole run, so nothing is written to stdout.
///
/// The returned guard flushes pending lines on drop and must outlive the UI.
pub fn init(path: &Path) -> anyhow::Result<WorkerGuard> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "kiosk-tui.log".into());

    let filter = std::env::var("KIOSK_LOG").unwrap_or_else(|_| "info".to_string());
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(EnvFilter::new(filter))
        .try_init()?;

    Ok(guard)
}
