use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Application directory, `~/.climate-viz/`.
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".climate-viz")
}

/// Ensure `~/.climate-viz/` and `~/.climate-viz/logs/` exist.
pub fn ensure_directories() -> anyhow::Result<()> {
    ensure_directories_in(&app_dir())
}

/// Create `base` and its `logs/` subdirectory, including missing parents.
pub fn ensure_directories_in(base: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(base)?;
    std::fs::create_dir_all(base.join("logs"))?;
    Ok(())
}

/// Log file used when the TUI owns the terminal and none was given.
pub fn default_log_file() -> PathBuf {
    app_dir().join("logs").join("climate-viz.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `DEBUG|INFO|WARNING|ERROR|CRITICAL` level name to a filter
/// directive. Unknown names pass through unchanged.
pub fn filter_directive(log_level: &str) -> String {
    let upper = log_level.to_uppercase();
    match upper.as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Events go to `log_file` (appended, no ANSI colours) when given, and to
/// stderr when `to_stderr` is set. The TUI passes `to_stderr = false` so log
/// lines never land on the alternate screen.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>, to_stderr: bool) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
