//! Subscriber setup: stderr always, plus an optional append-only log file.

use std::fs::{File, OpenOptions};
use std::path::Path;

use anyhow::Context as _;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::EnvFilter;

/// Builds the level filter: `--verbose` forces debug, otherwise `RUST_LOG`
/// wins over the configured level.
pub(crate) fn build_filter(verbose: bool, configured_level: &str) -> anyhow::Result<EnvFilter> {
    let filter = if verbose {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(configured_level))?
    };
    Ok(filter)
}

/// Opens `path` for appending, creating parent directories as needed.
pub(crate) fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

/// Installs the global subscriber.
///
/// When `log_file` is set, events passing the filter are also written there
/// without ANSI colors. A log file that cannot be opened is reported and
/// skipped; stderr logging still comes up. The returned guard flushes the
/// file writer on drop and must be held for the life of the process.
pub(crate) fn init(
    verbose: bool,
    configured_level: &str,
    log_file: Option<&Path>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = build_filter(verbose, configured_level)?;

    let (file, open_error) = match log_file.map(open_log_file).transpose() {
        Ok(file) => (file, None),
        Err(e) => (None, Some(e)),
    };

    let (file_layer, guard) = match file {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    if let Some(e) = open_error {
        tracing::warn!(error = %format!("{e:#}"), "file logging disabled");
    }

    Ok(guard)
}
