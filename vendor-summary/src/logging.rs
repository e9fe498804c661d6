// vendor-summary/src/logging.rs
//
// Builds the run's subscriber explicitly; the caller scopes it with `with_default`.

use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// File layer: append-only, no ANSI, everything from DEBUG up.
/// Console layer: stderr, warnings only unless `verbose`.
pub fn build_subscriber(
    log_file: &Path,
    verbose: bool,
) -> anyhow::Result<impl Subscriber + Send + Sync + 'static> {
    if let Some(parent) = log_file.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {:?}", log_file))?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_filter(LevelFilter::DEBUG);

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_level);

    Ok(tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_log_file_is_appended() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("logs").join("run.log");

        for message in ["first run", "second run"] {
            let subscriber = build_subscriber(&path, false)?;
            tracing::subscriber::with_default(subscriber, || {
                tracing::info!("{}", message);
            });
        }

        let content = fs::read_to_string(&path)?;
        assert!(content.contains("first run"));
        assert!(content.contains("second run"));
        assert!(content.contains("INFO"));
        Ok(())
    }
}
