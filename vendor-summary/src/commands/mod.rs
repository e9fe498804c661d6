// vendor-summary/src/commands/mod.rs

pub mod inspect;
pub mod run;

use anyhow::Context;
use vendor_summary_core::domain::project::SummaryConfig;
use vendor_summary_core::infrastructure::config::project::{load_project_config, validate_config};

use crate::cli::StoreArgs;

/// Defaults <- vendor_summary.yaml <- VENDOR_SUMMARY_* <- command line.
pub(crate) fn resolve_config(
    store: &StoreArgs,
    log_path: Option<String>,
) -> anyhow::Result<SummaryConfig> {
    let mut config = load_project_config(&store.project_dir).with_context(|| {
        format!(
            "Failed to load configuration from {:?}",
            store.project_dir
        )
    })?;
    config.apply(&store.overrides(log_path));
    validate_config(&config)?;
    Ok(config)
}
