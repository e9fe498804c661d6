// vendor-summary/src/commands/run.rs
//
// USE CASE: Rebuild the vendor sales summary table.

use anyhow::Context;
use std::path::Path;
use std::time::Instant;

use vendor_summary_core::SummaryError;
use vendor_summary_core::application::{RunObserver, run_pipeline};
use vendor_summary_core::domain::project::SummaryConfig;
use vendor_summary_core::infrastructure::adapters::open_connector;

use crate::cli::StoreArgs;
use crate::commands::resolve_config;
use crate::logging;

pub fn execute(store: StoreArgs, log_path: Option<String>, verbose: bool) -> anyhow::Result<()> {
    println!("⚙️  Loading configuration...");
    let config = resolve_config(&store, log_path)?;

    let log_file = config.log_file(&store.project_dir);
    let subscriber = logging::build_subscriber(&log_file, verbose)?;

    tracing::subscriber::with_default(subscriber, || run_with_store(&store.project_dir, &config))
}

fn run_with_store(project_dir: &Path, config: &SummaryConfig) -> anyhow::Result<()> {
    let start = Instant::now();
    let location = config.database_location(project_dir);
    println!("   Engine: {} @ {}", config.engine, location);

    let mut observer = RunObserver::new(&config.output_table, &config.engine.to_string());

    // Opened once; dropped on every path out of this function.
    let connector = match open_connector(config.engine, &location) {
        Ok(c) => c,
        Err(e) => {
            let err = SummaryError::from(e);
            observer.finish_failure(&err);
            return Err(err).with_context(|| format!("Failed to open {} at {}", config.engine, location));
        }
    };

    let result = run_pipeline(connector.as_ref(), config, project_dir, &mut observer);
    drop(connector);

    match result {
        Ok(run) => {
            println!(
                "\n✨ SUCCESS! {} rows written to '{}' in {:.2?}",
                run.rows_written,
                run.table,
                start.elapsed()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ FAILURE [{}]", e.kind());
            Err(e).context("Vendor summary run failed")
        }
    }
}
