// vendor-summary/src/commands/inspect.rs
//
// USE CASE: Inspect the summary table (schema + sample rows).

use std::path::Path;

use vendor_summary_core::application::inspect_table;
use vendor_summary_core::domain::project::configuration::IN_MEMORY;
use vendor_summary_core::infrastructure::adapters::open_connector;

use crate::cli::StoreArgs;
use crate::commands::resolve_config;

pub fn execute(store: StoreArgs, limit: usize) -> anyhow::Result<()> {
    let config = resolve_config(&store, None)?;
    let location = config.database_location(&store.project_dir);

    if location != IN_MEMORY && !Path::new(&location).exists() {
        anyhow::bail!(
            "❌ Database not found at: {}\n👉 Have you run 'vendor-summary run'?",
            location
        );
    }

    let connector = open_connector(config.engine, &location)?;
    let snapshot = inspect_table(connector.as_ref(), &config.output_table, limit)?;

    println!(
        "\n🔍 Inspecting Table: '{}' ({} rows)",
        snapshot.table, snapshot.total_rows
    );
    println!("{}", snapshot.render());

    Ok(())
}
