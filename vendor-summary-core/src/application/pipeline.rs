// vendor-summary-core/src/application/pipeline.rs

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::application::aggregate::Aggregator;
use crate::application::observer::{RunObserver, Stage, StageEvent};
use crate::application::publish::Publisher;
use crate::domain::project::SummaryConfig;
use crate::domain::summary::Enricher;
use crate::error::SummaryError;
use crate::infrastructure::compiler::SqlTemplates;
use crate::infrastructure::fs::write_json_atomic;
use crate::ports::connector::Connector;

pub const RUN_RESULTS_FILE: &str = "run_results.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct RunResult {
    pub success: bool,
    pub table: String,
    pub engine: String,
    pub rows_written: u64,
    pub errors: Vec<String>,
    pub stages: Vec<StageEvent>,
    pub finished_at: String,
}

/// Aggregate -> Enrich -> Publish against one open connection.
///
/// A failing stage stops the run: nothing downstream executes and the output table is left as it was.
/// The outcome is always written to `<target>/run_results.json` and logged through `observer`.
pub fn run_pipeline(
    connector: &dyn Connector,
    config: &SummaryConfig,
    project_dir: &Path,
    observer: &mut RunObserver,
) -> Result<RunResult, SummaryError> {
    let outcome = execute_stages(connector, config, observer);

    let result = RunResult {
        success: outcome.is_ok(),
        table: config.output_table.clone(),
        engine: connector.engine_name().to_string(),
        rows_written: *outcome.as_ref().unwrap_or(&0),
        errors: outcome
            .as_ref()
            .err()
            .map(|e| vec![format!("{}: {}", e.kind(), e)])
            .unwrap_or_default(),
        stages: observer.events().to_vec(),
        finished_at: chrono::Utc::now().to_rfc3339(),
    };

    let results_path = config.target_dir(project_dir).join(RUN_RESULTS_FILE);
    if let Err(e) = write_json_atomic(&results_path, &result) {
        warn!(path = ?results_path, "Could not write run results: {}", e);
    }

    match outcome {
        Ok(rows) => {
            observer.finish_success(rows);
            Ok(result)
        }
        Err(e) => {
            observer.finish_failure(&e);
            Err(e)
        }
    }
}

fn execute_stages(
    connector: &dyn Connector,
    config: &SummaryConfig,
    observer: &mut RunObserver,
) -> Result<u64, SummaryError> {
    let templates = SqlTemplates::new()?;

    let rows = Aggregator::new(&templates, &config.relations).run(connector, observer)?;

    let enricher = Enricher::new(config.zero_denominator);
    let records = observer.stage(Stage::Enrich, || Ok(enricher.enrich(rows)?))?;

    Publisher::publish(connector, &config.output_table, &records, observer)
}
