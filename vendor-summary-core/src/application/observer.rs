// vendor-summary-core/src/application/observer.rs

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{Span, debug, error, info, info_span, warn};

use crate::error::SummaryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Aggregate,
    Enrich,
    Publish,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Aggregate => "Creating Vendor Summary Table",
            Stage::Enrich => "Cleaning Data",
            Stage::Publish => "Ingesting Data",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Started,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    pub stage: Stage,
    pub status: StageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Observability context handed to every stage of one run.
///
/// Owns the run span, so every event emitted inside a stage carries the table and engine,
/// and keeps an in-memory record of stage transitions for the run results file.
pub struct RunObserver {
    span: Span,
    events: Vec<StageEvent>,
}

impl RunObserver {
    pub fn new(table: &str, engine: &str) -> Self {
        Self {
            span: info_span!("vendor_summary", table, engine),
            events: Vec::new(),
        }
    }

    /// Runs `work` as `stage`, logging start and completion (or failure).
    pub fn stage<T, F>(&mut self, stage: Stage, work: F) -> Result<T, SummaryError>
    where
        F: FnOnce() -> Result<T, SummaryError>,
    {
        let span = self.span.clone();
        let _entered = span.enter();

        info!("{}.....", stage.label());
        self.record(stage, StageStatus::Started, None, None);

        let start = Instant::now();
        let result = work();
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &result {
            Ok(_) => {
                debug!(?stage, elapsed_ms, "Stage complete");
                self.record(stage, StageStatus::Completed, Some(elapsed_ms), None);
            }
            Err(e) => {
                warn!(?stage, elapsed_ms, kind = e.kind(), "Stage failed");
                self.record(stage, StageStatus::Failed, Some(elapsed_ms), Some(e.to_string()));
            }
        }
        result
    }

    pub fn finish_success(&self, rows_written: u64) {
        let _entered = self.span.enter();
        info!(rows_written, "Completed Successfully.");
    }

    pub fn finish_failure(&self, err: &SummaryError) {
        let _entered = self.span.enter();
        error!(kind = err.kind(), "Error: {}", err);
    }

    pub fn events(&self) -> &[StageEvent] {
        &self.events
    }

    /// Stages that reached `Completed`, in run order.
    pub fn completed_stages(&self) -> Vec<Stage> {
        self.events
            .iter()
            .filter(|e| e.status == StageStatus::Completed)
            .map(|e| e.stage)
            .collect()
    }

    fn record(
        &mut self,
        stage: Stage,
        status: StageStatus,
        elapsed_ms: Option<u64>,
        detail: Option<String>,
    ) {
        self.events.push(StageEvent {
            stage,
            status,
            elapsed_ms,
            detail,
        });
    }
}
