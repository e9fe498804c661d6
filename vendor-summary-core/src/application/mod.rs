// vendor-summary-core/src/application/mod.rs

pub mod aggregate;
pub mod inspect;
pub mod observer;
pub mod pipeline;
pub mod publish;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI only needs `use vendor_summary_core::application::{run_pipeline, RunObserver, ...}`.

pub use aggregate::Aggregator;
pub use inspect::{TableSnapshot, inspect_table};
pub use observer::{RunObserver, Stage, StageEvent, StageStatus};
pub use pipeline::{RUN_RESULTS_FILE, RunResult, run_pipeline};
pub use publish::Publisher;
