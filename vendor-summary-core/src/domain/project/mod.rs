// vendor-summary-core/src/domain/project/mod.rs

pub mod configuration;

pub use configuration::{ConfigOverrides, Engine, RelationNames, SummaryConfig};
