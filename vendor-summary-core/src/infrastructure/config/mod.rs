// vendor-summary-core/src/infrastructure/config/mod.rs

pub mod project;

pub use project::{CONFIG_FILE_CANDIDATES, load_project_config};
