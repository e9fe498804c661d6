// vendor-summary-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

use crate::error::SummaryError;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(vendor_summary::infra::database::duckdb),
        help("An error occurred inside the SQL engine.")
    )]
    DuckDB(#[from] duckdb::Error),

    #[error("SQLite Engine Error: {0}")]
    #[diagnostic(
        code(vendor_summary::infra::database::sqlite),
        help("An error occurred inside the SQL engine.")
    )]
    Sqlite(#[from] rusqlite::Error),

    #[error("Connection lock poisoned ({0})")]
    #[diagnostic(code(vendor_summary::infra::database::poisoned))]
    Poisoned(&'static str),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(vendor_summary::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(vendor_summary::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(vendor_summary::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(vendor_summary::infra::config))]
    ConfigError(String),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(vendor_summary::infra::template),
        help("Check the Jinja syntax of the aggregation SQL.")
    )]
    TemplateError(#[from] minijinja::Error),
}

// Shortcuts so `?` works directly on engine calls.
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}

impl From<rusqlite::Error> for InfrastructureError {
    fn from(err: rusqlite::Error) -> Self {
        InfrastructureError::Database(DatabaseError::Sqlite(err))
    }
}

impl From<duckdb::Error> for SummaryError {
    fn from(err: duckdb::Error) -> Self {
        SummaryError::Infrastructure(err.into())
    }
}

impl From<rusqlite::Error> for SummaryError {
    fn from(err: rusqlite::Error) -> Self {
        SummaryError::Infrastructure(err.into())
    }
}

impl From<DatabaseError> for SummaryError {
    fn from(err: DatabaseError) -> Self {
        SummaryError::Infrastructure(InfrastructureError::Database(err))
    }
}
