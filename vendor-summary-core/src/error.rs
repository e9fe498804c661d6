// vendor-summary-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum SummaryError {
    // --- INPUT RELATIONS (missing, unreadable, unexpected shape) ---
    #[error("Data source error on '{relation}': {reason}")]
    #[diagnostic(
        code(vendor_summary::data_source),
        help("Check that the relation exists in the store and carries the expected columns.")
    )]
    DataSource { relation: String, reason: String },

    // --- ENRICHMENT (coercion, non-finite metrics) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- OUTPUT PERSISTENCE ---
    #[error("Storage write error on '{table}': {source}")]
    #[diagnostic(
        code(vendor_summary::storage_write),
        help("The previous version of the table, if any, was left untouched.")
    )]
    StorageWrite {
        table: String,
        #[source]
        source: Box<SummaryError>,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl SummaryError {
    pub fn data_source(relation: impl Into<String>, reason: impl ToString) -> Self {
        SummaryError::DataSource {
            relation: relation.into(),
            reason: reason.to_string(),
        }
    }

    pub fn storage_write(table: impl Into<String>, source: SummaryError) -> Self {
        SummaryError::StorageWrite {
            table: table.into(),
            source: Box::new(source),
        }
    }

    /// Taxonomy name used in logs and run results.
    pub fn kind(&self) -> &'static str {
        match self {
            SummaryError::DataSource { .. } => "DataSourceError",
            SummaryError::Domain(DomainError::Computation { .. }) => "ComputationError",
            SummaryError::Domain(_) => "DomainError",
            SummaryError::StorageWrite { .. } => "StorageWriteError",
            SummaryError::Infrastructure(_) => "InfrastructureError",
            SummaryError::InternalError(_) => "InternalError",
        }
    }
}

impl From<std::io::Error> for SummaryError {
    fn from(err: std::io::Error) -> Self {
        SummaryError::Infrastructure(InfrastructureError::Io(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_follow_taxonomy() {
        let ds = SummaryError::data_source("sales", "missing");
        assert_eq!(ds.kind(), "DataSourceError");

        let comp = SummaryError::Domain(DomainError::Computation {
            vendor: "1".into(),
            brand: "2".into(),
            reason: "bad volume".into(),
        });
        assert_eq!(comp.kind(), "ComputationError");

        let write = SummaryError::storage_write("t", SummaryError::InternalError("x".into()));
        assert_eq!(write.kind(), "StorageWriteError");
        assert!(write.to_string().contains("'t'"));
    }
}
