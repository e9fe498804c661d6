// vendor-summary-core/src/ports/connector.rs

// What the pipeline needs from a relational store, without knowing which engine answers.

use crate::domain::value::{SqlType, Value};
use crate::error::SummaryError;

/// Column as reported by the store's catalog.
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

/// Column declared when (re)creating a table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub sql_type: SqlType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
        }
    }
}

pub trait Connector: Send + Sync {
    fn engine_name(&self) -> &str;

    fn execute(&self, query: &str) -> Result<(), SummaryError>;

    /// Empty when the relation does not exist.
    fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, SummaryError>;

    fn query(&self, query: &str) -> Result<Vec<Vec<Value>>, SummaryError>;

    /// Drops, recreates and fills `table_name` in a single transaction.
    /// On failure nothing is committed and any previous table survives.
    fn replace_table(
        &self,
        table_name: &str,
        columns: &[ColumnSpec],
        rows: &[Vec<Value>],
    ) -> Result<u64, SummaryError>;
}
