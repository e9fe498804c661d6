// vendor-summary-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;
pub mod sqlite;

use crate::domain::compiler::quote_identifier;
use crate::domain::project::Engine;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::{ColumnSpec, Connector};

pub use self::duckdb::DuckDBConnector;
pub use self::sqlite::SqliteConnector;

/// Opens the store once for the whole run. Dropping the box releases it.
pub fn open_connector(
    engine: Engine,
    location: &str,
) -> Result<Box<dyn Connector>, InfrastructureError> {
    Ok(match engine {
        Engine::Sqlite => Box::new(SqliteConnector::new(location)?),
        Engine::DuckDB => Box::new(DuckDBConnector::new(location)?),
    })
}

pub(crate) fn drop_table_sql(table_name: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", quote_identifier(table_name))
}

pub(crate) fn create_table_sql(table_name: &str, columns: &[ColumnSpec]) -> String {
    let defs: Vec<String> = columns
        .iter()
        .map(|c| format!("{} {}", quote_identifier(&c.name), c.sql_type.as_sql()))
        .collect();
    format!(
        "CREATE TABLE {} ({})",
        quote_identifier(table_name),
        defs.join(", ")
    )
}

pub(crate) fn insert_sql(table_name: &str, width: usize) -> String {
    let placeholders = vec!["?"; width].join(", ");
    format!(
        "INSERT INTO {} VALUES ({})",
        quote_identifier(table_name),
        placeholders
    )
}
