// vendor-summary-core/src/application/inspect.rs

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use crate::domain::compiler::quote_identifier;
use crate::domain::value::Value;
use crate::error::SummaryError;
use crate::ports::connector::Connector;

/// Schema and leading rows of a persisted table.
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub total_rows: u64,
}

pub fn inspect_table(
    connector: &dyn Connector,
    table: &str,
    limit: usize,
) -> Result<TableSnapshot, SummaryError> {
    let columns = connector.fetch_columns(table)?;
    if columns.is_empty() {
        return Err(SummaryError::data_source(
            table,
            "table does not exist (has the pipeline run?)",
        ));
    }

    let quoted = quote_identifier(table);
    let rows = connector.query(&format!("SELECT * FROM {} LIMIT {}", quoted, limit))?;
    let total_rows = connector
        .query(&format!("SELECT COUNT(*) FROM {}", quoted))?
        .first()
        .and_then(|row| row.first())
        .and_then(Value::as_i64)
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(0);

    Ok(TableSnapshot {
        table: table.to_string(),
        columns: columns.into_iter().map(|c| c.name).collect(),
        rows,
        total_rows,
    })
}

impl TableSnapshot {
    pub fn render(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(self.columns.clone());

        for row in &self.rows {
            table.add_row(row.iter().map(ToString::to_string).collect::<Vec<_>>());
        }
        table.to_string()
    }
}
