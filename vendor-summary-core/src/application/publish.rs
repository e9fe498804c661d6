// vendor-summary-core/src/application/publish.rs

use tracing::info;

use crate::application::observer::{RunObserver, Stage};
use crate::domain::compiler::is_plain_identifier;
use crate::domain::error::DomainError;
use crate::domain::summary::{VendorSummaryRecord, output_layout};
use crate::domain::value::Value;
use crate::error::SummaryError;
use crate::ports::connector::{ColumnSpec, Connector};

pub struct Publisher;

impl Publisher {
    pub fn publish(
        connector: &dyn Connector,
        table_name: &str,
        records: &[VendorSummaryRecord],
        observer: &mut RunObserver,
    ) -> Result<u64, SummaryError> {
        observer.stage(Stage::Publish, || {
            Self::replace(connector, table_name, records)
        })
    }

    /// Full refresh: the previous table is replaced, never appended to or merged.
    pub fn replace(
        connector: &dyn Connector,
        table_name: &str,
        records: &[VendorSummaryRecord],
    ) -> Result<u64, SummaryError> {
        if !is_plain_identifier(table_name) {
            return Err(SummaryError::storage_write(
                table_name,
                DomainError::InvalidIdentifier(table_name.to_string()).into(),
            ));
        }

        let columns: Vec<ColumnSpec> = output_layout(records)
            .into_iter()
            .map(|(name, sql_type)| ColumnSpec::new(name, sql_type))
            .collect();
        let rows: Vec<Vec<Value>> = records
            .iter()
            .map(|record| {
                record
                    .to_values()
                    .into_iter()
                    .zip(&columns)
                    .map(|(value, column)| value.conform_to(column.sql_type))
                    .collect()
            })
            .collect();

        let written = connector
            .replace_table(table_name, &columns, &rows)
            .map_err(|e| SummaryError::storage_write(table_name, e))?;

        info!(table = table_name, rows = written, "Summary table replaced");
        Ok(written)
    }
}
