// vendor-summary-core/src/infrastructure/adapters/duckdb.rs

use duckdb::types::{ToSqlOutput, ValueRef};
use duckdb::{Config, Connection, ToSql};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::domain::project::configuration::IN_MEMORY;
use crate::domain::value::Value;
use crate::error::SummaryError;
use crate::infrastructure::adapters::{create_table_sql, drop_table_sql, insert_sql};
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::connector::{ColumnSchema, ColumnSpec, Connector};

pub struct DuckDBConnector {
    conn: Mutex<Connection>,
    location: String,
}

impl DuckDBConnector {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == IN_MEMORY {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };
        debug!(engine = "duckdb", location = db_path, "Connection opened");

        Ok(Self {
            conn: Mutex::new(conn),
            location: db_path.to_string(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SummaryError> {
        self.conn
            .lock()
            .map_err(|_| DatabaseError::Poisoned("duckdb").into())
    }
}

impl Drop for DuckDBConnector {
    fn drop(&mut self) {
        debug!(engine = "duckdb", location = %self.location, "Connection released");
    }
}

impl Connector for DuckDBConnector {
    fn engine_name(&self) -> &str {
        "duckdb"
    }

    fn execute(&self, query: &str) -> Result<(), SummaryError> {
        let conn = self.lock()?;
        conn.execute_batch(query)?;
        Ok(())
    }

    fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, SummaryError> {
        let conn = self.lock()?;

        // information_schema instead of PRAGMA table_info: a missing table yields no rows, not an error.
        let mut stmt = conn.prepare(
            "SELECT column_name, data_type, is_nullable
             FROM information_schema.columns
             WHERE lower(table_name) = lower(CAST(? AS VARCHAR))
             ORDER BY ordinal_position",
        )?;

        let rows = stmt.query_map([table_name], |row| {
            Ok(ColumnSchema {
                name: row.get(0)?,
                data_type: row.get(1)?,
                is_nullable: row.get::<_, String>(2)? == "YES",
            })
        })?;

        let columns = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }

    fn query(&self, query: &str) -> Result<Vec<Vec<Value>>, SummaryError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query)?;

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            // Result width is only known once the statement has run.
            let width = row.as_ref().column_count();
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                cells.push(from_duckdb(row.get_ref(i)?)?);
            }
            out.push(cells);
        }
        Ok(out)
    }

    fn replace_table(
        &self,
        table_name: &str,
        columns: &[ColumnSpec],
        rows: &[Vec<Value>],
    ) -> Result<u64, SummaryError> {
        if let Some(bad) = rows.iter().find(|r| r.len() != columns.len()) {
            return Err(SummaryError::InternalError(format!(
                "Row has {} cells, table '{}' has {} columns",
                bad.len(),
                table_name,
                columns.len()
            )));
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute_batch(&drop_table_sql(table_name))?;
        tx.execute_batch(&create_table_sql(table_name, columns))?;
        {
            let mut stmt = tx.prepare(&insert_sql(table_name, columns.len()))?;
            for row in rows {
                stmt.execute(duckdb::params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;

        Ok(rows.len() as u64)
    }
}

fn from_duckdb(value: ValueRef<'_>) -> Result<Value, SummaryError> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Boolean(b) => Value::Integer(i64::from(b)),
        ValueRef::TinyInt(i) => Value::Integer(i64::from(i)),
        ValueRef::SmallInt(i) => Value::Integer(i64::from(i)),
        ValueRef::Int(i) => Value::Integer(i64::from(i)),
        ValueRef::BigInt(i) => Value::Integer(i),
        ValueRef::HugeInt(i) => Value::Integer(i64::try_from(i).map_err(|_| out_of_range(i))?),
        ValueRef::UTinyInt(u) => Value::Integer(i64::from(u)),
        ValueRef::USmallInt(u) => Value::Integer(i64::from(u)),
        ValueRef::UInt(u) => Value::Integer(i64::from(u)),
        ValueRef::UBigInt(u) => Value::Integer(i64::try_from(u).map_err(|_| out_of_range(u))?),
        ValueRef::Float(f) => Value::Real(f64::from(f)),
        ValueRef::Double(f) => Value::Real(f),
        ValueRef::Decimal(d) => d
            .to_string()
            .parse::<f64>()
            .map(Value::Real)
            .map_err(|e| SummaryError::InternalError(format!("Decimal {}: {}", d, e)))?,
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        other => {
            return Err(SummaryError::InternalError(format!(
                "Unsupported DuckDB value: {:?}",
                other
            )));
        }
    })
}

fn out_of_range(value: impl std::fmt::Display) -> SummaryError {
    SummaryError::InternalError(format!("Integer {} does not fit in 64 bits", value))
}

impl ToSql for Value {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(duckdb::types::Value::Null),
            Value::Integer(i) => ToSqlOutput::Owned(duckdb::types::Value::BigInt(*i)),
            Value::Real(f) => ToSqlOutput::Owned(duckdb::types::Value::Double(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}
