// vendor-summary-core/src/infrastructure/adapters/sqlite.rs

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, ToSql};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::domain::project::configuration::IN_MEMORY;
use crate::domain::value::Value;
use crate::error::SummaryError;
use crate::infrastructure::adapters::{create_table_sql, drop_table_sql, insert_sql};
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::connector::{ColumnSchema, ColumnSpec, Connector};

pub struct SqliteConnector {
    conn: Mutex<Connection>,
    location: String,
}

impl SqliteConnector {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let conn = if db_path == IN_MEMORY {
            Connection::open_in_memory()?
        } else {
            Connection::open(db_path)?
        };
        debug!(engine = "sqlite", location = db_path, "Connection opened");

        Ok(Self {
            conn: Mutex::new(conn),
            location: db_path.to_string(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SummaryError> {
        self.conn
            .lock()
            .map_err(|_| DatabaseError::Poisoned("sqlite").into())
    }
}

impl Drop for SqliteConnector {
    fn drop(&mut self) {
        debug!(engine = "sqlite", location = %self.location, "Connection released");
    }
}

impl Connector for SqliteConnector {
    fn engine_name(&self) -> &str {
        "sqlite"
    }

    fn execute(&self, query: &str) -> Result<(), SummaryError> {
        let conn = self.lock()?;
        conn.execute_batch(query)?;
        Ok(())
    }

    fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, SummaryError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT name, type, \"notnull\" FROM pragma_table_info(?1)")?;

        let rows = stmt.query_map([table_name], |row| {
            Ok(ColumnSchema {
                name: row.get(0)?,
                data_type: row.get(1)?,
                is_nullable: row.get::<_, i64>(2)? == 0,
            })
        })?;

        let columns = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }

    fn query(&self, query: &str) -> Result<Vec<Vec<Value>>, SummaryError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query)?;
        let width = stmt.column_count();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                cells.push(from_sqlite(row.get_ref(i)?));
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
        // Rolled back on drop unless committed.
        let tx = conn.transaction()?;
        tx.execute_batch(&drop_table_sql(table_name))?;
        tx.execute_batch(&create_table_sql(table_name, columns))?;
        {
            let mut stmt = tx.prepare(&insert_sql(table_name, columns.len()))?;
            for row in rows {
                stmt.execute(rusqlite::params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;

        Ok(rows.len() as u64)
    }
}

fn from_sqlite(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::Text(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Integer(i) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*i)),
            Value::Real(f) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}
