// sparkify-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::types::{ToSql, ToSqlOutput, Value};
use duckdb::{Config, Connection, params_from_iter};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

// Imports Hexagonaux
use crate::domain::schema::{Cell, RowSet};
use crate::error::SparkifyError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::connector::{ColumnSchema, Connector};

pub struct DuckDBConnector {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBConnector {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SparkifyError> {
        self.conn
            .lock()
            .map_err(|_| InfrastructureError::Database(DatabaseError::Poisoned).into())
    }
}

impl ToSql for Cell {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        let value = match self {
            Cell::Null => Value::Null,
            Cell::Integer(v) => Value::BigInt(*v),
            Cell::Decimal(v) => Value::Double(*v),
            Cell::Text(v) => Value::Text(v.clone()),
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

fn render(value: Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Text(s) => s,
        Value::BigInt(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Double(v) => v.to_string(),
        Value::Decimal(v) => v.to_string(),
        other => format!("{:?}", other),
    }
}

fn insert_rows(conn: &Connection, set: &RowSet) -> Result<(), SparkifyError> {
    let mut stmt = conn.prepare(&set.table.insert_sql())?;
    for row in &set.rows {
        stmt.execute(params_from_iter(row.iter()))?;
    }
    debug!(table = set.table.name, rows = set.len(), "Inserted rows");
    Ok(())
}

#[async_trait]
impl Connector for DuckDBConnector {
    async fn execute(&self, query: &str) -> Result<(), SparkifyError> {
        let conn = self.lock()?;
        conn.execute_batch(query)?;
        Ok(())
    }

    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, SparkifyError> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(&format!(
            "PRAGMA table_info('{}')",
            table_name.replace('\'', "''")
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok(ColumnSchema {
                name: row.get("name")?,
                data_type: row.get("type")?,
                is_nullable: !row.get::<_, bool>("notnull")?,
            })
        })?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row?);
        }

        Ok(columns)
    }

    async fn fetch_rows(
        &self,
        query: &str,
        width: usize,
    ) -> Result<Vec<Vec<String>>, SparkifyError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query)?;
        let mut rows = stmt.query([])?;

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                values.push(render(row.get::<_, Value>(i)?));
            }
            out.push(values);
        }
        Ok(out)
    }

    async fn query_scalar(&self, query: &str) -> Result<u64, SparkifyError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query)?;
        let mut rows = stmt.query([])?;

        let row = rows
            .next()?
            .ok_or_else(|| SparkifyError::InternalError("No scalar value returned".into()))?;

        let value: i64 = row.get(0)?;
        u64::try_from(value)
            .map_err(|_| SparkifyError::InternalError(format!("Negative count returned: {value}")))
    }

    async fn load_batch(
        &self,
        statements: &[String],
        row_sets: &[RowSet],
    ) -> Result<(), SparkifyError> {
        let mut conn = self.lock()?;
        // Rolled back on drop if anything below fails
        let tx = conn.transaction()?;

        for statement in statements {
            tx.execute_batch(statement)?;
        }
        for set in row_sets {
            insert_rows(&tx, set)?;
        }

        tx.commit()?;
        info!(
            statements = statements.len(),
            tables = row_sets.len(),
            "DuckDB batch committed"
        );
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}
