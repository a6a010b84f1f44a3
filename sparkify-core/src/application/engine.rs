// sparkify-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::domain::schema::quote;
use crate::error::SparkifyError;
use crate::ports::connector::{ColumnSchema, Connector};

const PREVIEW_VIEW: &str = "__sparkify_preview";

/// Columns and first rows of a table or query, rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPreview {
    pub columns: Vec<ColumnSchema>,
    pub rows: Vec<Vec<String>>,
}

/// Exécute une requête SQL brute avec instrumentation (Logs + Timing).
#[instrument(skip(connector), fields(query.len = query.len()))]
pub async fn execute_query(connector: &dyn Connector, query: &str) -> Result<(), SparkifyError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query);

    let result = connector.execute(query).await;
    let duration = start.elapsed();

    match result {
        Ok(_) => {
            debug!("✅ Query finished in {:.2?}", duration);
            Ok(())
        }
        Err(e) => {
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}

/// Schema of `table` plus up to `limit` rows.
#[instrument(skip(connector))]
pub async fn inspect_table(
    connector: &dyn Connector,
    table: &str,
    limit: usize,
) -> Result<QueryPreview, SparkifyError> {
    let columns = connector.fetch_columns(table).await?;
    if columns.is_empty() {
        return Err(SparkifyError::InternalError(format!(
            "Table '{table}' not found"
        )));
    }

    let sql = format!("SELECT * FROM {} LIMIT {limit}", quote(table));
    let rows = connector.fetch_rows(&sql, columns.len()).await?;
    Ok(QueryPreview { columns, rows })
}

/// Runs a row-returning statement through a temporary view so its columns
/// can be described before fetching.
#[instrument(skip(connector), fields(query.len = query.len()))]
pub async fn preview_query(
    connector: &dyn Connector,
    query: &str,
    limit: usize,
) -> Result<QueryPreview, SparkifyError> {
    let body = query.trim().trim_end_matches(';');
    execute_query(
        connector,
        &format!("CREATE OR REPLACE TEMP VIEW {} AS {body}", quote(PREVIEW_VIEW)),
    )
    .await?;

    let preview = inspect_table(connector, PREVIEW_VIEW, limit).await;
    execute_query(connector, &format!("DROP VIEW IF EXISTS {}", quote(PREVIEW_VIEW))).await?;
    preview
}

/// `true` for statements that return rows (`SELECT`, `WITH`, `FROM`, ...).
pub fn returns_rows(query: &str) -> bool {
    let first = query
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase();
    matches!(
        first.as_str(),
        "SELECT" | "WITH" | "FROM" | "VALUES" | "TABLE"
    )
}
