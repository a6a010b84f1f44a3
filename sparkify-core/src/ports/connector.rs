// sparkify-core/src/ports/connector.rs

// What the pipeline needs from a relational store, without knowing which one.
// The DuckDB adapter lives in infrastructure/adapters.

use crate::domain::schema::RowSet;
use crate::error::SparkifyError;
use async_trait::async_trait;

// Struct simple pour décrire une colonne (indépendant de la DB)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

#[async_trait]
pub trait Connector: Send + Sync {
    async fn execute(&self, query: &str) -> Result<(), SparkifyError>;

    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, SparkifyError>;

    /// First `width` columns of every row returned by `query`, rendered as text.
    async fn fetch_rows(&self, query: &str, width: usize)
    -> Result<Vec<Vec<String>>, SparkifyError>;

    /// First column of the first row, as a count.
    async fn query_scalar(&self, query: &str) -> Result<u64, SparkifyError>;

    /// Runs `statements` then bulk-inserts every row set as one logical batch.
    /// Nothing is kept when any step fails.
    async fn load_batch(&self, statements: &[String], row_sets: &[RowSet])
    -> Result<(), SparkifyError>;

    fn engine_name(&self) -> &str;
}
