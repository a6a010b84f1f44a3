// sparkify-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SparkifyError {
    // --- DOMAIN (records, joins, load contract) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (IO, YAML, DuckDB) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

// Manual implementations so `?` works on raw io / duckdb calls
impl From<std::io::Error> for SparkifyError {
    fn from(err: std::io::Error) -> Self {
        SparkifyError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for SparkifyError {
    fn from(err: duckdb::Error) -> Self {
        SparkifyError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(err)))
    }
}
