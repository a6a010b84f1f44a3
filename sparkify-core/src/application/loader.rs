// sparkify-core/src/application/loader.rs

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::schema::STAR_TABLES;
use crate::domain::star::StarSchema;
use crate::error::SparkifyError;
use crate::ports::connector::Connector;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCount {
    pub table: String,
    pub rows: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub engine: String,
    pub tables: Vec<TableCount>,
}

impl LoadReport {
    pub fn rows(&self, table: &str) -> Option<u64> {
        self.tables.iter().find(|t| t.table == table).map(|t| t.rows)
    }
}

pub struct Loader;

impl Loader {
    /// Drops then recreates the five tables. Every run starts from scratch.
    pub fn ddl() -> Vec<String> {
        let drops = STAR_TABLES.iter().map(|t| t.drop_sql());
        let creates = STAR_TABLES.iter().map(|t| t.create_sql());
        drops.chain(creates).collect()
    }

    /// Hands the DDL and every row-set to the connector as one batch, then
    /// checks that each table holds exactly what was sent.
    #[instrument(skip_all, fields(engine = connector.engine_name()))]
    pub async fn load(
        connector: &dyn Connector,
        schema: &StarSchema,
    ) -> Result<LoadReport, SparkifyError> {
        let row_sets = schema.row_sets();
        connector.load_batch(&Self::ddl(), &row_sets).await?;

        let mut tables = Vec::with_capacity(row_sets.len());
        for set in &row_sets {
            let expected = set.len() as u64;
            let actual = connector.query_scalar(&set.table.count_sql()).await?;
            if actual != expected {
                return Err(DomainError::LoadMismatch {
                    table: set.table.name.to_string(),
                    expected,
                    actual,
                }
                .into());
            }
            info!(table = set.table.name, rows = actual, "Table loaded");
            tables.push(TableCount {
                table: set.table.name.to_string(),
                rows: actual,
            });
        }

        Ok(LoadReport {
            engine: connector.engine_name().to_string(),
            tables,
        })
    }
}
