// sparkify/src/commands/inspect.rs
//
// USE CASE: Inspect a loaded table (schema + sample rows).

use std::path::Path;

use sparkify_core::application::inspect_table;
use sparkify_core::infrastructure::adapters::duckdb::DuckDBConnector;

use super::preview_table;

pub async fn execute(db_path: String, table: String, limit: usize) -> anyhow::Result<()> {
    if db_path != ":memory:" && !Path::new(&db_path).exists() {
        anyhow::bail!(
            "❌ Database not found at: {}\n👉 Have you run 'sparkify run'?",
            db_path
        );
    }

    let connector = DuckDBConnector::new(&db_path)?;
    let preview = inspect_table(&connector, &table, limit).await?;

    println!("\n🔍 Inspecting Table: '{}'", table);
    for column in &preview.columns {
        let nullable = if column.is_nullable { "" } else { " NOT NULL" };
        println!("   • {} {}{}", column.name, column.data_type, nullable);
    }
    println!("   --- Rows (Limit {}) ---", limit);
    println!("{}", preview_table(&preview));

    Ok(())
}
