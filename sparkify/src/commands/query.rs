// sparkify/src/commands/query.rs
//
// USE CASE: Execute a raw SQL query (ad-hoc).

use sparkify_core::application::{execute_query, preview_query, returns_rows};
use sparkify_core::infrastructure::adapters::duckdb::DuckDBConnector;

use super::preview_table;

pub async fn execute(query: String, db_path: String, limit: usize) -> anyhow::Result<()> {
    let connector = DuckDBConnector::new(&db_path)?;

    if returns_rows(&query) {
        match preview_query(&connector, &query, limit).await {
            Ok(preview) => {
                println!("{}", preview_table(&preview));
                println!("   {} rows shown (limit {})", preview.rows.len(), limit);
            }
            Err(e) => {
                eprintln!("❌ Query failed: {}", e);
                std::process::exit(1);
            }
        }
    } else if let Err(e) = execute_query(&connector, &query).await {
        eprintln!("❌ Query failed: {}", e);
        std::process::exit(1);
    } else {
        println!("✅ Statement executed");
    }

    Ok(())
}
