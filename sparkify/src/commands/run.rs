// sparkify/src/commands/run.rs
//
// USE CASE: Run the ETL.

use std::path::PathBuf;

use anyhow::Context;
use sparkify_core::application::{RUN_RESULTS_FILE, run_pipeline};
use sparkify_core::domain::RandomIds;
use sparkify_core::infrastructure::adapters::duckdb::DuckDBConnector;
use sparkify_core::infrastructure::config::{load_pipeline_config, resolve_db_path};
use sparkify_core::infrastructure::fs::FsRecordSource;

pub async fn execute(project_dir: PathBuf, db_path: Option<String>) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let mut config = load_pipeline_config(&project_dir).with_context(|| {
        format!(
            "Failed to load pipeline configuration from {:?}",
            project_dir
        )
    })?;
    if let Some(path) = db_path {
        config.db_path = path;
    }
    println!("   Project: {}", config.name);

    // B. Instantiate the adapters
    let db_path = resolve_db_path(&project_dir, &config);
    println!("   Engine: DuckDB 🦆 ({})", db_path);
    let connector = DuckDBConnector::new(&db_path)
        .with_context(|| format!("Failed to initialize DuckDB at {}", db_path))?;
    let source = FsRecordSource::new(&project_dir);

    // C. Run the Pipeline (Application Layer)
    let result = run_pipeline(
        &source,
        &connector,
        &config,
        &project_dir,
        &mut RandomIds,
    )
    .await;

    match result {
        Ok(run_res) => {
            println!(
                "   📥 {} events read, {} song plays, {} catalog entries",
                run_res.collect.events_read, run_res.collect.song_plays, run_res.collect.catalog_entries
            );
            if run_res.collect.skipped_files > 0 {
                println!("   ⚠️  {} malformed files skipped", run_res.collect.skipped_files);
            }
            for table in &run_res.load.tables {
                println!("    ✅ Loaded {:<10} {:>8} rows", table.table, table.rows);
            }
            println!("   🎯 {} plays matched to the catalog", run_res.matched_plays);
            println!(
                "   📝 Results written to {}",
                project_dir
                    .join(&config.target_path)
                    .join(RUN_RESULTS_FILE)
                    .display()
            );
            println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
