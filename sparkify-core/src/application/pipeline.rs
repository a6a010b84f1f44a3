// sparkify-core/src/application/pipeline.rs

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::SparkifyError;
use crate::ports::connector::Connector;

// Application Services
use crate::application::collector::{CollectStats, Collector};
use crate::application::loader::{LoadReport, Loader};
use crate::application::transformer::Transformer;

// Domain
use crate::domain::identity::IdGenerator;
use crate::domain::ports::RecordSource;
use crate::domain::project::PipelineConfig;
use crate::domain::schema::MATCHED_PLAYS_SQL;

// Infrastructure
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

pub const RUN_RESULTS_FILE: &str = "run_results.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub success: bool,
    pub project: String,
    pub finished_at: String,
    pub duration_ms: u64,
    pub collect: CollectStats,
    pub load: LoadReport,
    /// Plays resolving to both a song and an artist row.
    pub matched_plays: u64,
}

/// Collect, transform, load, then record the outcome in
/// `<project_dir>/<target-path>/run_results.json`.
#[instrument(skip_all, fields(project = %config.name))]
pub async fn run_pipeline<S, G>(
    source: &S,
    connector: &dyn Connector,
    config: &PipelineConfig,
    project_dir: &Path,
    ids: &mut G,
) -> Result<RunResult, SparkifyError>
where
    S: RecordSource + ?Sized,
    G: IdGenerator + ?Sized,
{
    let start_time = Instant::now();

    // 1. COLLECT
    info!(logs = %config.log_pattern, songs = %config.song_pattern, "Collecting records");
    let collection = Collector::new(source, config.on_malformed)
        .collect(&config.log_pattern, &config.song_pattern)?;

    // 2. TRANSFORM
    let schema = Transformer::transform(&collection.plays, &collection.catalog, ids);

    // 3. LOAD
    let load = Loader::load(connector, &schema).await?;
    let matched_plays = connector.query_scalar(MATCHED_PLAYS_SQL).await?;
    info!(matched_plays, "Plays matched to the catalog");

    let result = RunResult {
        success: true,
        project: config.name.clone(),
        finished_at: chrono::Utc::now().to_rfc3339(),
        duration_ms: u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX),
        collect: collection.stats,
        load,
        matched_plays,
    };

    // 4. FINALIZE
    let target_dir = project_dir.join(&config.target_path);
    save_json(&target_dir.join(RUN_RESULTS_FILE), &result)?;

    info!("Done in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(result)
}

fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), InfrastructureError> {
    let json = serde_json::to_string_pretty(data)?;
    atomic_write(path, json)
}
