// sparkify-core/src/application/mod.rs

pub mod collector;
pub mod engine;
pub mod loader;
pub mod pipeline;
pub mod transformer;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI fait `use sparkify_core::application::{run_pipeline, Loader};`
// sans connaître la structure interne des fichiers.

pub use collector::{CollectStats, Collection, Collector};
pub use engine::{QueryPreview, execute_query, inspect_table, preview_query, returns_rows};
pub use loader::{LoadReport, Loader, TableCount};
pub use pipeline::{RUN_RESULTS_FILE, RunResult, run_pipeline};
pub use transformer::Transformer;
