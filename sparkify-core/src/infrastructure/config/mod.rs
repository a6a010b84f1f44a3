pub mod project;

pub use crate::domain::project::{MalformedPolicy, PipelineConfig};
pub use project::{load_pipeline_config, resolve_db_path};
