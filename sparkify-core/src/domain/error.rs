// sparkify-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Malformed record in {path} (line {line}): {message}")]
    #[diagnostic(
        code(sparkify::domain::malformed_record),
        help("Every line must be a standalone JSON object. Set `on-malformed: skip_file` to isolate bad files.")
    )]
    MalformedRecord {
        path: String,
        line: usize,
        message: String,
    },

    #[error("Could not read source '{path}': {message}")]
    #[diagnostic(code(sparkify::domain::source_unavailable))]
    SourceUnavailable { path: String, message: String },

    #[error("Table '{table}' holds {actual} rows after load, expected {expected}")]
    #[diagnostic(code(sparkify::domain::load_mismatch))]
    LoadMismatch {
        table: String,
        expected: u64,
        actual: u64,
    },
}
