// sparkify-core/src/domain/ports/source.rs

use crate::domain::error::DomainError;
use std::path::PathBuf;

/// Raw bytes of one file matched by a pattern. Decoding is left to the
/// collector so that invalid text falls under the malformed-record policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub content: Vec<u8>,
}

/// "Read records from a path pattern".
///
/// Implementations return every document matching `pattern`, sorted by path
/// so that concatenation order is deterministic. No match is an empty vector,
/// not an error.
pub trait RecordSource: Send + Sync {
    fn read_files(&self, pattern: &str) -> Result<Vec<SourceDocument>, DomainError>;
}
