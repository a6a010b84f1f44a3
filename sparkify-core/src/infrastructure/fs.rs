// sparkify-core/src/infrastructure/fs.rs

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::domain::error::DomainError;
use crate::domain::ports::{RecordSource, SourceDocument};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::pattern::GlobPattern;

/// Write content to a file atomically using a temporary file in the same
/// directory, then persisting (renaming) it over the target.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Reads newline-delimited record files below a root directory.
#[derive(Debug, Clone)]
pub struct FsRecordSource {
    root: PathBuf,
}

impl FsRecordSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Paths (sorted) under the root matching `pattern`. Absolute patterns
    /// are resolved from the filesystem root instead.
    pub fn matching_paths(&self, pattern: &str) -> Result<Vec<PathBuf>, InfrastructureError> {
        let (root, relative) = match pattern.strip_prefix('/') {
            Some(stripped) => (PathBuf::from("/"), stripped),
            None => (self.root.clone(), pattern),
        };
        let glob = GlobPattern::compile(relative)?;

        let start = root.join(glob.base_dir());
        if !start.is_dir() {
            debug!(pattern, dir = ?start, "Pattern base directory does not exist");
            return Ok(Vec::new());
        }

        let mut matches: Vec<(String, PathBuf)> = Vec::new();
        for entry in WalkDir::new(&start).follow_links(true) {
            let entry = entry.map_err(|e| InfrastructureError::Io(std::io::Error::other(e)))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&root) else {
                continue;
            };
            let rel = slash_path(rel);
            if glob.is_match(&rel) {
                matches.push((rel, entry.into_path()));
            }
        }

        matches.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(matches.into_iter().map(|(_, path)| path).collect())
    }
}

impl RecordSource for FsRecordSource {
    fn read_files(&self, pattern: &str) -> Result<Vec<SourceDocument>, DomainError> {
        let paths = self
            .matching_paths(pattern)
            .map_err(|e| DomainError::SourceUnavailable {
                path: pattern.to_string(),
                message: e.to_string(),
            })?;
        debug!(pattern, files = paths.len(), "Resolved pattern");

        paths
            .into_iter()
            .map(|path| {
                let content = fs::read(&path).map_err(|e| DomainError::SourceUnavailable {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                Ok(SourceDocument { path, content })
            })
            .collect()
    }
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
