// sparkify-core/src/application/collector.rs

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::ports::{RecordSource, SourceDocument};
use crate::domain::project::MalformedPolicy;
use crate::domain::records::{CatalogEntry, CatalogKey, EventRecord, JoinedPlay};

/// Output of the collect stage.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub plays: Vec<JoinedPlay>,
    pub catalog: Vec<CatalogEntry>,
    pub stats: CollectStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectStats {
    pub log_files: usize,
    pub song_files: usize,
    pub skipped_files: usize,
    pub events_read: usize,
    pub song_plays: usize,
    pub catalog_entries: usize,
    pub matched_plays: usize,
}

/// Reads both record families and joins them.
pub struct Collector<'a, S: RecordSource + ?Sized> {
    source: &'a S,
    policy: MalformedPolicy,
}

impl<'a, S: RecordSource + ?Sized> Collector<'a, S> {
    pub fn new(source: &'a S, policy: MalformedPolicy) -> Self {
        Self { source, policy }
    }

    #[instrument(skip(self))]
    pub fn collect(&self, log_pattern: &str, song_pattern: &str) -> Result<Collection, DomainError> {
        let mut stats = CollectStats::default();

        let (events, log_files, skipped) = self.read_table::<EventRecord>(log_pattern)?;
        stats.log_files = log_files;
        stats.skipped_files += skipped;
        stats.events_read = events.len();

        let (catalog, song_files, skipped) = self.read_table::<CatalogEntry>(song_pattern)?;
        stats.song_files = song_files;
        stats.skipped_files += skipped;
        stats.catalog_entries = catalog.len();

        let song_plays = keep_song_plays(events);
        stats.song_plays = song_plays.len();

        let plays = left_join(song_plays, &catalog);
        stats.matched_plays = plays.iter().filter(|p| p.song.is_some()).count();

        info!(
            events = stats.events_read,
            song_plays = stats.song_plays,
            catalog = stats.catalog_entries,
            matched = stats.matched_plays,
            "Collected records"
        );

        Ok(Collection {
            plays,
            catalog,
            stats,
        })
    }

    /// Concatenation of every matching file, in path order.
    /// Returns `(records, files_read, files_skipped)`.
    fn read_table<T: DeserializeOwned>(
        &self,
        pattern: &str,
    ) -> Result<(Vec<T>, usize, usize), DomainError> {
        let documents = self.source.read_files(pattern)?;
        if documents.is_empty() {
            warn!(pattern, "No file matches pattern");
        }

        let mut records = Vec::new();
        let mut read = 0;
        let mut skipped = 0;
        for doc in &documents {
            match parse_json_lines::<T>(doc) {
                Ok(mut parsed) => {
                    records.append(&mut parsed);
                    read += 1;
                }
                Err(e) if self.policy == MalformedPolicy::SkipFile => {
                    warn!(error = %e, "Skipping malformed file");
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok((records, read, skipped))
    }
}

/// Parses newline-delimited JSON, ignoring blank lines. Invalid UTF-8 is
/// reported like any other malformed line.
pub fn parse_json_lines<T: DeserializeOwned>(doc: &SourceDocument) -> Result<Vec<T>, DomainError> {
    doc.content
        .split(|b| *b == b'\n')
        .enumerate()
        .filter(|(_, line)| !line.trim_ascii().is_empty())
        .map(|(i, line)| {
            serde_json::from_slice(line).map_err(|e| DomainError::MalformedRecord {
                path: doc.path.display().to_string(),
                line: i + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

pub fn keep_song_plays(events: Vec<EventRecord>) -> Vec<EventRecord> {
    events.into_iter().filter(EventRecord::is_song_play).collect()
}

/// Left join on `(artist, song) = (artist_name, title)`.
///
/// Every event yields at least one row; an event matching several catalog
/// entries yields one row per match, in catalog order.
pub fn left_join(events: Vec<EventRecord>, catalog: &[CatalogEntry]) -> Vec<JoinedPlay> {
    let mut index: HashMap<CatalogKey<'_>, Vec<&CatalogEntry>> = HashMap::new();
    for entry in catalog {
        if let Some(key) = entry.key() {
            index.entry(key).or_default().push(entry);
        }
    }

    let mut joined = Vec::with_capacity(events.len());
    for event in events {
        let matches = event.key().and_then(|k| index.get(&k));
        match matches {
            Some(entries) => {
                for entry in entries {
                    joined.push(JoinedPlay {
                        event: event.clone(),
                        song: Some((*entry).clone()),
                    });
                }
            }
            None => joined.push(JoinedPlay { event, song: None }),
        }
    }
    joined
}
