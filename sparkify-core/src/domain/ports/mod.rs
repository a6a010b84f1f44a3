// sparkify-core/src/domain/ports/mod.rs

pub mod source;

pub use source::{RecordSource, SourceDocument};
