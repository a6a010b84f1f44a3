pub mod calendar;
pub mod error;
pub mod identity;
pub mod ports;
pub mod project;
pub mod records;
pub mod schema;
pub mod star;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use identity::{IdGenerator, RandomIds, SequenceIds};
pub use records::{CatalogEntry, EventRecord, JoinedPlay};
pub use star::{ArtistDim, SongDim, SongPlay, StarSchema, TimeDim, UserDim};
