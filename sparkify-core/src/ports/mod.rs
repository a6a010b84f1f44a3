// sparkify-core/src/ports/mod.rs

pub mod connector;

pub use connector::{ColumnSchema, Connector};
