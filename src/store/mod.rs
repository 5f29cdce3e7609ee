//! Storage module
//!
//! Pipe-delimited flat files, read and rewritten wholesale.

pub mod flat_file;
pub mod record;

pub use flat_file::{DataStore, Files, Outcome, StoreError, StoreResult};
pub use record::{join_line, split_line, LineRecord};
