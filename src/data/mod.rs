//! Match data ingestion
//!
//! Sources that enumerate the raw match records of a tournament.

pub mod directory;

pub use directory::DirectoryLoader;

use crate::{MatchRecord, Result};

/// Trait for anything that can supply a tournament's match records
pub trait MatchSource {
    /// Human-readable description for logs
    fn describe(&self) -> String;

    /// Validate the source and read all of its records, in processing order.
    ///
    /// Fails before returning anything when the source is not a valid
    /// collection of match records.
    fn load(&self) -> Result<Vec<MatchRecord>>;
}

impl MatchSource for Vec<MatchRecord> {
    fn describe(&self) -> String {
        format!("{} in-memory match records", self.len())
    }

    fn load(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.clone())
    }
}
