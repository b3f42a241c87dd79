//! File content access for heuristic matching
//!
//! Two flavors: a permissive raw reader for substring search, and a memoizing
//! cache for structured-data (JSON) files that are consulted repeatedly
//! across resolution phases.

mod cache;
mod reader;

pub use cache::DataCache;
pub use reader::read_text;
