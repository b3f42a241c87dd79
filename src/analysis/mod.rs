//! Reachability analysis
//!
//! The orchestrator drives a fixed sequence of mark phases over the file
//! universe; the universe sets enforce the used/unused partition and record
//! provenance for every promotion.

mod orchestrator;
mod universe;

pub use orchestrator::{Analysis, Analyzer, Progress};
pub use universe::{Provenance, UniverseSets};
