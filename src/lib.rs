//! mzsweep - Fast unused asset detection for RPG Maker MZ projects
//!
//! This library scans a deployed (staged) RPG Maker MZ project directory and
//! determines which files are reachable from the project's entry points and
//! which are not. Unreached files are reported, and optionally deleted, as
//! unused assets.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **Project Index** - Walk the tree once and classify every file
//! 2. **Seeding** - Root files and code files enter the used set
//! 3. **Domain Resolvers** - Plugin manifest, animation and tileset joins
//! 4. **Reference Sweep** - Substring-match code files against candidates
//! 5. **Container Resolution** - Carve image names out of effect containers
//! 6. **Reporting** - Output the used/unused partition and its provenance

pub mod analysis;
pub mod config;
pub mod content;
pub mod discovery;
pub mod effekseer;
pub mod matcher;
pub mod report;
pub mod resolvers;
pub mod sweep;

pub use analysis::{Analysis, Analyzer, Progress, Provenance, UniverseSets};
pub use config::Config;
pub use content::DataCache;
pub use discovery::{FileKind, FileRecord, ProjectIndex};
pub use effekseer::ContainerExtractor;
pub use report::{GroupBy, ReportFormat, Reporter};
pub use sweep::AssetDeleter;
