use crate::config::{layout, Config};
use crate::discovery::{extension, normalize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Errors raised while building the project index.
///
/// These are precondition failures: an unreadable root or a traversal error
/// aborts the index build rather than degrading into a partial universe.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("project root is not a readable directory: {0}")]
    RootUnreadable(PathBuf),
    #[error("failed to walk project tree: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Classification of a file within the project universe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Directly under the project root, assumed always used
    Root,
    /// Script or structured-data file, scanned as a reference source
    Code,
    /// Asset not yet proven reachable
    Candidate,
}

/// A discovered project file.
///
/// The normalized path string is the stable unique key for this file; every
/// other component refers to it by that key and never copies the metadata.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Normalized forward-slash path
    pub path: String,

    /// Classification assigned during indexing
    pub kind: FileKind,
}

/// The file universe of one project, produced by a single traversal
#[derive(Debug)]
pub struct ProjectIndex {
    root: String,
    records: Vec<FileRecord>,
}

impl ProjectIndex {
    /// Walk the project tree once and classify every file.
    ///
    /// Directories whose name matches an exclusion entry are skipped with all
    /// their descendants. Save files are dropped from the universe outright.
    /// The two lookup databases are classified as candidates rather than code,
    /// since scanning them as sources would make every animation and tileset
    /// appear self-referencing.
    pub fn build(root: &Path, config: &Config) -> Result<Self, IndexError> {
        if !root.is_dir() {
            return Err(IndexError::RootUnreadable(root.to_path_buf()));
        }

        let root_key = normalize(root);
        debug!("Indexing project tree at {}", root_key);

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                let keep = !config.exclude_dirs.iter().any(|dir| dir.as_str() == name);
                if !keep {
                    trace!("Excluding directory: {}", entry.path().display());
                }
                keep
            });

        let mut records = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = normalize(entry.path());
            let kind = if entry.depth() == 1 {
                // Top-level files (executable, metadata) are never dead
                FileKind::Root
            } else {
                match Self::classify(&path, &root_key, config) {
                    Some(kind) => kind,
                    None => continue,
                }
            };

            trace!("Indexed {:?}: {}", kind, path);
            records.push(FileRecord { path, kind });
        }

        debug!("Indexed {} files", records.len());
        Ok(Self {
            root: root_key,
            records,
        })
    }

    /// Classify a non-root file, or return None to drop it from the universe
    fn classify(path: &str, root: &str, config: &Config) -> Option<FileKind> {
        let ext = extension(path);
        if ext.as_deref() == Some(config.save_extension.as_str()) {
            // Saves are transient, never assets
            return None;
        }

        if let Some(ext) = ext {
            if config.is_code_extension(&ext) && !Self::is_lookup_database(path, root) {
                return Some(FileKind::Code);
            }
        }

        Some(FileKind::Candidate)
    }

    /// The animation and tileset databases are pure lookup tables
    fn is_lookup_database(path: &str, root: &str) -> bool {
        let animations = format!("{}/{}/{}", root, layout::DATA_DIR, layout::ANIMATIONS_DB);
        let tilesets = format!("{}/{}/{}", root, layout::DATA_DIR, layout::TILESETS_DB);
        path == animations || path == tilesets
    }

    /// Normalized root path this index was built from
    pub fn root(&self) -> &str {
        &self.root
    }

    /// All indexed file records
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter()
    }

    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats::default();
        for record in &self.records {
            match record.kind {
                FileKind::Root => stats.root_files += 1,
                FileKind::Code => stats.code_files += 1,
                FileKind::Candidate => stats.candidates += 1,
            }
        }
        stats
    }
}

/// Statistics about the indexed universe
#[derive(Debug, Default)]
pub struct IndexStats {
    pub root_files: usize,
    pub code_files: usize,
    pub candidates: usize,
}

impl IndexStats {
    pub fn total(&self) -> usize {
        self.root_files + self.code_files + self.candidates
    }
}
