mod project_index;

pub use project_index::{FileKind, FileRecord, IndexError, IndexStats, ProjectIndex};

use std::path::Path;

/// Normalize a path into the forward-slash string form used as the file key
/// everywhere in the engine.
pub fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// The base filename of a normalized path key.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// The extension-stripped stem of a base filename.
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// The lowercase extension of a normalized path key, if any.
pub fn extension(path: &str) -> Option<String> {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(name[idx + 1..].to_ascii_lowercase()),
    }
}
