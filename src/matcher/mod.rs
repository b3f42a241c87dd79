//! Kind-specific reference matching
//!
//! Decides whether a source file references a target file. For effect
//! containers the decision is membership of the target's base filename in the
//! carved name set. For everything else it is the union of four cheap
//! substring tests covering the reference styles seen in MZ projects: quoted
//! identifiers, path fragments, and Windows-style trailing separators. The
//! union trades some false positives for full coverage without a real parser.

use crate::discovery::{file_name, file_stem};
use std::collections::BTreeSet;

/// The content of one source file, prepared for matching
#[derive(Debug)]
pub struct SourceText<'a> {
    /// Normalized path of the source file
    pub path: &'a str,

    /// Permissively decoded text content
    pub text: &'a str,

    /// Carved image names, present only for container sources
    pub container_names: Option<&'a BTreeSet<String>>,
}

/// Pure predicate: does this source reference the target path?
pub fn references(source: &SourceText<'_>, target: &str) -> bool {
    let base = file_name(target);

    if let Some(names) = source.container_names {
        // Containers only ever reference images
        if !base.to_ascii_lowercase().ends_with(".png") {
            return false;
        }
        return names.contains(base);
    }

    let stem = file_stem(base);
    let quoted = format!("\"{}\"", stem);
    let subdir = format!("/{}", stem);
    let backslashed = format!("{}\\", stem);

    source.text.contains(&quoted)
        || source.text.contains(&subdir)
        || source.text.contains(&backslashed)
        || source.text.contains(base)
}
