//! Effekseer container string carving
//!
//! The .efkefc effect container format has no published schema, so embedded
//! texture filenames are recovered by carving the raw bytes: runs of
//! printable ASCII, plus runs of printable characters encoded as 16-bit
//! little-endian code units with zero high bytes. Carving over-approximates:
//! a false positive retains one extra file, a false negative would delete an
//! image still in use.

use miette::{IntoDiagnostic, Result, WrapErr};
use regex::bytes::Regex;
use std::collections::BTreeSet;
use std::fs;

/// Extractor for image names embedded in effect containers
pub struct ContainerExtractor {
    ascii: Regex,
    wide: Regex,
}

impl ContainerExtractor {
    pub fn new() -> Self {
        // Printable ASCII runs of at least four characters, and the same
        // range as zero-high-byte UTF-16LE code units
        let ascii = Regex::new(r"(?-u)[ -~]{4,}").unwrap();
        let wide = Regex::new(r"(?-u)(?:[ -~]\x00){4,}").unwrap();
        Self { ascii, wide }
    }

    /// Carve candidate image names out of a container file
    pub fn extract_image_names(&self, path: &str) -> Result<Vec<String>> {
        let data = fs::read(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read container {}", path))?;
        Ok(self.carve(&data))
    }

    /// Carve candidate image names out of raw container bytes.
    ///
    /// Both candidate sets are decoded, merged, deduplicated, sorted, and
    /// filtered to names with the image extension of interest.
    pub fn carve(&self, data: &[u8]) -> Vec<String> {
        let mut names = BTreeSet::new();

        for m in self.ascii.find_iter(data) {
            names.insert(decode_ascii(m.as_bytes()));
        }
        for m in self.wide.find_iter(data) {
            names.insert(decode_utf16le(m.as_bytes()));
        }

        names
            .into_iter()
            .filter(|name| name.to_ascii_lowercase().ends_with(".png"))
            .collect()
    }
}

impl Default for ContainerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_ascii(run: &[u8]) -> String {
    run.iter().map(|&b| b as char).collect()
}

fn decode_utf16le(run: &[u8]) -> String {
    // High bytes are known zero, so the low bytes are the characters
    run.iter().step_by(2).map(|&b| b as char).collect()
}
