use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;

/// Read a file permissively for substring search.
///
/// Raw bytes are read, embedded NUL bytes are stripped (some script files in
/// deployed projects carry binary taint), and the rest is decoded as Latin-1
/// so that decoding can never fail on malformed sequences. Exact character
/// fidelity does not matter here; the result feeds heuristic matching, not
/// display.
pub fn read_text(path: &str) -> Result<String> {
    let raw = fs::read(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path))?;
    Ok(decode_latin1(&raw))
}

fn decode_latin1(raw: &[u8]) -> String {
    raw.iter()
        .filter(|&&b| b != 0x00)
        .map(|&b| b as char)
        .collect()
}
