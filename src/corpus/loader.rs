//! Corpus file loading

use super::error::ImportError;
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a UTF-8 corpus file into lines, with line terminators (`\n` or
/// `\r\n`) removed and everything else kept verbatim.
pub fn load_lines(path: &Path) -> Result<Vec<String>, ImportError> {
    let bytes = fs::read(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        ImportError::InvalidUtf8 {
            path: path.to_path_buf(),
            line,
        }
    })?;

    let lines: Vec<String> = text.lines().map(str::to_string).collect();

    info!(
        "Read {} lines from corpus file \"{}\"",
        lines.len(),
        path.display()
    );

    Ok(lines)
}
