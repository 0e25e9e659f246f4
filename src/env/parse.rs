//! Dotenv-style line parsing
//!
//! One `KEY=VALUE` pair per line. Blank lines and `#` comments are ignored,
//! a leading `export ` on the key is dropped, and one layer of matching
//! surrounding quotes is stripped from the value. A line with no `=` is
//! skipped without failing the rest of the file.

use std::fs;
use std::path::{Path, PathBuf};

/// A parsed override file: its path plus the pairs in file order.
#[derive(Debug, Clone)]
pub struct EnvFile {
    pub path: PathBuf,
    pub entries: Vec<(String, String)>,
}

/// Read and parse one override file. An unreadable file is not an error;
/// it is skipped with a debug log and `None` is returned.
pub fn parse_env_file(path: &Path) -> Option<EnvFile> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::debug!("skipping unreadable override file {}: {}", path.display(), err);
            return None;
        }
    };

    let entries = content.lines().filter_map(parse_line).collect();
    Some(EnvFile { path: path.to_path_buf(), entries })
}

/// Parse a single line into a key/value pair, or `None` for blanks,
/// comments, and lines without a separator.
pub(crate) fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let key = key.strip_prefix("export ").map(str::trim).unwrap_or(key);
    if key.is_empty() {
        return None;
    }

    Some((key.to_string(), unquote(value.trim()).to_string()))
}

/// Strip one layer of matching surrounding single or double quotes.
fn unquote(value: &str) -> &str {
    if value.len() >= 2 {
        let bytes = value.as_bytes();
        let (first, last) = (bytes[0], bytes[value.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
