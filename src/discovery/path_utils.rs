use std::io;
use std::path::{Path, PathBuf};

/// Turn one line of the path list into an absolute path.
///
/// Returns `Ok(None)` for blank lines. A trailing carriage return is
/// dropped so lists produced on Windows work too. Relative paths are
/// joined onto the current working directory; symlinks are left alone.
pub fn absolute_path(line: &str) -> io::Result<Option<PathBuf>> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    std::path::absolute(Path::new(trimmed)).map(Some)
}
