//! Filesystem utilities for code generation

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write content to a file, creating parent directories if needed.
///
/// An existing file is truncated.
pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, contents)
}

/// Output path for a generated resource: `<dir>/<resource_name>.<extension>`
pub fn resource_path(dir: &Path, resource_name: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}.{}", resource_name, extension.trim_start_matches('.')))
}
