//! Staging paths for files that are renamed into place when complete

use std::path::{Path, PathBuf};

/// `<path>.tmp` next to `path`.
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
