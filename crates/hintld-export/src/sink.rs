//! Output file with atomic tmp→rename

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use hintld_core::tmp_path_for;

/// Buffered writer to `<path>.tmp`, renamed to `<path>` on `finalize`.
///
/// Dropping without finalizing removes the tmp file, so an aborted run
/// never leaves a truncated document behind.
pub struct AtomicFile {
    writer: Option<BufWriter<File>>,
    tmp_path: PathBuf,
    final_path: PathBuf,
}

impl std::fmt::Debug for AtomicFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomicFile")
            .field("final_path", &self.final_path)
            .finish_non_exhaustive()
    }
}

impl AtomicFile {
    pub fn create(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = tmp_path_for(path);

        // Clean up stale tmp file
        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }

        let file = File::create(&tmp_path)?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            tmp_path,
            final_path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.final_path
    }

    /// Flush and atomically rename tmp → final.
    ///
    /// On failure the tmp file is removed.
    pub fn finalize(mut self) -> io::Result<PathBuf> {
        let result = self.commit();
        if result.is_err() {
            self.remove_tmp();
        }
        result.map(|()| self.final_path.clone())
    }

    fn commit(&mut self) -> io::Result<()> {
        if let Some(writer) = self.writer.take() {
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }
        fs::rename(&self.tmp_path, &self.final_path)
    }

    fn remove_tmp(&self) {
        if let Err(e) = fs::remove_file(&self.tmp_path) {
            log::warn!("Failed to remove {}: {e}", self.tmp_path.display());
        } else {
            log::debug!("Removed incomplete {}", self.tmp_path.display());
        }
    }

    fn writer(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::other("output already finalized"))
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        if self.writer.take().is_some() {
            self.remove_tmp();
        }
    }
}
