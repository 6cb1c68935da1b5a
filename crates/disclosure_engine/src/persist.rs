use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// Permission bits for a newly created output directory.
#[cfg(unix)]
pub(crate) const OUTPUT_DIR_MODE: u32 = 0o755;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(OUTPUT_DIR_MODE);
        }
        builder
            .create(dir)
            .map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Written { path: PathBuf, bytes: u64 },
    /// Another file took the name while streaming; the temp file was discarded.
    AlreadyExists { path: PathBuf },
}

/// Streams a body into a temp file inside `dir`, then moves it to its final name.
///
/// Nothing appears under the final name until [`commit`](Self::commit); a
/// writer dropped before that removes its temp file.
pub struct StreamingFileWriter {
    dir: PathBuf,
    out: BufWriter<NamedTempFile>,
    bytes: u64,
}

impl StreamingFileWriter {
    pub fn create(dir: &Path, buffer_size: usize) -> Result<Self, PersistError> {
        let tmp = NamedTempFile::new_in(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            out: BufWriter::with_capacity(buffer_size, tmp),
            bytes: 0,
        })
    }

    pub fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), PersistError> {
        self.out.write_all(chunk)?;
        self.bytes += chunk.len() as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }

    /// Flushes and renames the temp file to `{dir}/{filename}`, never replacing an existing file.
    pub fn commit(self, filename: &str) -> Result<CommitOutcome, PersistError> {
        let target = self.dir.join(filename);
        let tmp = self
            .out
            .into_inner()
            .map_err(|e| PersistError::Io(e.into_error()))?;
        tmp.as_file().sync_all()?;

        match tmp.persist_noclobber(&target) {
            Ok(_) => Ok(CommitOutcome::Written {
                path: target,
                bytes: self.bytes,
            }),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                Ok(CommitOutcome::AlreadyExists { path: target })
            }
            Err(e) => Err(PersistError::Io(e.error)),
        }
    }
}
