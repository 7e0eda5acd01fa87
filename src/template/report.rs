use crate::boundary::BoundaryWarning;
use crate::error::ReleaseError;
use crate::fs::FileSystem;
use std::io;
use std::path::{Path, PathBuf};

/// What a rewrite batch did, file by file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Paths whose content was written, in processing order
    pub written: Vec<PathBuf>,
    /// Inputs read successfully whose output already had the rendered content
    pub unchanged: Vec<PathBuf>,
    /// Skipped inputs and recoverable template problems
    pub warnings: Vec<BoundaryWarning>,
}

impl BatchReport {
    /// Read a batch input, recording a warning and returning `None` when it
    /// is missing or unreadable
    pub(crate) fn read_input<F: FileSystem>(&mut self, fs: &F, path: &Path) -> Option<String> {
        if !fs.exists(path) {
            self.warnings.push(BoundaryWarning::MissingFile {
                path: path.to_path_buf(),
            });
            return None;
        }

        match fs.read_file(path) {
            Ok(content) => Some(content),
            Err(e) => {
                self.warnings.push(BoundaryWarning::UnreadableFile {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    /// Abort the batch: everything written so far, the failed path and the
    /// inputs never attempted travel with the error
    pub(crate) fn into_write_error<P: AsRef<Path>>(
        self,
        failed: PathBuf,
        pending: &[P],
        source: io::Error,
    ) -> ReleaseError {
        ReleaseError::BatchWrite {
            failed,
            written: self.written,
            pending: pending.iter().map(|p| p.as_ref().to_path_buf()).collect(),
            source,
        }
    }

    /// Combine two reports, keeping processing order
    pub fn merge(mut self, other: BatchReport) -> Self {
        self.written.extend(other.written);
        self.unchanged.extend(other.unchanged);
        self.warnings.extend(other.warnings);
        self
    }
}
