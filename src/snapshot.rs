//! Filesystem snapshotter: walks a root and builds the current inode mapping

use crate::error::ScanError;
use crate::types::{FileRecord, Snapshot};
use std::os::unix::fs::MetadataExt;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, instrument, trace};
use walkdir::WalkDir;

/// Filesystem snapshotter for a single root directory.
pub struct Snapshotter {
    root: PathBuf,
}

impl Snapshotter {
    /// Create a new snapshotter for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Walk the tree and build the current inode mapping.
    ///
    /// Only regular files are recorded; directories, symlinks, and special
    /// files are skipped without error. Symlinks are never followed as
    /// directories. A walk or metadata failure on any entry aborts the whole
    /// scan — there is no partial-success mode. Walk order is not guaranteed,
    /// which is fine downstream: reconciliation is order-independent.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn snapshot(&self) -> Result<Snapshot, ScanError> {
        let start = Instant::now();
        info!("Starting filesystem snapshot");

        let mut current = Snapshot::new();

        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = entry.map_err(|e| {
                error!("Filesystem walk failed: {}", e);
                ScanError::Walk(e)
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path().to_path_buf();
            let metadata = entry.metadata().map_err(ScanError::Walk)?;
            let mod_time = metadata
                .modified()
                .map_err(|e| ScanError::Stat {
                    path: path.clone(),
                    source: e,
                })?;

            let record = FileRecord {
                inode: metadata.ino(),
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                size: metadata.len(),
                mod_time,
                hash: None,
            };

            trace!(inode = record.inode, path = %record.path.display(), "Observed file");
            current.insert(record.inode, record);
        }

        let duration = start.elapsed();
        debug!(
            file_count = current.len(),
            duration_ms = duration.as_millis() as u64,
            "Snapshot complete"
        );

        Ok(current)
    }
}
