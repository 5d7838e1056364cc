//! Shared data model for the file inventory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

/// Filesystem-assigned inode number, the primary key of the inventory.
///
/// Unique within one root at one point in time. Inode reuse after deletion
/// is a known ambiguity the engine does not defend against.
pub type Inode = u64;

/// One inventoried regular file, as observed during a walk or as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Inode number (primary key).
    pub inode: Inode,
    /// Base filename, no directory component.
    pub name: String,
    /// Full path as observed during the walk. May change across runs for
    /// the same inode when the file is moved within the tree.
    pub path: PathBuf,
    /// Byte length.
    pub size: u64,
    /// Last-modification timestamp.
    pub mod_time: SystemTime,
    /// Hex BLAKE3 content digest. `None` when the file exceeded the hash
    /// size limit or hashing failed.
    pub hash: Option<String>,
}

impl fmt::Display for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.size, self.name)
    }
}

/// Inode-keyed view of the tree at one point in time.
///
/// Two snapshots exist per run: the prior one loaded from the store and the
/// current one built by the walk. Both are owned by the reconciliation
/// engine and discarded at process exit.
pub type Snapshot = HashMap<Inode, FileRecord>;
