//! Reconciliation engine: diffs the prior and current snapshots and applies
//! the delta through the inventory store in one transaction.

use crate::error::FiledexError;
use crate::hasher::ContentHasher;
use crate::snapshot::Snapshotter;
use crate::store::InventoryStore;
use crate::types::{FileRecord, Snapshot};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Default ceiling on file size for content hashing: 10 MiB.
///
/// Hashing cost is proportional to file size; the ceiling keeps a run from
/// being dominated by a handful of large files.
pub const DEFAULT_HASH_SIZE_LIMIT: u64 = 10 * 1024 * 1024;

/// The delta between two snapshots, expressed as store operations.
///
/// Applied atomically by [`InventoryStore::apply`]: either every operation
/// commits or none does.
#[derive(Debug, Default, Clone)]
pub struct ReconcilePlan {
    /// Records present in the prior snapshot but absent from the current one.
    pub deletes: Vec<FileRecord>,
    /// Records whose inode was not previously known.
    pub creates: Vec<FileRecord>,
    /// Matched records whose mod time advanced.
    pub updates: Vec<FileRecord>,
}

impl ReconcilePlan {
    /// True when the plan carries no operations at all.
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.creates.is_empty() && self.updates.is_empty()
    }

    /// Total number of store operations in the plan.
    pub fn len(&self) -> usize {
        self.deletes.len() + self.creates.len() + self.updates.len()
    }
}

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Regular files observed in the walk.
    pub scanned: usize,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files scanned: {} created, {} updated, {} deleted",
            self.scanned, self.created, self.updated, self.deleted
        )
    }
}

/// Compute the delta between the prior and current snapshots.
///
/// Deletion: every inode in `prior` missing from `current` yields one
/// delete. Creation: every inode only in `current` yields one create, with
/// the content hashed when `size <= hash_size_limit`. Match: an update is
/// issued iff the current mod time is strictly later than the prior one;
/// an unchanged or older mod time issues nothing, even when path or name
/// differ. Hashing is best-effort throughout: on failure the record keeps
/// `hash = None` rather than inheriting the stale prior digest.
pub fn reconcile(
    prior: &Snapshot,
    current: Snapshot,
    hasher: &dyn ContentHasher,
    hash_size_limit: u64,
) -> ReconcilePlan {
    let mut plan = ReconcilePlan::default();

    for (inode, record) in prior {
        if !current.contains_key(inode) {
            debug!(inode, path = %record.path.display(), "File gone, marking for delete");
            plan.deletes.push(record.clone());
        }
    }

    for (inode, mut record) in current {
        match prior.get(&inode) {
            Some(prior_record) => {
                if record.mod_time > prior_record.mod_time {
                    hash_within_limit(&mut record, hasher, hash_size_limit);
                    debug!(inode, path = %record.path.display(), "File changed, marking for update");
                    plan.updates.push(record);
                }
                // Unchanged or older mod time: leave the stored record alone.
            }
            None => {
                hash_within_limit(&mut record, hasher, hash_size_limit);
                debug!(inode, path = %record.path.display(), "New file, marking for create");
                plan.creates.push(record);
            }
        }
    }

    plan
}

fn hash_within_limit(record: &mut FileRecord, hasher: &dyn ContentHasher, hash_size_limit: u64) {
    if record.size > hash_size_limit {
        return;
    }
    match hasher.hash_file(&record.path) {
        Ok(hash) => record.hash = Some(hash),
        Err(e) => {
            // Best-effort: the record is still persisted, just digest-less.
            warn!(path = %record.path.display(), "Content hashing failed: {}", e);
        }
    }
}

/// Run one full reconciliation cycle against `root`.
///
/// Loads the prior mapping, snapshots the filesystem, computes the delta,
/// and applies it through the store in one transaction. A store or walk
/// failure aborts the run with no partial writes.
#[instrument(skip(store, hasher), fields(root = %root.display()))]
pub fn run(
    store: &dyn InventoryStore,
    root: PathBuf,
    hasher: &dyn ContentHasher,
    hash_size_limit: u64,
) -> Result<RunSummary, FiledexError> {
    let start = Instant::now();

    let prior = store.load_all()?;
    debug!(record_count = prior.len(), "Loaded prior inventory");

    let current = Snapshotter::new(root).snapshot()?;
    let scanned = current.len();

    let plan = reconcile(&prior, current, hasher, hash_size_limit);
    let summary = RunSummary {
        scanned,
        created: plan.creates.len(),
        updated: plan.updates.len(),
        deleted: plan.deletes.len(),
    };

    if plan.is_empty() {
        debug!("Inventory already in sync, nothing to apply");
    } else {
        store.apply(&plan)?;
    }

    info!(
        scanned = summary.scanned,
        created = summary.created,
        updated = summary.updated,
        deleted = summary.deleted,
        duration_ms = start.elapsed().as_millis() as u64,
        "Reconciliation complete"
    );

    Ok(summary)
}
