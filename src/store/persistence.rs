//! Sled-backed persistence for the Inventory Store

use crate::error::StorageError;
use crate::reconcile::ReconcilePlan;
use crate::store::InventoryStore;
use crate::types::{FileRecord, Inode, Snapshot};
use std::path::Path;
use tracing::{debug, trace};

/// Sled-based implementation of InventoryStore.
///
/// Keys are big-endian inode bytes, values bincode-encoded [`FileRecord`]s.
/// A [`ReconcilePlan`] is translated into one `sled::Batch`, which sled
/// applies atomically; that batch is the transaction unit of a run.
pub struct SledInventoryStore {
    db: sled::Db,
}

impl SledInventoryStore {
    /// Open (or create) the inventory database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    fn key(inode: Inode) -> [u8; 8] {
        inode.to_be_bytes()
    }
}

impl InventoryStore for SledInventoryStore {
    fn load_all(&self) -> Result<Snapshot, StorageError> {
        let mut prior = Snapshot::new();
        for item in self.db.iter() {
            let (_, value) = item?;
            let record: FileRecord = bincode::deserialize(&value)?;
            prior.insert(record.inode, record);
        }
        debug!(record_count = prior.len(), "Loaded inventory records");
        Ok(prior)
    }

    fn apply(&self, plan: &ReconcilePlan) -> Result<(), StorageError> {
        let mut batch = sled::Batch::default();

        for record in &plan.deletes {
            trace!(inode = record.inode, "delete");
            batch.remove(Self::key(record.inode).to_vec());
        }
        for record in plan.creates.iter().chain(&plan.updates) {
            trace!(inode = record.inode, path = %record.path.display(), "upsert");
            let value = bincode::serialize(record)?;
            batch.insert(Self::key(record.inode).to_vec(), value);
        }

        debug!(
            deletes = plan.deletes.len(),
            creates = plan.creates.len(),
            updates = plan.updates.len(),
            "Applying reconcile plan"
        );

        self.db.apply_batch(batch)?;
        self.db.flush()?;
        Ok(())
    }

    fn reinitialize(&self) -> Result<(), StorageError> {
        debug!("Reinitializing inventory store");
        self.db.clear()?;
        self.db.flush()?;
        Ok(())
    }
}
