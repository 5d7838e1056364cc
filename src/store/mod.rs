//! Inventory Store
//!
//! Persists the inode-keyed inventory across runs. The trait is the seam
//! the reconciliation engine writes through; the sled implementation lives
//! in `persistence`.

pub mod persistence;

pub use persistence::SledInventoryStore;

use crate::error::StorageError;
use crate::reconcile::ReconcilePlan;
use crate::types::Snapshot;

/// Inventory Store interface
pub trait InventoryStore {
    /// Load every persisted record into an inode-keyed snapshot.
    fn load_all(&self) -> Result<Snapshot, StorageError>;

    /// Apply every operation in the plan atomically.
    ///
    /// Either all deletes, updates, and creates commit together or the
    /// store is left untouched and the error is surfaced.
    fn apply(&self, plan: &ReconcilePlan) -> Result<(), StorageError>;

    /// Discard all persisted records for a clean rebuild.
    ///
    /// Invoked only at startup, before any reconciliation.
    fn reinitialize(&self) -> Result<(), StorageError>;
}
