//! Filedex: Durable Inode-Keyed File Inventory
//!
//! Maintains a persistent inventory of regular files under a directory
//! tree, keyed by filesystem inode, and reconciles it against the live
//! filesystem on each run: a fresh snapshot is diffed against the stored
//! one and the resulting creates, updates, and deletes are applied in a
//! single atomic batch, with content hashing for files under a size limit.

pub mod cli;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod reconcile;
pub mod snapshot;
pub mod store;
pub mod types;
