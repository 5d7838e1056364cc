//! CLI definitions and command execution for the filedex binary.

use crate::hasher::Blake3Hasher;
use crate::reconcile::{self, RunSummary, DEFAULT_HASH_SIZE_LIMIT};
use crate::store::{InventoryStore, SledInventoryStore};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

/// Filedex CLI - durable inode-keyed file inventory
#[derive(Parser)]
#[command(name = "filedex")]
#[command(about = "Scan a directory tree and reconcile it into a durable file inventory")]
pub struct Cli {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Inventory database path
    #[arg(long, default_value = "filedex.db")]
    pub database: PathBuf,

    /// Drop all existing records before scanning (full rebuild)
    #[arg(long)]
    pub init: bool,

    /// Maximum file size in bytes eligible for content hashing
    #[arg(long, default_value_t = DEFAULT_HASH_SIZE_LIMIT)]
    pub hash_limit: u64,

    /// Enable verbose logging of store operations and file decisions
    #[arg(long, default_value = "false")]
    pub verbose: bool,
}

/// Execute one inventory run as described by the parsed CLI arguments.
pub fn execute(cli: &Cli) -> anyhow::Result<RunSummary> {
    let store = SledInventoryStore::open(&cli.database)
        .with_context(|| format!("failed to open inventory database {:?}", cli.database))?;

    if cli.init {
        store
            .reinitialize()
            .context("failed to reinitialize inventory database")?;
    }

    let summary = reconcile::run(&store, cli.root.clone(), &Blake3Hasher, cli.hash_limit)
        .with_context(|| format!("reconciliation failed for {:?}", cli.root))?;

    Ok(summary)
}
