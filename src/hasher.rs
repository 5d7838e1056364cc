//! Content hashing for inventoried files using BLAKE3

use crate::error::ScanError;
use std::fs::File;
use std::io;
use std::path::Path;

/// Content hasher seam.
///
/// The reconciliation engine only ever asks for a digest of a path; keeping
/// this behind a trait lets engine tests substitute deterministic or failing
/// hashers without touching the filesystem.
pub trait ContentHasher {
    /// Compute the content digest of the file at `path`.
    ///
    /// Fails with an I/O error on missing file, permission denial, or read
    /// failure. Callers decide whether that is fatal; the engine treats it
    /// as best-effort and records the file without a digest.
    fn hash_file(&self, path: &Path) -> Result<String, ScanError>;
}

/// BLAKE3 hasher that streams file content from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct Blake3Hasher;

impl ContentHasher for Blake3Hasher {
    fn hash_file(&self, path: &Path) -> Result<String, ScanError> {
        let mut file = File::open(path)?;
        let mut hasher = blake3::Hasher::new();
        // Streamed so large files never sit fully in memory.
        io::copy(&mut file, &mut hasher)?;
        Ok(hasher.finalize().to_hex().to_string())
    }
}

/// Compute the hex BLAKE3 digest of a byte slice.
pub fn hash_bytes(content: &[u8]) -> String {
    blake3::hash(content).to_hex().to_string()
}
