//! Ensures only one calext-server uses a token directory at a time.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::Path;

const LOCK_FILE: &str = ".lock";

/// A lock guard that releases the lock when dropped
pub struct LockGuard {
    _file: File,
}

/// Acquire an exclusive lock, failing if another instance is running
pub fn acquire_lock(token_dir: &Path) -> Result<LockGuard> {
    fs::create_dir_all(token_dir)
        .with_context(|| format!("Failed to create token directory {}", token_dir.display()))?;

    let path = token_dir.join(LOCK_FILE);
    let file = File::create(&path).context("Failed to create lock file")?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another calext-server instance is already using {}.\n\
            If you believe this is an error, remove: {}",
            token_dir.display(),
            path.display()
        )
    })?;

    Ok(LockGuard { _file: file })
}
