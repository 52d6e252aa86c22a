//! Advisory locking around a single page read.
//!
//! Cross-platform (fs2) locks taken on the text file itself:
//! - Shared: held by readers for the duration of one call, so a cooperating
//!   writer that takes Exclusive waits for the read to finish.
//! - Exclusive: for writers that want to pause readers while they rewrite.
//!
//! Lock is released on Drop. Non-cooperating writers are not affected.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::File;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

/// Holds the advisory lock on a borrowed file until dropped.
pub struct LockGuard<'a> {
    file: &'a File,
    mode: LockMode,
}

impl<'a> LockGuard<'a> {
    pub fn mode(&self) -> LockMode {
        self.mode
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        // fs2 unlock errors on drop are ignored deliberately.
        let _ = self.file.unlock();
    }
}

/// Acquire a lock in the requested mode. Blocks until acquired.
pub fn acquire_lock(file: &File, mode: LockMode) -> Result<LockGuard<'_>> {
    match mode {
        LockMode::Shared => file.lock_shared().context("lock_shared")?,
        LockMode::Exclusive => file.lock_exclusive().context("lock_exclusive")?,
    }
    Ok(LockGuard { file, mode })
}

/// Try to acquire a lock in the requested mode. Returns Err if already locked.
pub fn try_acquire_lock(file: &File, mode: LockMode) -> Result<LockGuard<'_>> {
    match mode {
        LockMode::Shared => file.try_lock_shared().context("try_lock_shared failed")?,
        LockMode::Exclusive => file
            .try_lock_exclusive()
            .context("try_lock_exclusive failed")?,
    }
    Ok(LockGuard { file, mode })
}
