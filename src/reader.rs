//! reader — path-bound page reader.
//!
//! Every call opens the file, optionally takes a shared advisory lock, reads
//! one page through a FileSource or MmapSource, and releases everything
//! before returning. Nothing is cached between calls.
//!
//! read_next_page / read_previous_page never fail: a missing or unreadable
//! file yields an empty page with is_boundary = true and the input offset
//! unchanged, which a paging caller treats the same as end-of-file.
//! try_read_next_page / try_read_previous_page surface I/O errors instead
//! (a missing file is still an empty boundary page there).

use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::PagerConfig;
use crate::lock::{acquire_lock, LockMode};
use crate::metrics::record_open_failure;
use crate::page::{self, PageResult};
use crate::source::{ByteSource, FileSource, MmapSource};
use crate::utf8::adjust_to_char_boundary;

#[derive(Debug, Clone)]
pub struct BigFileReader {
    path: PathBuf,
    cfg: PagerConfig,
}

impl BigFileReader {
    /// Reader for `path` with configuration from the environment.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_config(path, PagerConfig::from_env())
    }

    pub fn with_config<P: AsRef<Path>>(path: P, cfg: PagerConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cfg,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &PagerConfig {
        &self.cfg
    }

    /// Page forward from `byte_offset`. Never fails; see module docs.
    pub fn read_next_page(&self, byte_offset: u64, char_count: u32) -> PageResult {
        match self.try_read_next_page(byte_offset, char_count) {
            Ok(p) => p,
            Err(e) => {
                warn!("read_next_page {}: {:#}", self.path.display(), e);
                PageResult::boundary(byte_offset)
            }
        }
    }

    /// Page backward from `current_start_offset`. Never fails; see module docs.
    pub fn read_previous_page(&self, current_start_offset: u64, char_count: u32) -> PageResult {
        match self.try_read_previous_page(current_start_offset, char_count) {
            Ok(p) => p,
            Err(e) => {
                warn!("read_previous_page {}: {:#}", self.path.display(), e);
                PageResult::boundary(current_start_offset)
            }
        }
    }

    pub fn try_read_next_page(&self, byte_offset: u64, char_count: u32) -> Result<PageResult> {
        let cfg = &self.cfg;
        self.with_source(byte_offset, |src| {
            page::read_next_page(src, byte_offset, char_count, cfg)
        })
    }

    pub fn try_read_previous_page(
        &self,
        current_start_offset: u64,
        char_count: u32,
    ) -> Result<PageResult> {
        if current_start_offset == 0 {
            return Ok(PageResult::boundary(0));
        }
        let cfg = &self.cfg;
        self.with_source(current_start_offset, |src| {
            page::read_previous_page(src, current_start_offset, char_count, cfg)
        })
    }

    /// Move `offset` forward to the next character start (clamped to the
    /// file length). A missing file aligns to 0.
    pub fn align_offset(&self, offset: u64) -> Result<u64> {
        let Some(file) = self.open_file()? else {
            return Ok(0);
        };
        let mut src = FileSource::from_file(file)?;
        let len = src.len()?;
        adjust_to_char_boundary(&mut src, offset.min(len))
    }

    /// Current file length in bytes.
    pub fn file_len(&self) -> Result<u64> {
        let meta = std::fs::metadata(&self.path)
            .with_context(|| format!("metadata {}", self.path.display()))?;
        Ok(meta.len())
    }

    /// Open the file; None if it does not exist.
    fn open_file(&self) -> Result<Option<File>> {
        match File::open(&self.path) {
            Ok(f) => Ok(Some(f)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                record_open_failure();
                warn!("file not found: {}", self.path.display());
                Ok(None)
            }
            Err(e) => {
                record_open_failure();
                Err(e).with_context(|| format!("open {}", self.path.display()))
            }
        }
    }

    /// Scoped acquisition: open, lock, build a source, run `f`, release.
    fn with_source<F>(&self, input_offset: u64, f: F) -> Result<PageResult>
    where
        F: FnOnce(&mut dyn ByteSource) -> Result<PageResult>,
    {
        let Some(file) = self.open_file()? else {
            return Ok(PageResult::boundary(input_offset));
        };

        // The lock lives on a second handle so the source can own the first.
        let lock_handle = if self.cfg.shared_lock {
            Some(file.try_clone().context("clone handle for lock")?)
        } else {
            None
        };
        let _guard = match &lock_handle {
            Some(h) => Some(
                acquire_lock(h, LockMode::Shared)
                    .with_context(|| format!("shared lock {}", self.path.display()))?,
            ),
            None => None,
        };

        if self.cfg.use_mmap {
            debug!("page read via mmap: {}", self.path.display());
            let mut src = MmapSource::from_file(&file)
                .with_context(|| format!("mmap {}", self.path.display()))?;
            f(&mut src)
        } else {
            let mut src = FileSource::from_file(file)?;
            f(&mut src)
        }
    }
}
