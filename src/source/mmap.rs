//! source/mmap — read-only memory map over the whole file.
//!
//! An empty file is not mapped (mapping zero bytes fails on some platforms);
//! it reads as an empty source.

use anyhow::{bail, Context, Result};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::path::Path;

use super::{copy_at, ByteSource};

#[derive(Debug)]
pub struct MmapSource {
    map: Option<Mmap>,
}

impl MmapSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        Self::from_file(&file).with_context(|| format!("mmap {}", path.display()))
    }

    /// Map `file`. The map stays valid after `file` is dropped.
    pub fn from_file(file: &File) -> Result<Self> {
        let meta = file.metadata().context("file metadata")?;
        if !meta.is_file() {
            bail!("not a regular file");
        }
        let len = meta.len();
        if len == 0 {
            return Ok(Self { map: None });
        }
        let len = usize::try_from(len).context("file too large to map")?;
        // SAFETY: read-only map. Concurrent writers are outside the reader's
        // contract; a truncating writer can fault the process.
        let map = unsafe { MmapOptions::new().len(len).map(file) }.context("mmap")?;
        Ok(Self { map: Some(map) })
    }

    fn bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }
}

impl ByteSource for MmapSource {
    fn len(&mut self) -> Result<u64> {
        Ok(self.bytes().len() as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        Ok(copy_at(self.bytes(), offset, buf))
    }
}
