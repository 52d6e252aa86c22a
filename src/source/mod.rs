//! source — random-access byte sources the page reader walks over.
//!
//! The reader never holds a hidden cursor: every read names its absolute
//! offset and the caller threads the next offset through by value.
//!
//! Implementations:
//! - FileSource  — seek + read on a std::fs::File
//! - MmapSource  — read-only memory map (memmap2)
//! - SliceSource — bytes already in memory

use anyhow::Result;

mod file;
mod mmap;

pub use file::FileSource;
pub use mmap::MmapSource;

/// Random-access byte source with a known total length.
pub trait ByteSource {
    /// Total length in bytes.
    fn len(&mut self) -> Result<u64>;

    /// Read up to `buf.len()` bytes starting at `offset`.
    /// Returns the number of bytes read; 0 at or past end-of-file.
    /// A short count means end-of-file was reached inside `buf`.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn len(&mut self) -> Result<u64> {
        (**self).len()
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        (**self).read_at(offset, buf)
    }
}

/// In-memory source over borrowed bytes.
#[derive(Debug, Clone, Copy)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}

/// Copy from `bytes[offset..]` into `buf`; shared by the in-memory sources.
#[inline]
pub(crate) fn copy_at(bytes: &[u8], offset: u64, buf: &mut [u8]) -> usize {
    let len = bytes.len() as u64;
    if offset >= len {
        return 0;
    }
    let start = offset as usize;
    let n = buf.len().min(bytes.len() - start);
    buf[..n].copy_from_slice(&bytes[start..start + n]);
    n
}

impl ByteSource for SliceSource<'_> {
    fn len(&mut self) -> Result<u64> {
        Ok(self.bytes.len() as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        Ok(copy_at(self.bytes, offset, buf))
    }
}
