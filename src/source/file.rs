//! source/file — seek + read over an open file.
//!
//! Length is taken from metadata once at construction; the file is assumed
//! not to change size while a call is in flight.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use super::ByteSource;

#[derive(Debug)]
pub struct FileSource {
    file: File,
    len: u64,
}

impl FileSource {
    /// Open `path` read-only.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        Self::from_file(file)
    }

    /// Wrap an already-open file handle.
    pub fn from_file(file: File) -> Result<Self> {
        let meta = file.metadata().context("file metadata")?;
        if !meta.is_file() {
            bail!("not a regular file");
        }
        Ok(Self {
            file,
            len: meta.len(),
        })
    }
}

impl ByteSource for FileSource {
    fn len(&mut self) -> Result<u64> {
        Ok(self.len)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        if offset >= self.len || buf.is_empty() {
            return Ok(0);
        }
        self.file
            .seek(SeekFrom::Start(offset))
            .with_context(|| format!("seek to {}", offset))?;

        // read() may return short; keep going until buf is full or EOF.
        let mut filled = 0;
        while filled < buf.len() {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).with_context(|| format!("read at {}", offset)),
            }
        }
        Ok(filled)
    }
}
