//! cursor — caller-side navigation over a BigFileReader.
//!
//! PageCursor remembers the byte window `[start, end)` of the page on screen
//! and turns next/prev requests into reader calls. It holds no file handle;
//! every move is one independent reader call.
//!
//! With CountUnit::Utf16 and a page size of 1, a page that starts on a
//! supplementary-plane character comes back empty and next() makes no
//! progress; use page sizes of at least 2 there.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::page::PageResult;
use crate::reader::BigFileReader;

/// Byte window of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageWindow {
    pub start: u64,
    pub end: u64,
    pub at_start: bool,
    pub at_end: bool,
}

pub struct PageCursor<'r> {
    reader: &'r BigFileReader,
    page_chars: u32,
    window: PageWindow,
}

impl<'r> PageCursor<'r> {
    pub fn new(reader: &'r BigFileReader) -> Self {
        Self {
            reader,
            page_chars: reader.config().page_chars,
            window: PageWindow {
                at_start: true,
                ..PageWindow::default()
            },
        }
    }

    /// Resume from a previously saved window without reading anything.
    pub fn restore(reader: &'r BigFileReader, window: PageWindow) -> Self {
        Self {
            reader,
            page_chars: reader.config().page_chars,
            window,
        }
    }

    pub fn with_page_chars(mut self, n: u32) -> Self {
        self.page_chars = n;
        self
    }

    pub fn page_chars(&self) -> u32 {
        self.page_chars
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn at_start(&self) -> bool {
        self.window.at_start
    }

    pub fn at_end(&self) -> bool {
        self.window.at_end
    }

    /// Load the first page.
    pub fn first(&mut self) -> PageResult {
        self.seek(0)
    }

    /// Load the page starting at the first character start at or after
    /// `offset`.
    pub fn seek(&mut self, offset: u64) -> PageResult {
        let start = match self.reader.align_offset(offset) {
            Ok(s) => s,
            Err(e) => {
                warn!("seek {}: {:#}", offset, e);
                offset
            }
        };
        let page = self.reader.read_next_page(start, self.page_chars);
        self.window = PageWindow {
            start,
            end: page.offset,
            at_start: start == 0,
            at_end: page.is_boundary,
        };
        page
    }

    /// Load the page after the current one. None when already at the end.
    pub fn next(&mut self) -> Option<PageResult> {
        if self.window.at_end {
            return None;
        }
        let start = self.window.end;
        let page = self.reader.read_next_page(start, self.page_chars);
        self.window = PageWindow {
            start,
            end: page.offset,
            at_start: start == 0,
            at_end: page.is_boundary,
        };
        Some(page)
    }

    /// Load the page before the current one. None when already at the start.
    pub fn prev(&mut self) -> Option<PageResult> {
        if self.window.at_start || self.window.start == 0 {
            return None;
        }
        let end = self.window.start;
        let page = self.reader.read_previous_page(end, self.page_chars);
        self.window = PageWindow {
            start: page.offset,
            end,
            at_start: page.is_boundary,
            at_end: false,
        };
        Some(page)
    }
}
