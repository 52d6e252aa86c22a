//! page — forward/backward page reads over a ByteSource.
//!
//! - read_next_page(src, byte_offset, char_count, cfg)
//! - read_previous_page(src, current_start, char_count, cfg)
//!
//! Both are stateless: every call is a function of (bytes, offset, count).
//! Offsets returned in PageResult always sit on a character start or at
//! end-of-file.
//!
//! Byte accounting uses the source width of every decoded character, so a
//! replacement character standing in for a malformed byte still accounts for
//! exactly the bytes it replaced.

use serde::{Deserialize, Serialize};

use crate::config::CountUnit;
use crate::surrogate::{trim_leading_low_surrogate, trim_trailing_high_surrogate};

mod next;
mod prev;

pub use next::read_next_page;
pub use prev::read_previous_page;

/// One page of decoded text.
///
/// `offset` is where the next page (forward) or this page (backward) starts.
/// `is_boundary` is set when the read reached end-of-file (forward) or
/// start-of-file (backward).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageResult {
    pub content: String,
    pub offset: u64,
    pub is_boundary: bool,
}

impl PageResult {
    pub fn new(content: String, offset: u64, is_boundary: bool) -> Self {
        Self {
            content,
            offset,
            is_boundary,
        }
    }

    /// Empty page that tells the caller there is nothing more to read.
    pub fn boundary(offset: u64) -> Self {
        Self::new(String::new(), offset, true)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

enum Units {
    Scalar(Vec<char>),
    Utf16(Vec<u16>),
}

/// Page text accumulator, counted in the configured unit.
///
/// `widths[i]` is the number of source bytes behind unit `i`. A surrogate
/// pair carries its whole width on the high half and 0 on the low half, so
/// whichever half survives a cut, trimming it keeps the byte count exact.
pub(crate) struct PageBuf {
    units: Units,
    widths: Vec<u8>,
}

impl PageBuf {
    pub(crate) fn new(unit: CountUnit) -> Self {
        let units = match unit {
            CountUnit::Scalar => Units::Scalar(Vec::new()),
            CountUnit::Utf16 => Units::Utf16(Vec::new()),
        };
        Self {
            units,
            widths: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, ch: char, width: u8) {
        match &mut self.units {
            Units::Scalar(chars) => {
                chars.push(ch);
                self.widths.push(width);
            }
            Units::Utf16(units) => {
                let mut pair = [0u16; 2];
                let enc = ch.encode_utf16(&mut pair);
                units.push(enc[0]);
                self.widths.push(width);
                if enc.len() == 2 {
                    units.push(enc[1]);
                    self.widths.push(0);
                }
            }
        }
    }

    /// Units held so far.
    pub(crate) fn len(&self) -> usize {
        self.widths.len()
    }

    pub(crate) fn byte_len(&self) -> u64 {
        self.widths.iter().map(|&w| w as u64).sum()
    }

    /// Keep the first `n` units.
    pub(crate) fn truncate(&mut self, n: usize) {
        match &mut self.units {
            Units::Scalar(chars) => chars.truncate(n),
            Units::Utf16(units) => units.truncate(n),
        }
        self.widths.truncate(n);
    }

    /// Keep the last `n` units.
    pub(crate) fn keep_last(&mut self, n: usize) {
        let cut = self.len().saturating_sub(n);
        if cut == 0 {
            return;
        }
        match &mut self.units {
            Units::Scalar(chars) => {
                chars.drain(..cut);
            }
            Units::Utf16(units) => {
                units.drain(..cut);
            }
        }
        self.widths.drain(..cut);
    }

    /// Drop a trailing lone high surrogate. Returns true if one was dropped.
    pub(crate) fn trim_tail(&mut self) -> bool {
        let keep = match &self.units {
            Units::Scalar(_) => return false,
            Units::Utf16(units) => trim_trailing_high_surrogate(units).len(),
        };
        let trimmed = keep < self.len();
        self.truncate(keep);
        trimmed
    }

    /// Drop a leading lone low surrogate. Returns true if one was dropped.
    pub(crate) fn trim_head(&mut self) -> bool {
        let keep = match &self.units {
            Units::Scalar(_) => return false,
            Units::Utf16(units) => trim_leading_low_surrogate(units).len(),
        };
        let trimmed = keep < self.len();
        self.keep_last(keep);
        trimmed
    }

    pub(crate) fn into_string(self) -> String {
        match self.units {
            Units::Scalar(chars) => chars.into_iter().collect(),
            // Edges are trimmed and pairs are pushed whole, so no lone halves remain.
            Units::Utf16(units) => String::from_utf16_lossy(&units),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_counts_chars() {
        let mut buf = PageBuf::new(CountUnit::Scalar);
        buf.push('a', 1);
        buf.push('😀', 4);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.byte_len(), 5);
        assert!(!buf.trim_tail());
        assert_eq!(buf.into_string(), "a😀");
    }

    #[test]
    fn utf16_cut_pair_is_trimmed_with_its_bytes() {
        let mut buf = PageBuf::new(CountUnit::Utf16);
        buf.push('a', 1);
        buf.push('😀', 4);
        assert_eq!(buf.len(), 3);

        buf.truncate(2);
        assert!(buf.trim_tail());
        assert_eq!(buf.byte_len(), 1);
        assert_eq!(buf.into_string(), "a");
    }

    #[test]
    fn utf16_leading_low_half_costs_no_bytes() {
        let mut buf = PageBuf::new(CountUnit::Utf16);
        buf.push('😀', 4);
        buf.push('b', 1);
        buf.keep_last(2);
        assert_eq!(buf.byte_len(), 1);
        assert!(buf.trim_head());
        assert_eq!(buf.byte_len(), 1);
        assert_eq!(buf.into_string(), "b");
    }

    #[test]
    fn keep_last_larger_than_len_keeps_all() {
        let mut buf = PageBuf::new(CountUnit::Scalar);
        buf.push('x', 1);
        buf.keep_last(10);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn boundary_page_is_empty() {
        let p = PageResult::boundary(7);
        assert!(p.is_empty());
        assert_eq!(p.offset, 7);
        assert!(p.is_boundary);
    }
}
