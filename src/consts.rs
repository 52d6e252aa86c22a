//! Shared constants (page sizing, lookback heuristic, UTF-8 bit patterns).

// -------- Paging --------

/// Default page size in characters. Roughly 32 KiB of CJK text, small enough
/// for a text widget to lay out without stalling.
pub const DEFAULT_PAGE_CHARS: u32 = 11_000;

// -------- Backward lookback --------
// estimated_bytes = chars * LOOKBACK_BYTES_PER_CHAR + margin

pub const LOOKBACK_BYTES_PER_CHAR: u64 = 3;
pub const DEFAULT_LOOKBACK_MARGIN: u64 = 10;
/// How many times the window may be doubled when a pass comes up short.
pub const DEFAULT_LOOKBACK_RETRIES: u32 = 4;

// -------- UTF-8 --------
// Leading byte patterns:
//   0xxxxxxx -> 1, 110xxxxx -> 2, 1110xxxx -> 3, 11110xxx -> 4
// Continuation: 10xxxxxx

pub const UTF8_CONT_MASK: u8 = 0xC0;
pub const UTF8_CONT_TAG: u8 = 0x80;
pub const UTF8_MAX_LEN: usize = 4;

/// Replacement emitted for sequences that do not decode.
pub const DEFAULT_REPLACEMENT: char = '\u{FFFD}';
