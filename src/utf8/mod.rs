//! utf8 — byte-level UTF-8 helpers over a ByteSource.
//!
//! - adjust_to_char_boundary: move an arbitrary offset forward to the first
//!   byte that starts a character (or to end-of-file)
//! - read_one_char: read exactly one character's bytes at an offset
//!
//! Both take the position by value and never rely on a hidden file cursor.

mod boundary;
mod codepoint;

pub use boundary::{adjust_to_char_boundary, is_continuation};
pub use codepoint::{read_one_char, sequence_len, Utf8Read};
