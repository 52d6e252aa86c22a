use anyhow::Result;

use crate::consts::{UTF8_CONT_MASK, UTF8_CONT_TAG, UTF8_MAX_LEN};
use crate::source::ByteSource;

/// 10xxxxxx
#[inline]
pub fn is_continuation(b: u8) -> bool {
    (b & UTF8_CONT_MASK) == UTF8_CONT_TAG
}

/// Skip continuation bytes starting at `offset`.
///
/// Returns the offset of the first byte that is not a continuation byte, or
/// the source length if the scan runs off the end. Offsets past the end are
/// returned unchanged.
///
/// Offset 0 is always a page start, even when the file opens with stray
/// continuation bytes; those decode as malformed sequences instead.
pub fn adjust_to_char_boundary<S: ByteSource + ?Sized>(src: &mut S, offset: u64) -> Result<u64> {
    if offset == 0 {
        return Ok(0);
    }
    let len = src.len()?;
    let mut pos = offset;
    let mut chunk = [0u8; UTF8_MAX_LEN];

    // Valid text has at most 3 continuation bytes in a row; malformed runs
    // can be longer, so keep scanning chunk by chunk.
    while pos < len {
        let n = src.read_at(pos, &mut chunk)?;
        if n == 0 {
            return Ok(pos);
        }
        match chunk[..n].iter().position(|&b| !is_continuation(b)) {
            Some(i) => return Ok(pos + i as u64),
            None => pos += n as u64,
        }
    }
    Ok(pos)
}
