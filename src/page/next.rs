use anyhow::Result;
use log::debug;

use crate::config::PagerConfig;
use crate::metrics::{
    record_malformed_sequence, record_page_forward, record_surrogate_trimmed, record_truncated_tail,
};
use crate::source::ByteSource;
use crate::utf8::{adjust_to_char_boundary, read_one_char, Utf8Read};

use super::{PageBuf, PageResult};

/// Read up to `char_count` characters starting at `byte_offset`.
///
/// `byte_offset` may point anywhere; it is moved forward to the next
/// character start (and clamped to the file length) before reading.
/// The returned offset is where the following page starts.
pub fn read_next_page<S: ByteSource + ?Sized>(
    src: &mut S,
    byte_offset: u64,
    char_count: u32,
    cfg: &PagerConfig,
) -> Result<PageResult> {
    let file_len = src.len()?;
    if file_len == 0 {
        return Ok(PageResult::boundary(0));
    }

    let start = adjust_to_char_boundary(src, byte_offset.min(file_len))?;
    if char_count == 0 {
        return Ok(PageResult::new(String::new(), start, start >= file_len));
    }

    let limit = char_count as usize;
    let mut buf = PageBuf::new(cfg.count_unit);
    let mut pos = start;
    let mut truncated_tail = false;

    while buf.len() < limit && pos < file_len {
        let Some(read) = read_one_char(src, pos)? else {
            break;
        };
        match read {
            Utf8Read::Char { ch, len } => buf.push(ch, len),
            Utf8Read::Malformed { len } => {
                record_malformed_sequence();
                buf.push(cfg.replacement, len);
            }
            Utf8Read::Truncated { len } => {
                // Partial character at EOF: not counted, not emitted.
                record_truncated_tail();
                debug!(
                    "read_next_page: {} dangling byte(s) at {} before EOF {}",
                    len, pos, file_len
                );
                truncated_tail = true;
                break;
            }
        }
        pos += read.byte_len();
    }

    // A surrogate pair may overshoot the limit by one unit: cut, then trim the
    // lone high half.
    buf.truncate(limit);
    if buf.trim_tail() {
        record_surrogate_trimmed();
    }

    let next = if truncated_tail {
        // Nothing decodable remains; skip the dangling bytes.
        file_len
    } else {
        adjust_to_char_boundary(src, start + buf.byte_len())?
    };

    let chars = buf.len();
    record_page_forward(pos - start, chars);
    debug!(
        "read_next_page: start={} next={} units={} file_len={}",
        start, next, chars, file_len
    );

    Ok(PageResult::new(buf.into_string(), next, next >= file_len))
}
