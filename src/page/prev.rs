use anyhow::Result;
use log::debug;

use crate::config::PagerConfig;
use crate::metrics::{
    record_lookback_retry, record_malformed_sequence, record_page_backward,
    record_surrogate_trimmed, record_truncated_tail,
};
use crate::source::ByteSource;
use crate::utf8::{adjust_to_char_boundary, read_one_char, Utf8Read};

use super::{PageBuf, PageResult};

/// Read up to `char_count` characters that end at `current_start`.
///
/// Bytes can only be decoded forward, so this estimates a lookback window
/// (`char_count * 3 + margin`), decodes it, and keeps the tail. When a pass
/// yields fewer characters than asked and the window did not reach the start
/// of the file, the window is doubled, up to `cfg.lookback_retries` times.
///
/// The returned offset is where the returned page starts.
pub fn read_previous_page<S: ByteSource + ?Sized>(
    src: &mut S,
    current_start: u64,
    char_count: u32,
    cfg: &PagerConfig,
) -> Result<PageResult> {
    if current_start == 0 {
        return Ok(PageResult::boundary(0));
    }

    let file_len = src.len()?;
    let current = adjust_to_char_boundary(src, current_start.min(file_len))?;
    if current == 0 {
        return Ok(PageResult::boundary(0));
    }
    if char_count == 0 {
        return Ok(PageResult::new(String::new(), current, false));
    }

    let limit = char_count as usize;
    let mut window = cfg.lookback_window(char_count);
    let mut retries = 0u32;
    let mut scanned = 0u64;

    loop {
        let search_start = adjust_to_char_boundary(src, current.saturating_sub(window))?;
        let (mut buf, end) = scan_window(src, search_start, current, cfg)?;
        scanned += end.saturating_sub(search_start);

        if buf.len() < limit && search_start > 0 && retries < cfg.lookback_retries {
            retries += 1;
            record_lookback_retry();
            debug!(
                "read_previous_page: window {} at {} gave {}/{} units, retry #{}",
                window,
                search_start,
                buf.len(),
                limit,
                retries
            );
            window = window.saturating_mul(2);
            continue;
        }

        buf.keep_last(limit);
        if buf.trim_head() {
            record_surrogate_trimmed();
        }

        let prev = end - buf.byte_len();
        let chars = buf.len();
        record_page_backward(scanned, chars);
        debug!(
            "read_previous_page: current={} prev={} units={} search_start={}",
            current, prev, chars, search_start
        );
        return Ok(PageResult::new(buf.into_string(), prev, prev == 0));
    }
}

/// Decode every character in `[from, to)`.
///
/// `to` sits on a character start, so no sequence read from `from` can run
/// past it. Returns the buffer and the offset where decoding stopped, which is
/// `to` unless a truncated tail at end-of-file cut it short.
fn scan_window<S: ByteSource + ?Sized>(
    src: &mut S,
    from: u64,
    to: u64,
    cfg: &PagerConfig,
) -> Result<(PageBuf, u64)> {
    let mut buf = PageBuf::new(cfg.count_unit);
    let mut pos = from;

    while pos < to {
        let Some(read) = read_one_char(src, pos)? else {
            break;
        };
        match read {
            Utf8Read::Char { ch, len } => buf.push(ch, len),
            Utf8Read::Malformed { len } => {
                record_malformed_sequence();
                buf.push(cfg.replacement, len);
            }
            Utf8Read::Truncated { .. } => {
                record_truncated_tail();
                break;
            }
        }
        pos += read.byte_len();
    }
    Ok((buf, pos))
}
