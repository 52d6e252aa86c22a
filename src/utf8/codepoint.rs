use anyhow::Result;

use crate::consts::UTF8_MAX_LEN;
use crate::source::ByteSource;

use super::boundary::is_continuation;

/// Outcome of reading one character at a byte position.
///
/// `byte_len()` is the number of bytes consumed; the next character starts
/// at `pos + byte_len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Read {
    /// A whole sequence that decodes to `ch`.
    Char { ch: char, len: u8 },
    /// Bytes that do not decode (bad leading byte, a sequence cut short by a
    /// non-continuation byte, overlong or surrogate encodings). Consumed as
    /// one unit.
    Malformed { len: u8 },
    /// End-of-file arrived inside a sequence; only `len` bytes were there.
    Truncated { len: u8 },
}

impl Utf8Read {
    #[inline]
    pub fn byte_len(&self) -> u64 {
        match *self {
            Utf8Read::Char { len, .. } | Utf8Read::Malformed { len } | Utf8Read::Truncated { len } => {
                len as u64
            }
        }
    }
}

/// Sequence length announced by a leading byte.
///
/// 0xxxxxxx -> 1, 110xxxxx -> 2, 1110xxxx -> 3, 11110xxx -> 4.
/// Anything else (stray continuation, 11111xxx) is treated as a 1-byte
/// sequence.
#[inline]
pub fn sequence_len(lead: u8) -> usize {
    if lead & 0x80 == 0 {
        1
    } else if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}

/// Read one character starting at `pos`. Returns None at end-of-file.
///
/// One `read_at` of up to `UTF8_MAX_LEN` bytes per character.
pub fn read_one_char<S: ByteSource + ?Sized>(src: &mut S, pos: u64) -> Result<Option<Utf8Read>> {
    let mut buf = [0u8; UTF8_MAX_LEN];
    let got = src.read_at(pos, &mut buf)?;
    if got == 0 {
        return Ok(None);
    }
    let lead = buf[0];

    let want = sequence_len(lead);
    if want == 1 {
        return Ok(Some(if lead.is_ascii() {
            Utf8Read::Char {
                ch: lead as char,
                len: 1,
            }
        } else {
            Utf8Read::Malformed { len: 1 }
        }));
    }

    let avail = got.min(want);

    // A non-continuation byte ends the sequence early; it belongs to the next
    // character, so only the bytes before it are consumed.
    if let Some(i) = buf[1..avail].iter().position(|&b| !is_continuation(b)) {
        return Ok(Some(Utf8Read::Malformed { len: (1 + i) as u8 }));
    }
    if avail < want {
        return Ok(Some(Utf8Read::Truncated { len: avail as u8 }));
    }

    let seq = &buf[..want];
    Ok(Some(
        match std::str::from_utf8(seq).ok().and_then(|s| s.chars().next()) {
            Some(ch) => Utf8Read::Char {
                ch,
                len: want as u8,
            },
            None => Utf8Read::Malformed { len: want as u8 },
        },
    ))
}
