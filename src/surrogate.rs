//! surrogate — trim lone UTF-16 surrogate halves at page edges.
//!
//! Only meaningful when page text is measured in UTF-16 code units
//! (CountUnit::Utf16): a count limit can then cut a supplementary-plane
//! character between its high and low unit. A Rust `str` can never hold a
//! lone surrogate, so these work on `&[u16]`.

const HIGH_START: u16 = 0xD800;
const HIGH_END: u16 = 0xDBFF;
const LOW_START: u16 = 0xDC00;
const LOW_END: u16 = 0xDFFF;

#[inline]
pub fn is_high_surrogate(u: u16) -> bool {
    (HIGH_START..=HIGH_END).contains(&u)
}

#[inline]
pub fn is_low_surrogate(u: u16) -> bool {
    (LOW_START..=LOW_END).contains(&u)
}

/// Drop a trailing high surrogate (its low half was cut off).
pub fn trim_trailing_high_surrogate(units: &[u16]) -> &[u16] {
    match units.split_last() {
        Some((&last, rest)) if is_high_surrogate(last) => rest,
        _ => units,
    }
}

/// Drop a leading low surrogate (its high half was cut off).
pub fn trim_leading_low_surrogate(units: &[u16]) -> &[u16] {
    match units.split_first() {
        Some((&first, rest)) if is_low_surrogate(first) => rest,
        _ => units,
    }
}
