//! Lightweight global metrics for bigtext.
//!
//! Thread-safe atomic counters for:
//! - page reads (forward / backward)
//! - bytes scanned and characters emitted
//! - backward lookback retries
//! - recovered decoding conditions (surrogate trims, malformed, truncated tails)
//! - open failures

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

// ----- Pages -----
static PAGES_FORWARD: AtomicU64 = AtomicU64::new(0);
static PAGES_BACKWARD: AtomicU64 = AtomicU64::new(0);
static BYTES_SCANNED: AtomicU64 = AtomicU64::new(0);
static CHARS_EMITTED: AtomicU64 = AtomicU64::new(0);

// ----- Lookback -----
static LOOKBACK_RETRIES: AtomicU64 = AtomicU64::new(0);

// ----- Recovered decoding -----
static SURROGATES_TRIMMED: AtomicU64 = AtomicU64::new(0);
static MALFORMED_SEQUENCES: AtomicU64 = AtomicU64::new(0);
static TRUNCATED_TAILS: AtomicU64 = AtomicU64::new(0);

// ----- I/O -----
static OPEN_FAILURES: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub pages_forward: u64,
    pub pages_backward: u64,
    pub bytes_scanned: u64,
    pub chars_emitted: u64,

    pub lookback_retries: u64,

    pub surrogates_trimmed: u64,
    pub malformed_sequences: u64,
    pub truncated_tails: u64,

    pub open_failures: u64,
}

impl MetricsSnapshot {
    /// Bytes scanned per emitted character (includes lookback overshoot).
    pub fn avg_bytes_per_char(&self) -> f64 {
        if self.chars_emitted == 0 {
            0.0
        } else {
            self.bytes_scanned as f64 / self.chars_emitted as f64
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// ----- Recorders -----
pub fn record_page_forward(bytes_scanned: u64, chars: usize) {
    PAGES_FORWARD.fetch_add(1, Ordering::Relaxed);
    BYTES_SCANNED.fetch_add(bytes_scanned, Ordering::Relaxed);
    CHARS_EMITTED.fetch_add(chars as u64, Ordering::Relaxed);
}

pub fn record_page_backward(bytes_scanned: u64, chars: usize) {
    PAGES_BACKWARD.fetch_add(1, Ordering::Relaxed);
    BYTES_SCANNED.fetch_add(bytes_scanned, Ordering::Relaxed);
    CHARS_EMITTED.fetch_add(chars as u64, Ordering::Relaxed);
}

pub fn record_lookback_retry() {
    LOOKBACK_RETRIES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_surrogate_trimmed() {
    SURROGATES_TRIMMED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_malformed_sequence() {
    MALFORMED_SEQUENCES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_truncated_tail() {
    TRUNCATED_TAILS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_open_failure() {
    OPEN_FAILURES.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        pages_forward: PAGES_FORWARD.load(Ordering::Relaxed),
        pages_backward: PAGES_BACKWARD.load(Ordering::Relaxed),
        bytes_scanned: BYTES_SCANNED.load(Ordering::Relaxed),
        chars_emitted: CHARS_EMITTED.load(Ordering::Relaxed),

        lookback_retries: LOOKBACK_RETRIES.load(Ordering::Relaxed),

        surrogates_trimmed: SURROGATES_TRIMMED.load(Ordering::Relaxed),
        malformed_sequences: MALFORMED_SEQUENCES.load(Ordering::Relaxed),
        truncated_tails: TRUNCATED_TAILS.load(Ordering::Relaxed),

        open_failures: OPEN_FAILURES.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    PAGES_FORWARD.store(0, Ordering::Relaxed);
    PAGES_BACKWARD.store(0, Ordering::Relaxed);
    BYTES_SCANNED.store(0, Ordering::Relaxed);
    CHARS_EMITTED.store(0, Ordering::Relaxed);

    LOOKBACK_RETRIES.store(0, Ordering::Relaxed);

    SURROGATES_TRIMMED.store(0, Ordering::Relaxed);
    MALFORMED_SEQUENCES.store(0, Ordering::Relaxed);
    TRUNCATED_TAILS.store(0, Ordering::Relaxed);

    OPEN_FAILURES.store(0, Ordering::Relaxed);
}
