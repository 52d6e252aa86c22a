//! Centralized configuration and builder for bigtext readers.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - PagerConfig::from_env() reads the BT_* env vars over the defaults.
//! - ReaderBuilder returns a PagerConfig or a ready BigFileReader.
//!
//! Env:
//! - BT_PAGE_CHARS        (u32, default 11000)
//! - BT_COUNT_UNIT        (scalar|utf16, default scalar)
//! - BT_LOOKBACK_MARGIN   (u64, default 10)
//! - BT_LOOKBACK_RETRIES  (u32, default 4; 0 disables adaptive lookback)
//! - BT_USE_MMAP          (1|true|yes|on, default off)
//! - BT_SHARED_LOCK       (1|true|yes|on, default off)

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_LOOKBACK_MARGIN, DEFAULT_LOOKBACK_RETRIES, DEFAULT_PAGE_CHARS, DEFAULT_REPLACEMENT,
};
use crate::reader::BigFileReader;

/// Unit in which a page's character count is measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountUnit {
    /// One Unicode scalar value per character. Surrogate pairs never split.
    #[default]
    Scalar,
    /// One UTF-16 code unit per character, as measured by UTF-16 host strings.
    /// A supplementary-plane character counts 2 and may be cut at a page edge.
    Utf16,
}

impl FromStr for CountUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" | "char" | "chars" => Ok(CountUnit::Scalar),
            "utf16" | "utf-16" => Ok(CountUnit::Utf16),
            other => Err(format!("unknown count unit '{}'", other)),
        }
    }
}

impl fmt::Display for CountUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountUnit::Scalar => f.write_str("scalar"),
            CountUnit::Utf16 => f.write_str("utf16"),
        }
    }
}

/// Top-level configuration for a page reader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Default page size used by PageCursor.
    /// Env: BT_PAGE_CHARS (default 11000)
    pub page_chars: u32,

    /// Unit `char_count` is measured in.
    /// Env: BT_COUNT_UNIT = scalar|utf16 (default scalar)
    pub count_unit: CountUnit,

    /// Fixed safety margin added to the backward lookback estimate.
    /// Env: BT_LOOKBACK_MARGIN (default 10)
    pub lookback_margin: u64,

    /// Window doublings allowed when a backward pass comes up short.
    /// Env: BT_LOOKBACK_RETRIES (default 4)
    pub lookback_retries: u32,

    /// Read through a read-only memory map instead of seek+read.
    /// Env: BT_USE_MMAP (default false)
    pub use_mmap: bool,

    /// Hold a shared advisory lock on the file for the duration of a call.
    /// Env: BT_SHARED_LOCK (default false)
    pub shared_lock: bool,

    /// Character emitted in place of a sequence that does not decode.
    pub replacement: char,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_chars: DEFAULT_PAGE_CHARS,
            count_unit: CountUnit::Scalar,
            lookback_margin: DEFAULT_LOOKBACK_MARGIN,
            lookback_retries: DEFAULT_LOOKBACK_RETRIES,
            use_mmap: false,
            shared_lock: false,
            replacement: DEFAULT_REPLACEMENT,
        }
    }
}

#[inline]
fn env_flag(v: &str) -> bool {
    let s = v.trim().to_ascii_lowercase();
    s == "1" || s == "true" || s == "yes" || s == "on"
}

impl PagerConfig {
    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("BT_PAGE_CHARS") {
            if let Ok(n) = v.trim().parse::<u32>() {
                cfg.page_chars = n;
            }
        }

        if let Ok(v) = std::env::var("BT_COUNT_UNIT") {
            match v.parse::<CountUnit>() {
                Ok(u) => cfg.count_unit = u,
                Err(e) => log::warn!("BT_COUNT_UNIT ignored: {}", e),
            }
        }

        if let Ok(v) = std::env::var("BT_LOOKBACK_MARGIN") {
            if let Ok(n) = v.trim().parse::<u64>() {
                cfg.lookback_margin = n;
            }
        }

        if let Ok(v) = std::env::var("BT_LOOKBACK_RETRIES") {
            if let Ok(n) = v.trim().parse::<u32>() {
                cfg.lookback_retries = n;
            }
        }

        if let Ok(v) = std::env::var("BT_USE_MMAP") {
            cfg.use_mmap = env_flag(&v);
        }

        if let Ok(v) = std::env::var("BT_SHARED_LOCK") {
            cfg.shared_lock = env_flag(&v);
        }

        cfg
    }

    pub fn with_page_chars(mut self, n: u32) -> Self {
        self.page_chars = n;
        self
    }

    pub fn with_count_unit(mut self, unit: CountUnit) -> Self {
        self.count_unit = unit;
        self
    }

    pub fn with_lookback_margin(mut self, bytes: u64) -> Self {
        self.lookback_margin = bytes;
        self
    }

    /// 0 restores the single-pass lookback (may return short pages on
    /// 4-byte-heavy text).
    pub fn with_lookback_retries(mut self, n: u32) -> Self {
        self.lookback_retries = n;
        self
    }

    pub fn with_use_mmap(mut self, on: bool) -> Self {
        self.use_mmap = on;
        self
    }

    pub fn with_shared_lock(mut self, on: bool) -> Self {
        self.shared_lock = on;
        self
    }

    pub fn with_replacement(mut self, ch: char) -> Self {
        self.replacement = ch;
        self
    }

    /// Lookback window for `chars` characters, before any doubling.
    #[inline]
    pub fn lookback_window(&self, chars: u32) -> u64 {
        (chars as u64)
            .saturating_mul(crate::consts::LOOKBACK_BYTES_PER_CHAR)
            .saturating_add(self.lookback_margin)
    }
}

impl fmt::Display for PagerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PagerConfig {{ \
             page_chars: {}, \
             count_unit: {}, \
             lookback_margin: {}, \
             lookback_retries: {}, \
             use_mmap: {}, \
             shared_lock: {}, \
             replacement: U+{:04X} \
             }}",
            self.page_chars,
            self.count_unit,
            self.lookback_margin,
            self.lookback_retries,
            self.use_mmap,
            self.shared_lock,
            self.replacement as u32,
        )
    }
}

/// Lightweight builder that produces a PagerConfig or a reader.
#[derive(Clone, Debug)]
pub struct ReaderBuilder {
    cfg: PagerConfig,
}

impl Default for ReaderBuilder {
    fn default() -> Self {
        Self {
            cfg: PagerConfig::from_env(),
        }
    }
}

impl ReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: PagerConfig::default(),
        }
    }

    pub fn page_chars(mut self, n: u32) -> Self {
        self.cfg.page_chars = n;
        self
    }

    pub fn count_unit(mut self, unit: CountUnit) -> Self {
        self.cfg.count_unit = unit;
        self
    }

    pub fn lookback_margin(mut self, bytes: u64) -> Self {
        self.cfg.lookback_margin = bytes;
        self
    }

    pub fn lookback_retries(mut self, n: u32) -> Self {
        self.cfg.lookback_retries = n;
        self
    }

    pub fn use_mmap(mut self, on: bool) -> Self {
        self.cfg.use_mmap = on;
        self
    }

    pub fn shared_lock(mut self, on: bool) -> Self {
        self.cfg.shared_lock = on;
        self
    }

    pub fn replacement(mut self, ch: char) -> Self {
        self.cfg.replacement = ch;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> PagerConfig {
        self.cfg
    }

    /// Finish the builder with a reader bound to `path`.
    pub fn open<P: AsRef<Path>>(self, path: P) -> BigFileReader {
        BigFileReader::with_config(path, self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_unit_parse() {
        assert_eq!("scalar".parse::<CountUnit>().unwrap(), CountUnit::Scalar);
        assert_eq!(" UTF16 ".parse::<CountUnit>().unwrap(), CountUnit::Utf16);
        assert_eq!("utf-16".parse::<CountUnit>().unwrap(), CountUnit::Utf16);
        assert!("bytes".parse::<CountUnit>().is_err());
    }

    #[test]
    fn lookback_window_matches_heuristic() {
        let cfg = PagerConfig::default();
        assert_eq!(cfg.lookback_window(100), 310);
        assert_eq!(cfg.with_lookback_margin(0).lookback_window(0), 0);
        assert_eq!(PagerConfig::default().lookback_window(u32::MAX), u32::MAX as u64 * 3 + 10);
    }

    #[test]
    fn builder_overrides_defaults() {
        let cfg = ReaderBuilder::from_default()
            .page_chars(64)
            .count_unit(CountUnit::Utf16)
            .lookback_retries(0)
            .use_mmap(true)
            .build();
        assert_eq!(cfg.page_chars, 64);
        assert_eq!(cfg.count_unit, CountUnit::Utf16);
        assert_eq!(cfg.lookback_retries, 0);
        assert!(cfg.use_mmap);
        assert!(!cfg.shared_lock);
        assert_eq!(cfg.lookback_margin, DEFAULT_LOOKBACK_MARGIN);
    }

    #[test]
    fn display_mentions_every_field() {
        let s = PagerConfig::default().to_string();
        for key in [
            "page_chars: 11000",
            "count_unit: scalar",
            "lookback_margin: 10",
            "lookback_retries: 4",
            "use_mmap: false",
            "shared_lock: false",
            "replacement: U+FFFD",
        ] {
            assert!(s.contains(key), "missing '{}' in {}", key, s);
        }
    }
}
