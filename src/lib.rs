//! bigtext — boundary-safe paginated reader for large UTF-8 text files.
//!
//! Pages are addressed by byte offset and read in bounded chunks; a page
//! never splits a multi-byte character, and (when counting UTF-16 units)
//! never ends or starts with half of a surrogate pair.

// Base modules
pub mod consts;
pub mod config;
pub mod metrics;
pub mod lock;

// Byte sources (file, mmap, memory)
pub mod source;

// UTF-8 boundary locator + codepoint reader
pub mod utf8;

// Lone surrogate trimming for UTF-16 counting
pub mod surrogate;

// Page reads: read_next_page / read_previous_page
pub mod page;

// Path-bound facade and caller-side navigation
pub mod reader;
pub mod cursor;

// Convenience re-exports
pub use config::{CountUnit, PagerConfig, ReaderBuilder};
pub use cursor::{PageCursor, PageWindow};
pub use page::{read_next_page, read_previous_page, PageResult};
pub use reader::BigFileReader;
pub use source::{ByteSource, FileSource, MmapSource, SliceSource};
