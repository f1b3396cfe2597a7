//! # Store - paged access to an identifier-indexed record file
//!
//! A lastlog file is an array of fixed-size slots where the account id *is*
//! the slot index. The file is usually sparse and can be far larger than the
//! few pages a report touches, so [`PagedStore`] never loads it whole: it
//! keeps one page of `capacity` consecutive records in memory and moves that
//! window around the file on demand.
//!
//! ## Page arithmetic
//!
//! ```text
//!  index:   0   1   2   3 | 4   5   6   7 | 8   9   .   .
//!  page:  ───── page 0 ───┼──── page 1 ───┼──── page 2 ───
//!  byte:  0               4*S             8*S
//! ```
//!
//! `seek(i)` outside the resident page loads the page starting at
//! `floor(i / C) * C`, i.e. byte `floor(i / C) * C * S`, with one absolute
//! reposition and one bounded read.
//!
//! ## Read paths
//!
//! | Situation                     | I/O                              |
//! |-------------------------------|----------------------------------|
//! | first `read_next` after open  | read page 0                      |
//! | `seek` to the next record     | none                             |
//! | `seek` inside resident page   | none                             |
//! | `seek` outside resident page  | reposition + read one page       |
//! | `read_next` at end of page    | read the next contiguous page    |
//! | `read_next` after end of data | none                             |
//!
//! A short final read keeps only whole records. Read errors are treated as
//! end of data: a damaged tail should not abort the whole report.
//!
//! ## Example
//!
//! ```rust,no_run
//! use record::RecordLayout;
//! use store::{PagedStore, DEFAULT_PAGE_RECORDS};
//!
//! let mut s = PagedStore::open("/var/log/lastlog", RecordLayout::default(), DEFAULT_PAGE_RECORDS)?;
//! s.seek(1000)?;
//! if let Some(rec) = s.read_next() {
//!     println!("{} from {}", rec.terminal(), rec.remote_host());
//! }
//! s.close()?;
//! # Ok::<(), store::StoreError>(())
//! ```

mod paged;
mod window;

pub use paged::{PagedStore, StoreStats, DEFAULT_PAGE_RECORDS};

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`PagedStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The log could not be opened. Fatal for a report. The OS error is
    /// the `source`, not part of the message.
    #[error("{}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The store has been closed.
    #[error("store is not open")]
    NotOpen,

    /// No record exists for this index. Recoverable: report "no entry" and
    /// move on to the next identifier.
    #[error("no record for index {index}")]
    NotFound { index: u64 },

    /// Page capacity is zero or too large to allocate.
    #[error("invalid page capacity {0}")]
    Capacity(usize),
}

#[cfg(test)]
mod tests;
