//! # Record - lastlog slot codec
//!
//! The lastlog file is a flat array of fixed-size slots indexed by numeric
//! account id: slot `i` starts at byte `i * record_size`. Each slot holds the
//! most recent login of that account.
//!
//! ## Slot layout
//!
//! ```text
//! ┌──────────────────┬────────────────────┬─────────────────────┐
//! │ time (4|8 B, NE) │ line (line_size B) │ host (host_size B)  │
//! └──────────────────┴────────────────────┴─────────────────────┘
//! ```
//!
//! Integers are in native byte order, the way the login programs write
//! them. Text fields are fixed-width and may be unterminated; [`decode`]
//! always forces a terminator at the last byte of each field.
//!
//! Sparse holes read back as all-zero slots and decode to a record with
//! timestamp `0`, the "never logged in" sentinel.
//!
//! ## Example
//!
//! ```rust
//! use record::{decode, encode, RecordLayout};
//!
//! let layout = RecordLayout::default();
//! let raw = encode(&layout, 1_700_000_000, "pts/0", "10.0.0.7").unwrap();
//! let rec = decode(&layout, &raw).unwrap();
//! assert_eq!(rec.terminal(), "pts/0");
//! assert_eq!(rec.last_login(), Some(1_700_000_000));
//! ```

mod layout;
mod codec;

pub use layout::{RecordLayout, TimeWidth, DEFAULT_HOST_SIZE, DEFAULT_LINE_SIZE};
pub use codec::{decode, encode, fixed_text, LogRecord};

use thiserror::Error;

/// Errors produced by the slot codec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The raw block is not exactly one slot long.
    #[error("raw slot is {actual} bytes, layout expects {expected}")]
    Length { expected: usize, actual: usize },

    /// Unsupported timestamp width.
    #[error("timestamp width must be 4 or 8 bytes, got {0}")]
    TimeWidth(usize),

    /// A text field was configured with zero width.
    #[error("{0} field width must be at least 1 byte")]
    FieldWidth(&'static str),

    /// A timestamp does not fit the layout's time field.
    #[error("timestamp {0} does not fit a 4-byte time field")]
    Timestamp(i64),
}

#[cfg(test)]
mod tests;
