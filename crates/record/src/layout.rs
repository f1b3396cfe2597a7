//! Lastlog slot layout constants and the configurable [`RecordLayout`].
//!
//! ## Default (Linux glibc) slot - 292 bytes
//!
//! ```text
//! [ll_time: u32 NE][ll_line: 32 bytes][ll_host: 256 bytes]
//! ```
//!
//! Platforms that store a word-sized `time_t` use an 8-byte timestamp
//! instead. Both text fields are fixed-width and are *not* guaranteed to be
//! NUL-terminated.

use crate::CodecError;

/// Default width of the terminal (`ll_line`) field, `UT_LINESIZE` on Linux.
pub const DEFAULT_LINE_SIZE: usize = 32;

/// Default width of the remote host (`ll_host`) field, `UT_HOSTSIZE` on Linux.
pub const DEFAULT_HOST_SIZE: usize = 256;

/// Width of the on-disk timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWidth {
    /// 32-bit seconds since the epoch, read unsigned.
    Four,
    /// 64-bit signed seconds since the epoch.
    Eight,
}

impl TimeWidth {
    /// Returns the width in bytes.
    #[must_use]
    pub fn bytes(self) -> usize {
        match self {
            TimeWidth::Four => 4,
            TimeWidth::Eight => 8,
        }
    }

    /// Maps a byte count (`4` or `8`) to a width.
    pub fn from_bytes(n: usize) -> Result<Self, CodecError> {
        match n {
            4 => Ok(TimeWidth::Four),
            8 => Ok(TimeWidth::Eight),
            other => Err(CodecError::TimeWidth(other)),
        }
    }
}

/// Byte layout of a single fixed-size slot.
///
/// A slot is `time | line | host` with no padding between fields, so
/// [`record_size`](RecordLayout::record_size) is simply the sum of the three
/// widths. Slot `i` of a log file lives at byte `i * record_size()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    time: TimeWidth,
    line_size: usize,
    host_size: usize,
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self {
            time: TimeWidth::Four,
            line_size: DEFAULT_LINE_SIZE,
            host_size: DEFAULT_HOST_SIZE,
        }
    }
}

impl RecordLayout {
    /// Builds a layout from explicit widths.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::FieldWidth`] if either text field is zero bytes
    /// wide: a zero-width field has no room for the forced terminator.
    pub fn new(time: TimeWidth, line_size: usize, host_size: usize) -> Result<Self, CodecError> {
        if line_size == 0 {
            return Err(CodecError::FieldWidth("line"));
        }
        if host_size == 0 {
            return Err(CodecError::FieldWidth("host"));
        }
        Ok(Self {
            time,
            line_size,
            host_size,
        })
    }

    /// Timestamp width.
    #[must_use]
    pub fn time_width(&self) -> TimeWidth {
        self.time
    }

    /// Width of the terminal field in bytes.
    #[must_use]
    pub fn line_size(&self) -> usize {
        self.line_size
    }

    /// Width of the remote host field in bytes.
    #[must_use]
    pub fn host_size(&self) -> usize {
        self.host_size
    }

    /// Size of one slot in bytes.
    #[must_use]
    pub fn record_size(&self) -> usize {
        self.time.bytes() + self.line_size + self.host_size
    }

    /// Byte offset of the terminal field within a slot.
    pub(crate) fn line_offset(&self) -> usize {
        self.time.bytes()
    }

    /// Byte offset of the host field within a slot.
    pub(crate) fn host_offset(&self) -> usize {
        self.time.bytes() + self.line_size
    }
}
