//! Decoding of raw slots into [`LogRecord`] values.

use byteorder::{ByteOrder, NativeEndian};

use crate::layout::{RecordLayout, TimeWidth};
use crate::CodecError;

/// The most recent login stored in one lastlog slot.
///
/// A value is only ever produced by [`decode`]. A zero timestamp is the
/// "never logged in" sentinel; holes in a sparse log decode to exactly that,
/// so [`has_logged_in`](LogRecord::has_logged_in) is `false` both for an
/// account that never logged in and for a slot nobody ever wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    timestamp: i64,
    terminal: String,
    remote_host: String,
}

impl LogRecord {
    /// Raw timestamp in seconds since the epoch (`0` = never logged in).
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// `true` unless the timestamp is the zero sentinel.
    #[must_use]
    pub fn has_logged_in(&self) -> bool {
        self.timestamp != 0
    }

    /// The login time, or `None` for the never-logged-in sentinel.
    #[must_use]
    pub fn last_login(&self) -> Option<i64> {
        self.has_logged_in().then_some(self.timestamp)
    }

    /// Terminal the login came from (e.g. `pts/0`).
    #[must_use]
    pub fn terminal(&self) -> &str {
        &self.terminal
    }

    /// Remote host the login came from, empty for local logins.
    #[must_use]
    pub fn remote_host(&self) -> &str {
        &self.remote_host
    }
}

/// Decodes one slot.
///
/// `raw` must be exactly `layout.record_size()` bytes. Any bit pattern of the
/// right length decodes to *some* record; whether the values make sense is up
/// to the caller.
///
/// # Errors
///
/// Returns [`CodecError::Length`] if `raw` has the wrong length.
pub fn decode(layout: &RecordLayout, raw: &[u8]) -> Result<LogRecord, CodecError> {
    let expected = layout.record_size();
    if raw.len() != expected {
        return Err(CodecError::Length {
            expected,
            actual: raw.len(),
        });
    }

    let timestamp = match layout.time_width() {
        TimeWidth::Four => i64::from(NativeEndian::read_u32(&raw[..4])),
        TimeWidth::Eight => NativeEndian::read_i64(&raw[..8]),
    };

    let line = &raw[layout.line_offset()..layout.host_offset()];
    let host = &raw[layout.host_offset()..expected];

    Ok(LogRecord {
        timestamp,
        terminal: fixed_text(Some(line)),
        remote_host: fixed_text(Some(host)),
    })
}

/// Turns a fixed-width, possibly unterminated text field into a string.
///
/// The last byte of the field is always treated as the terminator, whether
/// or not the writer put one there, so at most `field.len() - 1` bytes are
/// visible. Text stops at the first NUL. Invalid UTF-8 is replaced rather
/// than rejected. `None` yields an empty string.
#[must_use]
pub fn fixed_text(field: Option<&[u8]>) -> String {
    let bytes = match field {
        Some(b) if !b.is_empty() => b,
        _ => return String::new(),
    };

    let bounded = &bytes[..bytes.len() - 1];
    let end = bounded.iter().position(|&b| b == 0).unwrap_or(bounded.len());
    String::from_utf8_lossy(&bounded[..end]).into_owned()
}

/// Builds the raw bytes of one slot.
///
/// The log itself is never written through this crate; this exists so tools
/// and tests can lay down fixture files in the exact on-disk format. Text
/// longer than its field is cut at the field width; the remainder of each
/// field is zero-filled.
///
/// # Errors
///
/// Returns [`CodecError::Timestamp`] if `timestamp` does not fit a 4-byte
/// layout.
pub fn encode(
    layout: &RecordLayout,
    timestamp: i64,
    terminal: &str,
    remote_host: &str,
) -> Result<Vec<u8>, CodecError> {
    let mut buf = vec![0u8; layout.record_size()];

    match layout.time_width() {
        TimeWidth::Four => {
            let t = u32::try_from(timestamp).map_err(|_| CodecError::Timestamp(timestamp))?;
            NativeEndian::write_u32(&mut buf[..4], t);
        }
        TimeWidth::Eight => NativeEndian::write_i64(&mut buf[..8], timestamp),
    }

    copy_field(
        &mut buf[layout.line_offset()..layout.host_offset()],
        terminal.as_bytes(),
    );
    copy_field(&mut buf[layout.host_offset()..], remote_host.as_bytes());

    Ok(buf)
}

fn copy_field(dst: &mut [u8], src: &[u8]) {
    let n = src.len().min(dst.len());
    dst[..n].copy_from_slice(&src[..n]);
}
